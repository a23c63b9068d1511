//! Table marker injection.
//!
//! Every section of a [`DocumentTree`] has the same nested shape, so a
//! renderer cannot tell a real table from body paragraphs grouped at table
//! depth. This pass prepends a one-cell sentinel row to every table block
//! and wraps paragraph runs as one-cell sections without one.
//!
//! ```text
//! [                       // section
//!   [ [ [TABLE_MARKER] ] ],  // marker row > cell > paragraph > run
//!   [ [header1] [header2] ],
//!   [ [data1]   [data2]   ],
//! ]
//! ```

use crate::model::{Block, Cell, DocumentTree, Paragraph, Row, Section};

/// Sentinel run text that opens every table section.
///
/// It starts with U+0000, which cannot be encoded in an XML 1.0 document,
/// so no run read from a document can equal it.
pub const TABLE_MARKER: &str = "\u{0}untable:table:4e62660e-8342-4222-8530-d4ff65856687";

/// Build the synthetic row placed before a table's real rows.
pub fn marker_row() -> Row {
    Row::new(vec![Cell::new(vec![Paragraph::with_text(TABLE_MARKER)])])
}

/// Check whether a row is a marker row.
pub fn is_marker_row(row: &Row) -> bool {
    match row.cells.as_slice() {
        [cell] => cell
            .paragraphs
            .first()
            .and_then(Paragraph::first_run)
            .is_some_and(|run| run == TABLE_MARKER),
        _ => false,
    }
}

/// Convert loader blocks into a tree with marker rows on every table.
pub fn inject(blocks: Vec<Block>) -> DocumentTree {
    let mut tree = DocumentTree::new();
    for block in blocks {
        tree.push(match block {
            Block::Table(rows) => marked_table(rows),
            Block::Paragraphs(paragraphs) => Section::plain(paragraphs),
        });
    }
    log::debug!("Injected table markers into {} sections", tree.len());
    tree
}

fn marked_table(rows: Vec<Row>) -> Section {
    let mut marked = Vec::with_capacity(rows.len() + 1);
    marked.push(marker_row());
    marked.extend(rows);
    Section::new(marked)
}
