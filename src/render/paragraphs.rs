//! Lazy paragraph rendering over a document tree.
//!
//! Sections are visited in reading order. Plain sections yield each
//! paragraph's text unchanged. Table sections drop the marker row, fold
//! their leading rows into unique headers, and yield one bordered record
//! per remaining row:
//!
//! ```text
//! --------------------
//! Name: Widget
//! Price: 4.50
//! --------------------
//! ```
//!
//! # Example
//!
//! ```no_run
//! use untable::{parse_file, render};
//!
//! fn main() -> untable::Result<()> {
//!     let doc = parse_file("report.docx")?;
//!     let options = render::RenderOptions::default();
//!
//!     for paragraph in render::paragraphs(&doc.tree, &options) {
//!         println!("{}\n", paragraph?.text);
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{DocumentTree, Paragraph, Row, Section};

use super::table::{cell_texts, classify, combine_headers, SectionKind};
use super::{CleanupPipeline, ExtractionStats, MalformedTable, RenderOptions};

/// One `header: value` pair of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column header
    pub header: String,
    /// Cell value
    pub value: String,
}

/// What produced an output paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParagraphKind {
    /// A paragraph of plain content
    Text,
    /// One data row of a table
    Record {
        /// Paired columns in column order
        fields: Vec<Field>,
    },
}

/// A rendered unit of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputParagraph {
    /// Index of the source section
    pub section: usize,

    /// Source of the paragraph
    #[serde(flatten)]
    pub kind: ParagraphKind,

    /// Rendered text
    pub text: String,
}

impl OutputParagraph {
    /// Check if this paragraph is a table record.
    pub fn is_record(&self) -> bool {
        matches!(self.kind, ParagraphKind::Record { .. })
    }

    /// Record fields, empty for text paragraphs.
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            ParagraphKind::Record { fields } => fields,
            ParagraphKind::Text => &[],
        }
    }
}

impl std::fmt::Display for OutputParagraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render a tree lazily.
///
/// The iterator borrows the tree; iterate again by calling this again.
pub fn paragraphs<'a>(tree: &'a DocumentTree, options: &'a RenderOptions) -> Paragraphs<'a> {
    Paragraphs::new(tree, options)
}

enum Cursor<'a> {
    Plain {
        section: usize,
        paragraphs: Box<dyn Iterator<Item = &'a Paragraph> + 'a>,
    },
    Records {
        section: usize,
        headers: Vec<String>,
        rows: std::slice::Iter<'a, Row>,
    },
}

/// Iterator over rendered paragraphs.
///
/// Yields `Err` once if a table's headers cannot be made unique (unless
/// malformed tables are skipped) and then ends.
pub struct Paragraphs<'a> {
    sections: std::iter::Enumerate<std::slice::Iter<'a, Section>>,
    options: &'a RenderOptions,
    cleanup: Option<CleanupPipeline>,
    current: Option<Cursor<'a>>,
    stats: ExtractionStats,
    failed: bool,
}

impl<'a> Paragraphs<'a> {
    /// Create a renderer over a tree.
    pub fn new(tree: &'a DocumentTree, options: &'a RenderOptions) -> Self {
        Self {
            sections: tree.sections.iter().enumerate(),
            options,
            cleanup: options.cleanup.clone().map(CleanupPipeline::new),
            current: None,
            stats: ExtractionStats::new(),
            failed: false,
        }
    }

    /// Statistics for everything yielded so far.
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    /// Consume the iterator, returning its statistics.
    pub fn into_stats(self) -> ExtractionStats {
        self.stats
    }

    fn open(&mut self, index: usize, section: &'a Section) -> Result<Option<Cursor<'a>>> {
        self.stats.section_count += 1;

        if classify(section) == SectionKind::Plain {
            self.stats.plain_section_count += 1;
            return Ok(Some(plain_cursor(index, &section.rows)));
        }

        self.stats.table_count += 1;
        let rows = &section.rows[1..];

        // No header, or a header with no data: table markup used for layout.
        if rows.len() <= 1 {
            self.stats.layout_table_count += 1;
            return Ok(Some(plain_cursor(index, rows)));
        }

        match combine_headers(index, rows, self.options, self.cleanup.as_ref()) {
            Ok(set) => Ok(Some(Cursor::Records {
                section: index,
                headers: set.headers,
                rows: rows[set.rows_consumed..].iter(),
            })),
            Err(e) => match self.options.on_malformed_table {
                MalformedTable::Fail => Err(e),
                MalformedTable::Skip => {
                    log::warn!("Skipping table: {}", e);
                    self.stats.skipped_table_count += 1;
                    Ok(None)
                }
            },
        }
    }
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = Result<OutputParagraph>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            match self.current.as_mut() {
                Some(Cursor::Plain {
                    section,
                    paragraphs,
                }) => {
                    if let Some(paragraph) = paragraphs.next() {
                        let text = clean(self.cleanup.as_ref(), paragraph.text());
                        self.stats.text_paragraph_count += 1;
                        self.stats.count_text(&text);
                        return Some(Ok(OutputParagraph {
                            section: *section,
                            kind: ParagraphKind::Text,
                            text,
                        }));
                    }
                }
                Some(Cursor::Records {
                    section,
                    headers,
                    rows,
                }) => {
                    if let Some(row) = rows.next() {
                        let record =
                            render_record(*section, headers, row, self.options, self.cleanup.as_ref());
                        self.stats.record_count += 1;
                        self.stats.count_text(&record.text);
                        return Some(Ok(record));
                    }
                }
                None => {}
            }

            let (index, section) = self.sections.next()?;
            match self.open(index, section) {
                Ok(cursor) => self.current = cursor,
                Err(e) => {
                    self.failed = true;
                    self.current = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn plain_cursor(section: usize, rows: &[Row]) -> Cursor<'_> {
    Cursor::Plain {
        section,
        paragraphs: Box::new(
            rows.iter()
                .flat_map(|row| row.cells.iter())
                .flat_map(|cell| cell.paragraphs.iter()),
        ),
    }
}

fn render_record(
    section: usize,
    headers: &[String],
    row: &Row,
    options: &RenderOptions,
    cleanup: Option<&CleanupPipeline>,
) -> OutputParagraph {
    // Headers arrive already cleaned.
    let fields: Vec<Field> = headers
        .iter()
        .zip(cell_texts(row, options, cleanup))
        .map(|(header, value)| Field {
            header: header.clone(),
            value,
        })
        .collect();

    let mut lines = Vec::with_capacity(fields.len() + 2);
    lines.push(options.table_border.clone());
    lines.extend(fields.iter().map(|f| format!("{}: {}", f.header, f.value)));
    lines.push(options.table_border.clone());

    OutputParagraph {
        section,
        kind: ParagraphKind::Record { fields },
        text: lines.join("\n"),
    }
}

fn clean(cleanup: Option<&CleanupPipeline>, text: String) -> String {
    match cleanup {
        Some(pipeline) => pipeline.process(&text),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::marker::marker_row;
    use crate::model::Cell;

    fn row(texts: &[&str]) -> Row {
        Row::new(texts.iter().map(|t| Cell::with_text(*t)).collect())
    }

    fn table(rows: &[&[&str]]) -> Section {
        let mut all = vec![marker_row()];
        all.extend(rows.iter().map(|r| row(r)));
        Section::new(all)
    }

    fn options() -> RenderOptions {
        RenderOptions::new().with_table_border("----")
    }

    fn render(tree: &DocumentTree, options: &RenderOptions) -> Result<Vec<String>> {
        paragraphs(tree, options).map(|p| p.map(|p| p.text)).collect()
    }

    #[test]
    fn test_simple_table_records() {
        let tree = DocumentTree::from_sections(vec![table(&[&["A", "B"], &["1", "2"], &["3", "4"]])]);
        let out = render(&tree, &options()).unwrap();
        assert_eq!(
            out,
            vec!["----\nA: 1\nB: 2\n----", "----\nA: 3\nB: 4\n----"]
        );
    }

    #[test]
    fn test_combined_headers_record() {
        let tree = DocumentTree::from_sections(vec![table(&[
            &["CAT", "CAT"],
            &["A", "B"],
            &["1", "2"],
        ])]);
        let out = render(&tree, &options()).unwrap();
        assert_eq!(out, vec!["----\nCAT _ A: 1\nCAT _ B: 2\n----"]);
    }

    #[test]
    fn test_plain_section_verbatim() {
        let tree = DocumentTree::from_sections(vec![Section::new(vec![
            row(&["first", "second"]),
            row(&["", "  third  "]),
        ])]);
        let out = render(&tree, &options()).unwrap();
        assert_eq!(out, vec!["first", "second", "", "  third  "]);
    }

    #[test]
    fn test_layout_table_falls_back_to_plain() {
        let layout = DocumentTree::from_sections(vec![table(&[&["Logo", "Address"]])]);
        let plain = DocumentTree::from_sections(vec![Section::new(vec![row(&["Logo", "Address"])])]);

        assert_eq!(
            render(&layout, &options()).unwrap(),
            render(&plain, &options()).unwrap()
        );

        let marker_only = DocumentTree::from_sections(vec![table(&[])]);
        assert!(render(&marker_only, &options()).unwrap().is_empty());
    }

    #[test]
    fn test_record_pairs_shorter_length() {
        let tree = DocumentTree::from_sections(vec![table(&[
            &["A", "B", "C"],
            &["1", "2"],
            &["1", "2", "3", "4"],
        ])]);
        let items: Vec<OutputParagraph> = paragraphs(&tree, &options())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(items[0].fields().len(), 2);
        assert_eq!(items[1].fields().len(), 3);
        assert_eq!(items[1].text, "----\nA: 1\nB: 2\nC: 3\n----");
    }

    #[test]
    fn test_multi_paragraph_cells_use_line_break() {
        let data = Row::new(vec![
            Cell::new(vec![
                Paragraph::with_text("12 Main St"),
                Paragraph::with_text("Springfield"),
            ]),
        ]);
        let tree = DocumentTree::from_sections(vec![Section::new(vec![
            marker_row(),
            row(&["Address"]),
            data,
        ])]);
        let out = render(&tree, &options()).unwrap();
        assert_eq!(out, vec!["----\nAddress: 12 Main St<br>Springfield\n----"]);
    }

    #[test]
    fn test_sections_keep_document_order() {
        let tree = DocumentTree::from_sections(vec![
            Section::plain(vec![Paragraph::with_text("Intro")]),
            table(&[&["K"], &["v"]]),
            Section::plain(vec![Paragraph::with_text("Outro")]),
        ]);
        let items: Vec<OutputParagraph> = paragraphs(&tree, &options())
            .collect::<Result<_>>()
            .unwrap();
        let sections: Vec<usize> = items.iter().map(|p| p.section).collect();
        assert_eq!(sections, vec![0, 1, 2]);
        assert!(!items[0].is_record());
        assert!(items[1].is_record());
        assert_eq!(items[2].text, "Outro");
    }

    #[test]
    fn test_unresolvable_headers_fail_and_fuse() {
        let tree = DocumentTree::from_sections(vec![
            Section::plain(vec![Paragraph::with_text("before")]),
            table(&[&["X", "X"], &["Y", "Y"]]),
            Section::plain(vec![Paragraph::with_text("after")]),
        ]);

        let opts = options();
        let mut iter = paragraphs(&tree, &opts);
        assert_eq!(iter.next().unwrap().unwrap().text, "before");
        assert!(matches!(
            iter.next(),
            Some(Err(Error::NonUniqueHeaders { section: 1 }))
        ));
        assert!(iter.next().is_none());

        assert!(render(&tree, &options()).is_err());
    }

    #[test]
    fn test_skip_malformed_tables() {
        let tree = DocumentTree::from_sections(vec![
            table(&[&["X", "X"], &["Y", "Y"]]),
            Section::plain(vec![Paragraph::with_text("after")]),
        ]);
        let options = options().skip_malformed_tables();

        let mut iter = paragraphs(&tree, &options);
        let out: Vec<String> = iter.by_ref().map(|p| p.unwrap().text).collect();
        assert_eq!(out, vec!["after"]);
        assert_eq!(iter.stats().skipped_table_count, 1);
    }

    #[test]
    fn test_restart_by_recomputation() {
        let tree = DocumentTree::from_sections(vec![table(&[&["A"], &["1"]])]);
        let options = options();
        let first = render(&tree, &options).unwrap();
        let second = render(&tree, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stats() {
        let tree = DocumentTree::from_sections(vec![
            Section::plain(vec![Paragraph::with_text("one two")]),
            table(&[&["A"], &["1"], &["2"]]),
            table(&[&["only header"]]),
        ]);
        let options = options();
        let mut iter = paragraphs(&tree, &options);
        iter.by_ref().for_each(drop);
        let stats = iter.into_stats();

        assert_eq!(stats.section_count, 3);
        assert_eq!(stats.plain_section_count, 1);
        assert_eq!(stats.table_count, 2);
        assert_eq!(stats.layout_table_count, 1);
        assert_eq!(stats.record_count, 2);
        assert_eq!(stats.text_paragraph_count, 2);
    }

    #[test]
    fn test_cleanup_applies_to_fields() {
        let tree = DocumentTree::from_sections(vec![table(&[&["Name  "], &["a   b"]])]);
        let options = options().with_cleanup_preset(crate::render::CleanupPreset::Standard);
        let items: Vec<OutputParagraph> = paragraphs(&tree, &options)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(items[0].fields()[0].header, "Name");
        assert_eq!(items[0].text, "----\nName: a b\n----");
    }

    #[test]
    fn test_cleanup_keeps_headers_unique() {
        let tree = DocumentTree::from_sections(vec![table(&[&["Name", "Name "], &["a", "b"]])]);
        let options = options().with_cleanup_preset(crate::render::CleanupPreset::Standard);

        // The only row left after header folding is consumed by it
        let result: Result<Vec<OutputParagraph>> = paragraphs(&tree, &options).collect();
        assert!(matches!(result, Err(Error::NonUniqueHeaders { section: 0 })));

        let tree = DocumentTree::from_sections(vec![table(&[
            &["Name", "Name "],
            &["first", "last"],
            &["Ada", "Lovelace"],
        ])]);
        let items: Vec<OutputParagraph> = paragraphs(&tree, &options)
            .collect::<Result<_>>()
            .unwrap();
        let headers: Vec<&str> = items[0].fields().iter().map(|f| f.header.as_str()).collect();
        assert_eq!(headers, vec!["Name _ first", "Name _ last"]);
        assert_eq!(items[0].text, "----\nName _ first: Ada\nName _ last: Lovelace\n----");
    }

    #[test]
    fn test_json_shape() {
        let tree = DocumentTree::from_sections(vec![table(&[&["A"], &["1"]])]);
        let options = options();
        let item = paragraphs(&tree, &options).next().unwrap().unwrap();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["kind"], "record");
        assert_eq!(value["section"], 0);
        assert_eq!(value["fields"][0]["header"], "A");
        assert_eq!(value["fields"][0]["value"], "1");
    }
}
