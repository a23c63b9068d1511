//! Section classification and header combination.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::marker;
use crate::model::{Row, Section};

use super::{CleanupPipeline, RenderOptions};

/// How a section is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Opens with a marker row
    Table,
    /// Ordinary paragraph content
    Plain,
}

/// Classify a section by its first row.
///
/// Any missing nesting level (no rows, no cells, no paragraphs, no runs)
/// classifies as [`SectionKind::Plain`].
pub fn classify(section: &Section) -> SectionKind {
    match section.rows.first() {
        Some(row) if marker::is_marker_row(row) => SectionKind::Table,
        _ => SectionKind::Plain,
    }
}

/// Unique per-column headers and the number of rows they used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    /// One header per column
    pub headers: Vec<String>,
    /// Leading rows folded into the headers
    pub rows_consumed: usize,
}

/// Build unique headers from the leading rows of a table.
///
/// `rows` excludes the marker row. The first row gives one header per
/// column; while two columns share a header, the next row is folded in
/// column by column as `header{separator}cell`. Columns beyond the shorter
/// of the two rows are dropped. Running out of rows first is an error.
///
/// With a cleanup pipeline, cells are cleaned before uniqueness is checked,
/// so the headers returned are exactly the ones that will be printed.
pub fn combine_headers(
    section: usize,
    rows: &[Row],
    options: &RenderOptions,
    cleanup: Option<&CleanupPipeline>,
) -> Result<HeaderSet> {
    let Some(first) = rows.first() else {
        return Ok(HeaderSet {
            headers: Vec::new(),
            rows_consumed: 0,
        });
    };

    let mut headers = cell_texts(first, options, cleanup);
    let mut rows_consumed = 1;

    while !all_unique(&headers) {
        let next = rows
            .get(rows_consumed)
            .ok_or(Error::NonUniqueHeaders { section })?;

        headers = headers
            .iter()
            .zip(cell_texts(next, options, cleanup))
            .map(|(header, cell)| format!("{}{}{}", header, options.header_separator, cell))
            .collect();
        rows_consumed += 1;
    }

    if rows_consumed > 1 {
        log::debug!(
            "Section {}: combined {} header rows into {} columns",
            section,
            rows_consumed,
            headers.len()
        );
    }

    Ok(HeaderSet {
        headers,
        rows_consumed,
    })
}

/// Per-column cell text, cleaned when a pipeline is given.
pub(crate) fn cell_texts(
    row: &Row,
    options: &RenderOptions,
    cleanup: Option<&CleanupPipeline>,
) -> Vec<String> {
    let texts = row.cell_texts(&options.line_break);
    match cleanup {
        Some(pipeline) => texts.iter().map(|t| pipeline.process(t)).collect(),
        None => texts,
    }
}

fn all_unique(headers: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(headers.len());
    headers.iter().all(|h| seen.insert(h.as_str()))
}
