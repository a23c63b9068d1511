//! Nested section tree consumed by the renderer.

use serde::{Deserialize, Serialize};

/// Ordered sequence of sections in document reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTree {
    /// Sections in reading order
    pub sections: Vec<Section>,
}

impl DocumentTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree from sections.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Append a section.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the tree has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over sections.
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }
}

impl<'a> IntoIterator for &'a DocumentTree {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// A table or a run of plain content, shaped identically until classified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Rows in the section
    pub rows: Vec<Row>,
}

impl Section {
    /// Create a section from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Wrap plain paragraphs as a single-row, single-cell section.
    pub fn plain(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            rows: vec![Row::new(vec![Cell::new(paragraphs)])],
        }
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cells in the row
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Join each cell's lines with `line_break`, one string per column.
    pub fn cell_texts(&self, line_break: &str) -> Vec<String> {
        self.cells.iter().map(|c| c.joined_text(line_break)).collect()
    }
}

/// A table cell holding paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Paragraphs in the cell
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    /// Create a cell from paragraphs.
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Create a cell with one paragraph of one run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![Paragraph::with_text(text)])
    }

    /// Paragraph texts joined with `line_break`.
    pub fn joined_text(&self, line_break: &str) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join(line_break)
    }
}

/// A paragraph made of text runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Run texts in order
    pub runs: Vec<String>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with a single run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![text.into()],
        }
    }

    /// Append a run.
    pub fn add_run(&mut self, text: impl Into<String>) {
        self.runs.push(text.into());
    }

    /// First run, if any.
    pub fn first_run(&self) -> Option<&str> {
        self.runs.first().map(String::as_str)
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_joins_runs() {
        let mut para = Paragraph::new();
        para.add_run("Hello, ");
        para.add_run("world");
        assert_eq!(para.text(), "Hello, world");
        assert_eq!(para.first_run(), Some("Hello, "));
    }

    #[test]
    fn test_cell_joined_text() {
        let cell = Cell::new(vec![
            Paragraph::with_text("line one"),
            Paragraph::with_text("line two"),
        ]);
        assert_eq!(cell.joined_text("<br>"), "line one<br>line two");
    }

    #[test]
    fn test_plain_section_paragraphs() {
        let section = Section::plain(vec![
            Paragraph::with_text("a"),
            Paragraph::new(),
            Paragraph::with_text("b"),
        ]);
        assert_eq!(section.rows.len(), 1);
        assert_eq!(section.rows[0].cells.len(), 1);
        assert_eq!(section.rows[0].cell_texts("|"), vec!["a||b"]);
    }
}
