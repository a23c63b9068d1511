//! # untable
//!
//! Text extraction for Word documents that keeps tables readable.
//!
//! Ordinary paragraphs come out as they are. Each data row of a table
//! comes out as a bordered block of `header: value` lines, with stacked
//! header rows combined until every column has a unique header.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untable::{parse_file, render};
//!
//! fn main() -> untable::Result<()> {
//!     let doc = parse_file("report.docx")?;
//!
//!     let options = render::RenderOptions::default();
//!     let text = render::to_text(&doc, &options)?;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **parser**: reads `word/document.xml` into paragraph and table blocks
//! - **marker**: turns blocks into a uniform tree, opening every table
//!   with a sentinel row
//! - **render**: walks the tree lazily and yields output paragraphs

pub mod detect;
pub mod error;
pub mod marker;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocxFormat};
pub use error::{Error, Result};
pub use marker::TABLE_MARKER;
pub use model::{Block, Cell, Document, DocumentTree, Metadata, Paragraph, Row, Section};
pub use parser::{DocxParser, ErrorMode, ParseOptions};
pub use render::{
    CleanupOptions, CleanupPreset, ExtractionStats, Field, JsonFormat, MalformedTable,
    OutputParagraph, ParagraphKind, RenderOptions, RenderResult,
};

use std::io::Read;
use std::path::Path;

/// Parse a DOCX file and return a structured document.
///
/// # Example
///
/// ```no_run
/// use untable::parse_file;
///
/// let doc = parse_file("report.docx").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = DocxParser::open(path)?;
    parser.parse()
}

/// Parse a DOCX file with custom options.
///
/// # Example
///
/// ```no_run
/// use untable::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient();
/// let doc = parse_file_with_options("report.docx", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a DOCX from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = DocxParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a DOCX from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a DOCX from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = DocxParser::from_reader(reader)?;
    parser.parse()
}

/// Extract text from a DOCX file with default options.
///
/// Paragraphs are separated by a blank line.
///
/// # Example
///
/// ```no_run
/// use untable::extract_text;
///
/// let text = extract_text("report.docx").unwrap();
/// std::fs::write("report.txt", text).unwrap();
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, &RenderOptions::default())
}

/// Extract output paragraphs from a DOCX file with default options.
pub fn extract_paragraphs<P: AsRef<Path>>(path: P) -> Result<Vec<OutputParagraph>> {
    let doc = parse_file(path)?;
    let options = RenderOptions::default();
    render::paragraphs(&doc.tree, &options).collect()
}

/// Builder for parsing and rendering Word documents.
///
/// # Example
///
/// ```no_run
/// use untable::Untable;
///
/// let text = Untable::new()
///     .with_table_border("----")
///     .skip_malformed_tables()
///     .parse("report.docx")?
///     .to_text()?;
/// # Ok::<(), untable::Error>(())
/// ```
pub struct Untable {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Untable {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the record border line.
    pub fn with_table_border(mut self, border: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_table_border(border);
        self
    }

    /// Skip tables whose headers cannot be made unique.
    pub fn skip_malformed_tables(mut self) -> Self {
        self.render_options = self.render_options.skip_malformed_tables();
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Parse a DOCX file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UntableResult> {
        let parser = DocxParser::open_with_options(path, self.parse_options)?;
        Ok(UntableResult {
            document: parser.parse()?,
            render_options: self.render_options,
        })
    }

    /// Parse a DOCX from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UntableResult> {
        let parser = DocxParser::from_bytes_with_options(data, self.parse_options)?;
        Ok(UntableResult {
            document: parser.parse()?,
            render_options: self.render_options,
        })
    }
}

impl Default for Untable {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a Word document.
pub struct UntableResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UntableResult {
    /// Render to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Render to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, &self.render_options, format)
    }

    /// Iterate output paragraphs lazily.
    pub fn paragraphs(&self) -> render::Paragraphs<'_> {
        render::paragraphs(&self.document.tree, &self.render_options)
    }

    /// Render to text and collect statistics.
    pub fn stats(&self) -> Result<ExtractionStats> {
        render::render_with_stats(&self.document, &self.render_options).map(|r| r.stats)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untable_builder() {
        let builder = Untable::new()
            .lenient()
            .with_table_border("----")
            .skip_malformed_tables()
            .with_cleanup(CleanupPreset::Minimal);

        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert_eq!(builder.render_options.table_border, "----");
        assert_eq!(
            builder.render_options.on_malformed_table,
            MalformedTable::Skip
        );
        assert!(builder.render_options.cleanup.is_some());
    }

    #[test]
    fn test_untable_builder_default() {
        let builder = Untable::default();
        assert!(builder.parse_options.duplicate_merged_cells);
        assert_eq!(builder.render_options.on_malformed_table, MalformedTable::Fail);
    }

    #[test]
    fn test_parse_bytes_empty_data() {
        let result = parse_bytes(&[]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_truncated_zip() {
        // Valid magic, no archive behind it
        let result = parse_bytes(b"PK\x03\x04\x00\x00");
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_parse_invalid_bytes() {
        let result = Untable::new().parse_bytes(b"not a docx");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_file("definitely/not/here.docx");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
