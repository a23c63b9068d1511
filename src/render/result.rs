//! Rendering result with metadata and statistics.

use crate::error::Result;
use crate::model::{Document, Metadata};
use serde::{Deserialize, Serialize};

use super::{paragraphs, RenderOptions};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered text
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ExtractionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Sections visited
    pub section_count: u32,

    /// Sections rendered as plain content
    pub plain_section_count: u32,

    /// Sections opened by a table marker
    pub table_count: u32,

    /// Tables with at most one row, rendered as plain content
    pub layout_table_count: u32,

    /// Tables dropped because their headers never became unique
    pub skipped_table_count: u32,

    /// `header: value` records emitted
    pub record_count: u32,

    /// Plain text paragraphs emitted
    pub text_paragraph_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total output paragraphs.
    pub fn paragraph_count(&self) -> u32 {
        self.record_count + self.text_paragraph_count
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}

/// Render a document to text, collecting statistics on the way.
pub fn render_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut iter = paragraphs(&doc.tree, options);
    let texts = iter
        .by_ref()
        .map(|p| p.map(|p| p.text))
        .collect::<Result<Vec<_>>>()?;
    let stats = iter.into_stats();

    Ok(RenderResult::new(
        texts.join(&options.paragraph_separator),
        doc.metadata.clone(),
        stats,
    ))
}
