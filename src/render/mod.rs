//! Rendering module for converting document trees to text and JSON.

mod cleanup;
mod json;
mod options;
mod paragraphs;
mod result;
mod table;
mod text;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, JsonFormat};
pub use options::{
    MalformedTable, RenderOptions, DEFAULT_HEADER_SEPARATOR, DEFAULT_LINE_BREAK,
    DEFAULT_TABLE_BORDER,
};
pub use paragraphs::{paragraphs, Field, OutputParagraph, ParagraphKind, Paragraphs};
pub use result::{render_with_stats, ExtractionStats, RenderResult};
pub use table::{classify, combine_headers, HeaderSet, SectionKind};
pub use text::{to_text, write_text};
