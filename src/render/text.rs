//! Plain text rendering for Word documents.

use std::io::Write;

use crate::error::Result;
use crate::model::Document;

use super::{paragraphs, RenderOptions};

/// Convert a document to plain text.
///
/// Output paragraphs are joined by the configured paragraph separator.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let texts = paragraphs(&doc.tree, options)
        .map(|p| p.map(|p| p.text))
        .collect::<Result<Vec<_>>>()?;

    Ok(texts.join(&options.paragraph_separator))
}

/// Stream plain text to a writer, one paragraph at a time.
///
/// On error, paragraphs rendered before the failing table have already
/// been written.
pub fn write_text<W: Write>(doc: &Document, options: &RenderOptions, mut writer: W) -> Result<()> {
    for (i, paragraph) in paragraphs(&doc.tree, options).enumerate() {
        let paragraph = paragraph?;
        if i > 0 {
            writer.write_all(options.paragraph_separator.as_bytes())?;
        }
        writer.write_all(paragraph.text.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
