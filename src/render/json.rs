//! JSON rendering for Word documents.

use crate::error::{Error, Result};
use crate::model::Document;

use super::{paragraphs, OutputParagraph, RenderOptions};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to a JSON array of output paragraphs.
pub fn to_json(doc: &Document, options: &RenderOptions, format: JsonFormat) -> Result<String> {
    let items = paragraphs(&doc.tree, options).collect::<Result<Vec<OutputParagraph>>>()?;

    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&items),
        JsonFormat::Compact => serde_json::to_string(&items),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentTree, Metadata, Paragraph, Section};

    fn doc() -> Document {
        let tree = DocumentTree::from_sections(vec![Section::plain(vec![Paragraph::with_text(
            "Hello",
        )])]);
        Document::with_tree(tree, Metadata::default())
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&doc(), &RenderOptions::default(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"kind\": \"text\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&doc(), &RenderOptions::default(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"[{"section":0,"kind":"text","text":"Hello"}]"#);
    }
}
