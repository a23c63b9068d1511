//! Document-level types.

use super::DocumentTree;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed Word document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, creator, etc.)
    pub metadata: Metadata,

    /// Body content with table markers injected
    pub tree: DocumentTree,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a tree and metadata.
    pub fn with_tree(tree: DocumentTree, metadata: Metadata) -> Self {
        Self { metadata, tree }
    }

    /// Number of top-level sections.
    pub fn section_count(&self) -> usize {
        self.tree.len()
    }

    /// Check if the document has no body content.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

/// Core document properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Document author
    pub creator: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Description / comments
    pub description: Option<String>,

    /// Last editor
    pub last_modified_by: Option<String>,

    /// Revision number as stored
    pub revision: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// Whether the main part is macro-enabled (.docm)
    pub macro_enabled: bool,
}

impl Metadata {
    /// Check if no property was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subject.is_none()
            && self.creator.is_none()
            && self.keywords.is_none()
            && self.description.is_none()
            && self.last_modified_by.is_none()
            && self.revision.is_none()
            && self.created.is_none()
            && self.modified.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.section_count(), 0);
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn test_metadata_not_empty() {
        let metadata = Metadata {
            title: Some("Quarterly figures".to_string()),
            ..Default::default()
        };
        assert!(!metadata.is_empty());
    }
}
