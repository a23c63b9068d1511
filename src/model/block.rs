//! Loader output blocks.

use super::{Paragraph, Row};
use serde::{Deserialize, Serialize};

/// A top-level body element as read from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Block {
    /// A maximal run of body-level paragraphs
    Paragraphs(Vec<Paragraph>),
    /// A top-level table
    Table(Vec<Row>),
}
