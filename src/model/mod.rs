//! Document model types for Word document content.
//!
//! The loader produces [`Block`]s in reading order. The marker pass turns
//! them into a uniform [`DocumentTree`], in which every section is a plain
//! `rows -> cells -> paragraphs -> runs` nesting and only a sentinel row
//! tells real tables apart from ordinary paragraph content.

mod block;
mod document;
mod tree;

pub use block::Block;
pub use document::{Document, Metadata};
pub use tree::{Cell, DocumentTree, Paragraph, Row, Section};
