//! DOCX parsing module.

mod body;
mod core_props;
mod docx_parser;
mod options;
mod relationships;

pub use docx_parser::DocxParser;
pub use options::{ErrorMode, ParseOptions};
