//! Error types for untable library.

use std::io;
use thiserror::Error;

/// Result type alias for untable operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as a Word document.
    #[error("Unknown file format: not a valid DOCX container")]
    UnknownFormat,

    /// Error reading the ZIP container.
    #[error("Archive error: {0}")]
    Archive(String),

    /// A required part is missing from the container.
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// Error parsing document XML.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// Header rows of a table never became unique per column.
    #[error("Cannot produce unique header per column (section {section})")]
    NonUniqueHeaders {
        /// Index of the offending section in the document tree
        section: usize,
    },

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Encoding error.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => Error::MissingPart(err.to_string()),
            _ => Error::Archive(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}
