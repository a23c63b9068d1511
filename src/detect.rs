//! DOCX container detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// DOCX container information.
///
/// Whether the document is macro-enabled is only known once the parser
/// reads `[Content_Types].xml`; see [`crate::Metadata::macro_enabled`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Container kind (always "zip" for OOXML documents)
    pub container: &'static str,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DOCX ({})", self.container)
    }
}

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect DOCX container format from a file path.
///
/// # Arguments
/// * `path` - Path to the document
///
/// # Returns
/// * `Ok(DocxFormat)` if the file starts like a ZIP container
/// * `Err(Error::UnknownFormat)` otherwise
///
/// # Example
/// ```no_run
/// use untable::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 4];
    match reader.read_exact(&mut header) {
        Ok(()) => detect_format_from_bytes(&header),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(Error::UnknownFormat),
        Err(e) => Err(e.into()),
    }
}

/// Detect DOCX container format from bytes.
///
/// Only the container magic is checked here; whether the archive really
/// holds a word-processing document is decided when the parser looks for
/// `word/document.xml`.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if data.len() < ZIP_MAGIC.len() || !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    Ok(DocxFormat { container: "zip" })
}

/// Check if a file looks like a DOCX container.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like a DOCX container.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
