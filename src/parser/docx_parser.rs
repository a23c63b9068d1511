//! DOCX document parser using zip and quick-xml.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::marker;
use crate::model::{Block, Document, Metadata};

use super::body::read_body;
use super::core_props::read_core_properties;
use super::options::{ErrorMode, ParseOptions};
use super::relationships::main_part;

const DOCUMENT_PART: &str = "word/document.xml";
const RELS_PART: &str = "_rels/.rels";
const CORE_PART: &str = "docProps/core.xml";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// DOCX document parser.
///
/// The parts needed for extraction are read out of the archive when the
/// parser is created, so no file handle outlives the constructor.
pub struct DocxParser {
    document_xml: String,
    core_xml: Option<String>,
    content_types: Option<String>,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a ZIP container
        detect_format_from_path(path)?;

        let file = File::open(path)?;
        let parser = Self::from_archive(ZipArchive::new(BufReader::new(file))?, options)?;
        log::debug!("Loaded {}", path.display());
        Ok(parser)
    }

    /// Parse a DOCX from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;
        Self::from_archive(ZipArchive::new(Cursor::new(data))?, options)
    }

    /// Parse a DOCX from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a DOCX from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    fn from_archive<R: Read + Seek>(mut archive: ZipArchive<R>, options: ParseOptions) -> Result<Self> {
        let document_part = resolve_main_part(&mut archive, &options)?;
        let document_xml = read_part(&mut archive, &document_part)?
            .ok_or(Error::MissingPart(document_part))?;
        let core_xml = read_part(&mut archive, CORE_PART)?;
        let content_types = read_part(&mut archive, CONTENT_TYPES_PART)?;

        Ok(Self {
            document_xml,
            core_xml,
            content_types,
            options,
        })
    }

    /// Read the body blocks without injecting table markers.
    pub fn blocks(&self) -> Result<Vec<Block>> {
        read_body(&self.document_xml, &self.options)
    }

    /// Parse the document and return a structured Document.
    pub fn parse(&self) -> Result<Document> {
        let blocks = self.blocks()?;
        log::debug!("Read {} body blocks", blocks.len());

        let tree = marker::inject(blocks);
        let metadata = self.metadata()?;

        Ok(Document::with_tree(tree, metadata))
    }

    /// Read document metadata.
    pub fn metadata(&self) -> Result<Metadata> {
        let mut metadata = match self.core_xml.as_deref() {
            Some(xml) => match read_core_properties(xml) {
                Ok(metadata) => metadata,
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Ignoring unreadable core properties: {}", e);
                    Metadata::default()
                }
                Err(e) => return Err(e),
            },
            None => Metadata::default(),
        };

        metadata.macro_enabled = self
            .content_types
            .as_deref()
            .is_some_and(|types| types.contains("document.macroEnabled"));

        Ok(metadata)
    }
}

/// Archive path of the main document part.
///
/// Falls back to `word/document.xml` when the package relationships are
/// absent or name no main part.
fn resolve_main_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    options: &ParseOptions,
) -> Result<String> {
    let Some(rels) = read_part(archive, RELS_PART)? else {
        return Ok(DOCUMENT_PART.to_string());
    };

    match main_part(&rels) {
        Ok(Some(part)) => {
            log::debug!("Main document part: {}", part);
            Ok(part)
        }
        Ok(None) => Ok(DOCUMENT_PART.to_string()),
        Err(e) if options.error_mode == ErrorMode::Lenient => {
            log::warn!("Ignoring unreadable package relationships: {}", e);
            Ok(DOCUMENT_PART.to_string())
        }
        Err(e) => Err(e),
    }
}

/// Read a part as UTF-8, `None` when the archive does not contain it.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut data = Vec::new();
    file.read_to_end(&mut data)?;

    let text = String::from_utf8(data)
        .map_err(|e| Error::Encoding(format!("{} is not valid UTF-8: {}", name, e)))?;
    // Parts may start with a byte order mark.
    Ok(Some(text.trim_start_matches('\u{feff}').to_string()))
}
