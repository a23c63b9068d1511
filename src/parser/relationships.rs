//! Package relationships (`_rels/.rels`) reader.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;

const OFFICE_DOCUMENT: &str = "/officeDocument";

/// Find the archive path of the main document part.
///
/// Targets in the package relationships are relative to the package root;
/// a leading `/` is dropped so the result can be looked up in the archive.
pub(crate) fn main_part(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut kind = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.local_name().as_ref() {
                        b"Type" => kind = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(kind), Some(target)) = (kind, target) {
                    if kind.ends_with(OFFICE_DOCUMENT) {
                        return Ok(Some(target.trim_start_matches('/').to_string()));
                    }
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_part_from_relationship() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/word/document2.xml"/></Relationships>"#;
        assert_eq!(main_part(xml).unwrap().as_deref(), Some("word/document2.xml"));
    }

    #[test]
    fn test_no_office_document_relationship() {
        let xml = r#"<Relationships><Relationship Id="rId1" Type="urn:other" Target="x.xml"/></Relationships>"#;
        assert_eq!(main_part(xml).unwrap(), None);
    }
}
