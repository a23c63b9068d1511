//! Core properties (`docProps/core.xml`) reader.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;
use crate::model::Metadata;

/// Read core properties into metadata.
pub(crate) fn read_core_properties(xml: &str) -> Result<Metadata> {
    let mut reader = Reader::from_str(xml);
    let mut metadata = Metadata::default();
    let mut current: Option<Vec<u8>> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                current = Some(e.local_name().as_ref().to_vec());
                text.clear();
            }
            Event::Text(t) => {
                if current.is_some() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::End(_) => {
                if let Some(name) = current.take() {
                    apply(&mut metadata, &name, text.trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(metadata)
}

fn apply(metadata: &mut Metadata, name: &[u8], value: &str) {
    if value.is_empty() {
        return;
    }
    let owned = || Some(value.to_string());
    match name {
        b"title" => metadata.title = owned(),
        b"subject" => metadata.subject = owned(),
        b"creator" => metadata.creator = owned(),
        b"keywords" => metadata.keywords = owned(),
        b"description" => metadata.description = owned(),
        b"lastModifiedBy" => metadata.last_modified_by = owned(),
        b"revision" => metadata.revision = owned(),
        b"created" => metadata.created = parse_date(value),
        b"modified" => metadata.modified = parse_date(value),
        _ => {}
    }
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(e) => {
            log::debug!("Ignoring unparsable date {:?}: {}", value, e);
            None
        }
    }
}
