//! maven-metadata.xml version extraction.
//!
//! Uses the quick-xml pull reader and tracks the element path, collecting the
//! text of every `metadata/versioning/versions/version` element. Namespace
//! prefixes are ignored.

use crate::error::{MavenError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

const VERSION_PATH: [&str; 4] = ["metadata", "versioning", "versions", "version"];

/// Extracts the listed versions, trimmed, in document order.
///
/// Empty `<version/>` elements are skipped.
///
/// # Errors
///
/// Returns `MavenError::MetadataParse` for malformed XML, including
/// documents that end with unclosed elements. Versions read before the error
/// are discarded.
pub fn extract_versions(document: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(document);

    let mut path: Vec<String> = Vec::new();
    let mut text: Option<String> = None;
    let mut versions = Vec::new();
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| parse_error(&reader, &e.to_string()))?;

        match event {
            Event::Start(ref e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                if is_version_path(&path) {
                    text = Some(String::new());
                }
            }
            Event::Text(ref e) => {
                if let Some(ref mut acc) = text {
                    let raw = e
                        .decode()
                        .map_err(|err| parse_error(&reader, &err.to_string()))?;
                    let unescaped = quick_xml::escape::unescape(&raw)
                        .map_err(|err| parse_error(&reader, &err.to_string()))?;
                    acc.push_str(&unescaped);
                }
            }
            Event::CData(ref e) => {
                if let Some(ref mut acc) = text {
                    acc.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::GeneralRef(ref e) => {
                if let Some(ref mut acc) = text {
                    if let Some(ch) = e
                        .resolve_char_ref()
                        .map_err(|err| parse_error(&reader, &err.to_string()))?
                    {
                        acc.push(ch);
                    } else {
                        let name = e
                            .decode()
                            .map_err(|err| parse_error(&reader, &err.to_string()))?;
                        let resolved = quick_xml::escape::resolve_predefined_entity(&name)
                            .ok_or_else(|| {
                                parse_error(&reader, &format!("unknown entity &{name};"))
                            })?;
                        acc.push_str(resolved);
                    }
                }
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if path.last() != Some(&name) {
                    return Err(parse_error(
                        &reader,
                        &format!("unexpected closing tag </{name}>"),
                    ));
                }
                if is_version_path(&path)
                    && let Some(acc) = text.take()
                {
                    let version = acc.trim();
                    if version.is_empty() {
                        tracing::debug!("Skipping empty <version> element");
                    } else {
                        versions.push(version.to_string());
                    }
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = path.last() {
        return Err(parse_error(
            &reader,
            &format!("document ended inside <{open}>"),
        ));
    }

    Ok(versions)
}

fn is_version_path(path: &[String]) -> bool {
    path.len() == VERSION_PATH.len() && path.iter().zip(VERSION_PATH).all(|(a, b)| a == b)
}

fn parse_error<R>(reader: &Reader<R>, message: &str) -> MavenError {
    MavenError::MetadataParse {
        message: format!("{message} (at byte {})", reader.buffer_position()),
    }
}
