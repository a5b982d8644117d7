//! XLSX shared strings parsing.

use super::xml::{self, Outline};
use crate::container::Archive;
use crate::error::{Error, Result};
use quick_xml::events::Event;
use std::io::{Read, Seek};

/// Archive path of the shared string table.
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Shared strings table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    /// All strings in order
    strings: Vec<String>,
}

impl SharedStrings {
    /// Load the table from an archive.
    ///
    /// The member is optional: when it is absent or is not well-formed XML
    /// the table is empty and cells referencing it keep their raw index.
    pub fn load<R: Read + Seek>(archive: &Archive<R>) -> Self {
        let xml = match archive.read_xml(SHARED_STRINGS_PART) {
            Ok(xml) => xml,
            Err(e) if e.is_missing_member() => {
                log::debug!("{} not present, using an empty table", SHARED_STRINGS_PART);
                return Self::default();
            }
            Err(e) => {
                log::warn!("cannot read {}: {}", SHARED_STRINGS_PART, e);
                return Self::default();
            }
        };

        match Self::parse(&xml) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("ignoring shared strings: {}", e);
                Self::default()
            }
        }
    }

    /// Parse shared strings from XML content.
    ///
    /// Each `si` item contributes exactly one entry: the text of its first
    /// `t` element, or an empty string, so indices stay aligned.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = xml::reader(xml);
        let mut outline = Outline::default();
        let mut buf = Vec::new();

        let mut si_depth: Option<usize> = None;
        let mut t_depth: Option<usize> = None;
        let mut seen_t = false;
        let mut current_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let depth = outline.enter(SHARED_STRINGS_PART)?;
                    let (ns, local) = reader.resolve_element(e.name());
                    if si_depth.is_none() && xml::is_main(&ns, local, b"si") {
                        si_depth = Some(depth);
                        seen_t = false;
                        current_text.clear();
                    } else if si_depth.is_some() && !seen_t && xml::is_main(&ns, local, b"t") {
                        t_depth = Some(depth);
                        seen_t = true;
                    }
                }
                Ok(Event::Text(e)) => {
                    outline.check_text(SHARED_STRINGS_PART, &e)?;
                    if t_depth == Some(outline.depth()) {
                        current_text.push_str(&xml::text(SHARED_STRINGS_PART, &e)?);
                    }
                }
                Ok(Event::CData(e)) => {
                    if t_depth == Some(outline.depth()) {
                        current_text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::End(_)) => {
                    let closed = outline.leave();
                    if t_depth == Some(closed) {
                        t_depth = None;
                    } else if si_depth == Some(closed) {
                        strings.push(std::mem::take(&mut current_text));
                        si_depth = None;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml::parse_error(SHARED_STRINGS_PART, &reader, e)),
                _ => {}
            }
            buf.clear();
        }

        outline.finish(SHARED_STRINGS_PART)?;
        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Resolve a cell's raw shared-string index.
    pub fn resolve(&self, raw: &str) -> Result<&str> {
        let index: usize = raw
            .trim()
            .parse()
            .map_err(|_| Error::malformed(SHARED_STRINGS_PART, format!("bad index {:?}", raw)))?;
        self.get(index).ok_or_else(|| {
            Error::malformed(
                SHARED_STRINGS_PART,
                format!("index {} out of range ({} strings)", index, self.len()),
            )
        })
    }

    /// Get the count of shared strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl FromIterator<String> for SharedStrings {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().collect(),
        }
    }
}
