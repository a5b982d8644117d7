//! Namespace-aware XML helpers shared by the workbook member parsers.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, BytesText};
use quick_xml::name::{LocalName, Namespace, ResolveResult};
use quick_xml::NsReader;

/// SpreadsheetML main namespace.
pub(crate) const MAIN_NS: &[u8] = b"http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// Office document relationships namespace.
pub(crate) const REL_NS: &[u8] =
    b"http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Create a reader with empty elements expanded into start/end pairs.
pub(crate) fn reader(xml: &str) -> NsReader<&[u8]> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;
    reader
}

/// Whether a resolved element name is `name` in the main namespace.
pub(crate) fn is_main(ns: &ResolveResult, local: LocalName, name: &[u8]) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == MAIN_NS) && local.as_ref() == name
}

/// Read an unprefixed attribute, unescaped.
pub(crate) fn attr(part: &str, e: &BytesStart, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::malformed(part, err.to_string()))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::malformed(part, err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Read an integer index attribute, falling back to `default` when absent.
///
/// Integers that cannot index anything (negative, or wider than `usize`)
/// read as `None`; text that is not an integer is malformed.
pub(crate) fn index_attr(
    part: &str,
    e: &BytesStart,
    key: &[u8],
    default: usize,
) -> Result<Option<usize>> {
    let Some(value) = attr(part, e, key)? else {
        return Ok(Some(default));
    };
    parse_index(&value).ok_or_else(|| {
        Error::malformed(
            part,
            format!(
                "attribute {}=\"{}\" is not a number",
                String::from_utf8_lossy(key),
                value
            ),
        )
    })
}

/// `None` when `value` is not an integer, `Some(None)` when it is one that
/// no index can equal.
fn parse_index(value: &str) -> Option<Option<usize>> {
    let value = value.trim();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        return Some(None);
    }
    Some(digits.parse().ok())
}

/// Unescape a text node.
pub(crate) fn text(part: &str, e: &BytesText) -> Result<String> {
    e.unescape()
        .map(|t| t.into_owned())
        .map_err(|err| Error::malformed(part, err.to_string()))
}

/// Convert a reader error into a malformed document error for `part`.
pub(crate) fn parse_error(part: &str, reader: &NsReader<&[u8]>, err: quick_xml::Error) -> Error {
    Error::malformed(
        part,
        format!("{} at position {}", err, reader.buffer_position()),
    )
}

/// Tracks element depth so that the parsers can reject input that is not a
/// single well-formed XML tree.
#[derive(Debug, Default)]
pub(crate) struct Outline {
    depth: usize,
    saw_root: bool,
}

impl Outline {
    /// Current nesting depth; the root element is depth 1.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Record a start tag and return its depth.
    pub(crate) fn enter(&mut self, part: &str) -> Result<usize> {
        if self.depth == 0 && self.saw_root {
            return Err(Error::malformed(part, "content after the root element"));
        }
        self.saw_root = true;
        self.depth += 1;
        Ok(self.depth)
    }

    /// Record an end tag and return the depth of the closed element.
    pub(crate) fn leave(&mut self) -> usize {
        let closed = self.depth;
        self.depth = closed.saturating_sub(1);
        closed
    }

    /// Reject non-whitespace text outside the root element.
    pub(crate) fn check_text(&self, part: &str, raw: &[u8]) -> Result<()> {
        if self.depth == 0 && !raw.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::malformed(part, "text outside the root element"));
        }
        Ok(())
    }

    /// Validate the document once the reader reports end of input.
    pub(crate) fn finish(&self, part: &str) -> Result<()> {
        if !self.saw_root {
            return Err(Error::malformed(part, "no root element"));
        }
        if self.depth > 0 {
            return Err(Error::malformed(part, "unexpected end of document"));
        }
        Ok(())
    }
}
