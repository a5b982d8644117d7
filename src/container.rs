//! ZIP container abstraction for XLSX workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// An opened XLSX archive.
///
/// The archive owns its underlying reader; for [`Archive::open`] that is the
/// file handle, which is closed when the `Archive` is dropped.
pub struct Archive<R: Read + Seek = BufReader<File>> {
    archive: RefCell<zip::ZipArchive<R>>,
    source: String,
}

/// Decode member bytes into text.
///
/// Members are UTF-8 in practice. A UTF-8 BOM is skipped, and UTF-16 members
/// marked with a BOM are transcoded, with the XML declaration rewritten so the
/// XML reader does not try to decode the text a second time.
pub fn decode_xml_bytes(bytes: &[u8]) -> String {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        [0xFF, 0xFE, rest @ ..] => {
            let units = rest.chunks_exact(2).map(|p| u16::from_le_bytes([p[0], p[1]]));
            declare_utf8(String::from_utf16_lossy(&units.collect::<Vec<_>>()))
        }
        [0xFE, 0xFF, rest @ ..] => {
            let units = rest.chunks_exact(2).map(|p| u16::from_be_bytes([p[0], p[1]]));
            declare_utf8(String::from_utf16_lossy(&units.collect::<Vec<_>>()))
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn declare_utf8(content: String) -> String {
    if !content.starts_with("<?xml") {
        return content;
    }
    match content.find("?>") {
        Some(end) => {
            let decl = content[..end].replace("UTF-16", "UTF-8").replace("utf-16", "UTF-8");
            format!("{}{}", decl, &content[end..])
        }
        None => content,
    }
}

impl Archive<BufReader<File>> {
    /// Open an XLSX archive from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use xlspot::container::Archive;
    ///
    /// let archive = Archive::open("workbook.xlsx")?;
    /// assert!(archive.exists("xl/workbook.xml"));
    /// # Ok::<(), xlspot::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::ArchiveNotFound {
            path: source.clone(),
            reason: e.to_string(),
        })?;
        Self::with_source(BufReader::new(file), source)
    }
}

impl Archive<Cursor<Vec<u8>>> {
    /// Create an archive over an in-memory buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::with_source(Cursor::new(data), "<memory>".to_string())
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Create an archive from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::with_source(reader, "<reader>".to_string())
    }

    fn with_source(reader: R, source: String) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader).map_err(|e| Error::ArchiveNotFound {
            path: source.clone(),
            reason: e.to_string(),
        })?;
        log::debug!("opened archive {} ({} members)", source, archive.len());
        Ok(Self {
            archive: RefCell::new(archive),
            source,
        })
    }

    /// Where this archive was opened from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Read a member's raw bytes.
    ///
    /// An absent member is [`Error::MemberNotFound`]; a member that is present
    /// but cannot be decompressed is [`Error::MalformedDocument`] for that
    /// member.
    pub fn read_member(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive.by_name(name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::MemberNotFound(name.to_string()),
            other => Error::malformed(name, other.to_string()),
        })?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| Error::malformed(name, e.to_string()))?;
        Ok(data)
    }

    /// Read a member as XML text.
    pub fn read_xml(&self, name: &str) -> Result<String> {
        let bytes = self.read_member(name)?;
        Ok(decode_xml_bytes(&bytes))
    }

    /// Check if a member exists in the archive.
    pub fn exists(&self, name: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == name);
        found
    }

    /// List all member names.
    pub fn member_names(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }
}

impl<R: Read + Seek> std::fmt::Debug for Archive<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("source", &self.source)
            .field("members", &self.archive.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn build(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in members {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_member() {
        let data = build(&[("xl/workbook.xml", b"<workbook/>")]);
        let archive = Archive::from_bytes(data).unwrap();

        assert!(archive.exists("xl/workbook.xml"));
        assert!(!archive.exists("xl/styles.xml"));
        assert_eq!(archive.read_member("xl/workbook.xml").unwrap(), b"<workbook/>");
        assert_eq!(archive.member_names(), vec!["xl/workbook.xml".to_string()]);
    }

    #[test]
    fn test_missing_member() {
        let data = build(&[("xl/workbook.xml", b"<workbook/>")]);
        let archive = Archive::from_bytes(data).unwrap();

        let err = archive.read_member("xl/sharedStrings.xml").unwrap_err();
        assert!(matches!(err, Error::MemberNotFound(ref name) if name == "xl/sharedStrings.xml"));
    }

    /// Rewrite the compression method of every member, in both the local
    /// headers and the central directory.
    fn set_compression_method(data: &mut [u8], method: u16) {
        let method = method.to_le_bytes();
        for i in 0..data.len().saturating_sub(12) {
            let signature: [u8; 4] = [data[i], data[i + 1], data[i + 2], data[i + 3]];
            match &signature {
                b"PK\x03\x04" => data[i + 8..i + 10].copy_from_slice(&method),
                b"PK\x01\x02" => data[i + 10..i + 12].copy_from_slice(&method),
                _ => {}
            }
        }
    }

    #[test]
    fn test_undecodable_member_names_member() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file("xl/workbook.xml", stored).unwrap();
        zip.write_all(b"<workbook/>").unwrap();
        let mut data = zip.finish().unwrap().into_inner();
        set_compression_method(&mut data, 0x00FE);

        let archive = Archive::from_bytes(data).unwrap();
        assert!(archive.exists("xl/workbook.xml"));
        let err = archive.read_member("xl/workbook.xml").unwrap_err();
        assert!(!err.is_missing_member());
        assert!(matches!(err, Error::MalformedDocument { ref part, .. } if part == "xl/workbook.xml"));
        assert!(err.to_string().contains("xl/workbook.xml"));
    }

    #[test]
    fn test_from_reader_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        std::fs::write(&path, build(&[("xl/styles.xml", b"<styleSheet/>")])).unwrap();

        let archive = Archive::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(archive.source(), "<reader>");
        assert_eq!(archive.read_xml("xl/styles.xml").unwrap(), "<styleSheet/>");

        let archive = Archive::open(&path).unwrap();
        assert_eq!(archive.source(), path.display().to_string());
    }

    #[test]
    fn test_not_an_archive() {
        let err = Archive::from_bytes(b"definitely not a zip file".to_vec()).unwrap_err();
        assert!(matches!(err, Error::ArchiveNotFound { .. }));
    }

    #[test]
    fn test_open_missing_path() {
        let err = Archive::open("no/such/workbook.xlsx").unwrap_err();
        match err {
            Error::ArchiveNotFound { path, .. } => assert!(path.ends_with("workbook.xlsx")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        std::fs::write(&path, build(&[("xl/styles.xml", b"<styleSheet/>")])).unwrap();

        let archive = Archive::open(&path).unwrap();
        assert_eq!(archive.read_xml("xl/styles.xml").unwrap(), "<styleSheet/>");
    }

    #[test]
    fn test_decode_xml_bytes() {
        assert_eq!(decode_xml_bytes(b"\xEF\xBB\xBF<a/>"), "<a/>");
        assert_eq!(decode_xml_bytes(b"<a/>"), "<a/>");
        assert_eq!(decode_xml_bytes(b"\xFF\xFE<\0a\0/\0>\0"), "<a/>");
        assert_eq!(decode_xml_bytes(b"\xFE\xFF\0<\0a\0/\0>"), "<a/>");

        let utf16: Vec<u8> = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><a/>"
            .encode_utf16()
            .flat_map(|u| u.to_le_bytes())
            .collect();
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(utf16);
        assert_eq!(
            decode_xml_bytes(&bytes),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>"
        );
    }
}
