//! Synthetic workbook builder for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Builds a minimal XLSX archive member by member.
#[derive(Default)]
pub struct WorkbookBuilder {
    sheets: Vec<String>,
    shared_strings: Option<Vec<Option<String>>>,
    fills: Vec<Option<String>>,
    cell_xfs: Vec<Option<usize>>,
    worksheets: Vec<(usize, String)>,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a sheet in the workbook index.
    pub fn sheet(mut self, name: &str) -> Self {
        self.sheets.push(name.to_string());
        self
    }

    /// Add shared string items; `None` is an item without a `t` element.
    pub fn shared_strings(mut self, items: &[Option<&str>]) -> Self {
        self.shared_strings = Some(items.iter().map(|s| s.map(str::to_string)).collect());
        self
    }

    /// Add a fill; `Some(rgb)` is a solid fill with that foreground color.
    pub fn fill(mut self, rgb: Option<&str>) -> Self {
        self.fills.push(rgb.map(str::to_string));
        self
    }

    /// Add a cell format; `None` omits the `fillId` attribute.
    pub fn cell_xf(mut self, fill_id: Option<usize>) -> Self {
        self.cell_xfs.push(fill_id);
        self
    }

    /// Add worksheet member `sheet{index}.xml` with the given `sheetData` content.
    pub fn worksheet(mut self, index: usize, rows: &str) -> Self {
        self.worksheets.push((index, rows.to_string()));
        self
    }

    fn workbook_xml(&self) -> String {
        let sheets: String = self
            .sheets
            .iter()
            .enumerate()
            .map(|(i, name)| {
                format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    name,
                    i + 1,
                    i + 1
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{MAIN_NS}" xmlns:r="{REL_NS}"><sheets>{sheets}</sheets></workbook>"#
        )
    }

    fn shared_strings_xml(items: &[Option<String>]) -> String {
        let count = items.len();
        let items: String = items
            .iter()
            .map(|item| match item {
                Some(text) => format!("<si><t>{}</t></si>", text),
                None => "<si/>".to_string(),
            })
            .collect();
        format!(r#"<sst xmlns="{MAIN_NS}" uniqueCount="{count}">{items}</sst>"#)
    }

    fn styles_xml(&self) -> String {
        let fills: String = self
            .fills
            .iter()
            .map(|fill| match fill {
                Some(rgb) => format!(
                    r#"<fill><patternFill patternType="solid"><fgColor rgb="{}"/></patternFill></fill>"#,
                    rgb
                ),
                None => r#"<fill><patternFill patternType="none"/></fill>"#.to_string(),
            })
            .collect();
        let xfs: String = self
            .cell_xfs
            .iter()
            .map(|xf| match xf {
                Some(id) => format!(r#"<xf numFmtId="0" fillId="{}"/>"#, id),
                None => r#"<xf numFmtId="0"/>"#.to_string(),
            })
            .collect();
        format!(
            r#"<styleSheet xmlns="{MAIN_NS}"><fills>{fills}</fills><cellXfs>{xfs}</cellXfs></styleSheet>"#
        )
    }

    /// Produce the archive bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut members = vec![
            ("xl/workbook.xml".to_string(), self.workbook_xml()),
            ("xl/styles.xml".to_string(), self.styles_xml()),
        ];
        if let Some(items) = &self.shared_strings {
            members.push((
                "xl/sharedStrings.xml".to_string(),
                Self::shared_strings_xml(items),
            ));
        }
        for (index, rows) in &self.worksheets {
            members.push((
                format!("xl/worksheets/sheet{}.xml", index),
                format!(r#"<worksheet xmlns="{MAIN_NS}"><sheetData>{rows}</sheetData></worksheet>"#),
            ));
        }
        build_archive(&members)
    }
}

/// Zip the given members into an archive, uncompressed.
pub fn build_archive(members: &[(String, String)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in members {
        zip.start_file(name.as_str(), options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Rewrite the compression method recorded for `member`, in its local header
/// and its central directory entry.
pub fn set_compression_method(data: &mut [u8], member: &str, method: u16) {
    let name = member.as_bytes();
    let method = method.to_le_bytes();
    let mut i = 0;
    while i + 46 <= data.len() {
        let (name_at, method_at) = match &data[i..i + 4] {
            b"PK\x03\x04" => (i + 30, i + 8),
            b"PK\x01\x02" => (i + 46, i + 10),
            _ => {
                i += 1;
                continue;
            }
        };
        if data.get(name_at..name_at + name.len()) == Some(name) {
            data[method_at..method_at + 2].copy_from_slice(&method);
        }
        i += 1;
    }
}
