//! XLSX scanner implementation.

use crate::container::Archive;
use crate::error::Result;
use crate::model::{ScanReport, SheetScan};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use super::options::ScanOptions;
use super::shared_strings::SharedStrings;
use super::sheet::{scan_sheet, worksheet_part};
use super::styles::{StyleSheet, STYLES_PART};
use super::workbook::{parse_workbook, WORKBOOK_PART};

/// Scanner for XLSX workbooks.
///
/// Holds the open archive for the duration of the scan; dropping the scanner
/// closes it.
pub struct XlsxScanner<R: Read + Seek = BufReader<File>> {
    archive: Archive<R>,
    options: ScanOptions,
}

impl XlsxScanner<BufReader<File>> {
    /// Open an XLSX file for scanning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_archive(Archive::open(path)?))
    }
}

impl XlsxScanner<Cursor<Vec<u8>>> {
    /// Create a scanner from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self::from_archive(Archive::from_bytes(data)?))
    }
}

impl<R: Read + Seek> XlsxScanner<R> {
    /// Create a scanner over an already opened archive.
    pub fn from_archive(archive: Archive<R>) -> Self {
        Self {
            archive,
            options: ScanOptions::default(),
        }
    }

    /// Replace the scan options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the scan.
    ///
    /// The workbook index and styles member must be present and well-formed;
    /// the shared string table is optional. Worksheets are probed as
    /// `sheet1.xml`, `sheet2.xml`, ... and the first missing number ends the
    /// scan.
    pub fn scan(&self) -> Result<ScanReport> {
        let mut report = ScanReport::new();

        report.sheets = parse_workbook(&self.archive.read_xml(WORKBOOK_PART)?)?;

        let shared_strings = SharedStrings::load(&self.archive);
        log::debug!("{} shared strings", shared_strings.len());

        let styles = StyleSheet::parse(&self.archive.read_xml(STYLES_PART)?)?;
        report.fills = styles.fills().to_vec();
        report.highlighted_formats = styles.highlighted_formats();

        for index in 1..=self.options.max_sheets {
            let member = worksheet_part(index);
            let xml = match self.archive.read_xml(&member) {
                Ok(xml) => xml,
                Err(e) if e.is_missing_member() => {
                    log::debug!("{} not present, worksheet scan ends", member);
                    break;
                }
                Err(e) => return Err(e),
            };

            let cells = scan_sheet(
                &member,
                &xml,
                &shared_strings,
                &styles,
                self.options.max_rows,
            )?;
            report.worksheets.push(SheetScan {
                index,
                member,
                cells,
            });
        }

        Ok(report)
    }

    /// Get a reference to the archive.
    pub fn archive(&self) -> &Archive<R> {
        &self.archive
    }

    /// Get the scan options.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }
}
