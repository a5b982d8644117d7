//! # xlspot
//!
//! Extract cell values and yellow-highlighted input cells from XLSX
//! workbooks.
//!
//! The workbook is read straight from its ZIP archive: sheet names from the
//! workbook index, text from the shared string table, fill colors from the
//! styles member, and cell values from the numbered worksheets. A cell is
//! reported as highlighted when its format references a fill whose
//! foreground color looks yellow.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xlspot::{scan_file, render};
//!
//! let report = scan_file("form.xlsx")?;
//! println!("Sheets: {:?}", report.sheet_names());
//! println!("Highlighted cells: {}", report.highlighted_count());
//!
//! print!("{}", render::to_text(&report));
//! # Ok::<(), xlspot::Error>(())
//! ```
//!
//! ## Scan Options
//!
//! ```no_run
//! use xlspot::xlsx::{ScanOptions, XlsxScanner};
//!
//! let report = XlsxScanner::open("form.xlsx")?
//!     .with_options(ScanOptions::new().with_max_rows(500))
//!     .scan()?;
//! # Ok::<(), xlspot::Error>(())
//! ```

pub mod container;
pub mod error;
pub mod model;
pub mod render;
pub mod xlsx;

// Re-exports
pub use container::Archive;
pub use error::{Error, Result};
pub use model::{
    Cell, CellFormat, CellKind, FillInfo, ScanReport, ScannedCell, SheetDescriptor, SheetScan,
};
pub use xlsx::{ScanOptions, XlsxScanner};

use std::path::Path;

/// Scan a workbook file with default options.
///
/// # Example
///
/// ```no_run
/// use xlspot::scan_file;
///
/// let report = scan_file("form.xlsx")?;
/// println!("Worksheets: {}", report.worksheets.len());
/// # Ok::<(), xlspot::Error>(())
/// ```
pub fn scan_file(path: impl AsRef<Path>) -> Result<ScanReport> {
    XlsxScanner::open(path)?.scan()
}

/// Scan a workbook file with the given options.
pub fn scan_file_with_options(path: impl AsRef<Path>, options: ScanOptions) -> Result<ScanReport> {
    XlsxScanner::open(path)?.with_options(options).scan()
}

/// Scan a workbook held in memory.
///
/// # Example
///
/// ```no_run
/// use xlspot::scan_bytes;
///
/// let data = std::fs::read("form.xlsx")?;
/// let report = scan_bytes(&data)?;
/// # Ok::<(), xlspot::Error>(())
/// ```
pub fn scan_bytes(data: &[u8]) -> Result<ScanReport> {
    XlsxScanner::from_bytes(data.to_vec())?.scan()
}
