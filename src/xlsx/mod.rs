//! XLSX (Excel) workbook scanning.
//!
//! The scan reads the workbook members directly from the archive:
//! the workbook index for sheet names, the shared string table, the styles
//! member for yellow fills, and the numbered worksheets for cell values.
//!
//! # Example
//!
//! ```no_run
//! use xlspot::xlsx::XlsxScanner;
//!
//! let report = XlsxScanner::open("form.xlsx")?.scan()?;
//!
//! for sheet in &report.worksheets {
//!     for cell in sheet.highlighted() {
//!         println!("{}: {}", cell.reference, cell.value);
//!     }
//! }
//! # Ok::<(), xlspot::Error>(())
//! ```

mod options;
mod parser;
mod shared_strings;
mod sheet;
mod styles;
mod workbook;
mod xml;

pub use options::{ScanOptions, DEFAULT_MAX_ROWS, DEFAULT_MAX_SHEETS};
pub use parser::XlsxScanner;
pub use shared_strings::{SharedStrings, SHARED_STRINGS_PART};
pub use sheet::{read_cells, resolve_value, scan_sheet, worksheet_part};
pub use styles::{is_yellow_rgb, StyleSheet, STYLES_PART};
pub use workbook::{parse_workbook, WORKBOOK_PART};
