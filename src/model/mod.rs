//! Scan result model.
//!
//! Parsers fill these structures from the workbook members; renderers turn a
//! finished [`ScanReport`] into text or JSON.

mod cell;
mod report;
mod style;

pub use cell::*;
pub use report::*;
pub use style::*;
