//! Output rendering for scan reports.
//!
//! # Example
//!
//! ```no_run
//! use xlspot::{scan_file, render::*};
//!
//! let report = scan_file("form.xlsx")?;
//!
//! // Labeled text sections
//! print!("{}", to_text(&report));
//!
//! // JSON
//! let json = to_json(&report, JsonFormat::Pretty)?;
//! # Ok::<(), xlspot::Error>(())
//! ```

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{to_text, HIGHLIGHT_MARKER};
