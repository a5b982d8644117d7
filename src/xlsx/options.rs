//! Scan options configuration.

/// Rows read per worksheet unless configured otherwise.
pub const DEFAULT_MAX_ROWS: usize = 100;

/// Numbered worksheet members probed unless configured otherwise.
pub const DEFAULT_MAX_SHEETS: usize = 9;

/// Options controlling how much of a workbook is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Only the first `max_rows` row elements of each worksheet are read
    pub max_rows: usize,

    /// Worksheet members `sheet1.xml` through `sheet{max_sheets}.xml` are probed
    pub max_sheets: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            max_sheets: DEFAULT_MAX_SHEETS,
        }
    }
}

impl ScanOptions {
    /// Create default scan options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-worksheet row limit.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Set how many numbered worksheet members are probed.
    pub fn with_max_sheets(mut self, max_sheets: usize) -> Self {
        self.max_sheets = max_sheets;
        self
    }
}
