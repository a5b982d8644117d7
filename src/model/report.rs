//! Report model structures.

use super::{CellFormat, FillInfo, ScannedCell};
use serde::{Deserialize, Serialize};

/// A sheet declared in the workbook index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// Sheet name as shown on the tab
    pub name: String,
    /// Relationship id (`r:id`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_id: Option<String>,
}

/// The reported cells of one worksheet member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetScan {
    /// 1-based worksheet number (`sheetN.xml`)
    pub index: usize,
    /// Archive path of the worksheet member
    pub member: String,
    /// Reported cells in document order
    pub cells: Vec<ScannedCell>,
}

impl SheetScan {
    /// Cells with a yellow fill.
    pub fn highlighted(&self) -> impl Iterator<Item = &ScannedCell> {
        self.cells.iter().filter(|c| c.highlighted)
    }
}

/// Everything a single scan of a workbook produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Declared sheets, in workbook order
    pub sheets: Vec<SheetDescriptor>,
    /// Fills with a foreground color, in fill-list order
    pub fills: Vec<FillInfo>,
    /// Cell formats that reference a yellow fill
    pub highlighted_formats: Vec<CellFormat>,
    /// Scanned worksheet members, in numeric order
    pub worksheets: Vec<SheetScan>,
}

impl ScanReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared sheet names.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Total number of highlighted cells across all scanned worksheets.
    pub fn highlighted_count(&self) -> usize {
        self.worksheets.iter().map(|w| w.highlighted().count()).sum()
    }
}
