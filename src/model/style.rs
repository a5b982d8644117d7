//! Style model structures.

use serde::{Deserialize, Serialize};

/// A fill with a foreground color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillInfo {
    /// Position in the fill list
    pub id: usize,
    /// `rgb` attribute of the foreground color (ARGB hex)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
    /// `theme` attribute of the foreground color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Whether the fill counts as yellow
    pub yellow: bool,
}

/// A cell-format entry that references a yellow fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFormat {
    /// Position in the cell-format list; cells refer to it through `s`
    pub style_id: usize,
    /// Referenced fill id
    pub fill_id: usize,
}
