//! Cell model structures.

use serde::{Deserialize, Serialize};

/// How a cell's `v` text is to be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// `t="s"`: the value is an index into the shared string table.
    SharedString,
    /// `t="inlineStr"`: the text lives in the cell's `is` element.
    InlineString,
    /// Numbers, booleans, formula strings and anything else stored directly.
    #[default]
    Direct,
}

impl CellKind {
    /// Map a cell's `t` attribute to its kind.
    pub fn from_type_attr(t: Option<&str>) -> Self {
        match t {
            Some("s") => CellKind::SharedString,
            Some("inlineStr") => CellKind::InlineString,
            _ => CellKind::Direct,
        }
    }
}

/// A cell as read from a worksheet, before value resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Cell reference, e.g. `B7`
    pub reference: String,
    /// Index into the cell-format list (`s` attribute); `None` when the
    /// attribute holds an integer that cannot be an index
    pub style_id: Option<usize>,
    /// Raw text of the value element, if any
    pub raw_value: Option<String>,
    /// Value interpretation
    pub kind: CellKind,
}

/// A reported cell: resolved value plus highlight status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedCell {
    /// Cell reference, e.g. `B7`
    pub reference: String,
    /// Resolved display value
    pub value: String,
    /// Whether the cell's format uses a yellow fill
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub highlighted: bool,
}
