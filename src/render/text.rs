//! Plain text renderer implementation.

use crate::model::{ScanReport, SheetScan};
use std::fmt::Write;

/// Suffix appended to highlighted cells.
pub const HIGHLIGHT_MARKER: &str = " [YELLOW INPUT]";

/// Convert a scan report to labeled text sections.
pub fn to_text(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str("=== SHEETS ===\n");
    for sheet in &report.sheets {
        let _ = writeln!(
            output,
            "Sheet: {} (rId: {})",
            sheet.name,
            sheet.relationship_id.as_deref().unwrap_or_default()
        );
    }

    output.push_str("\n=== FILLS (looking for yellow) ===\n");
    for fill in &report.fills {
        let _ = writeln!(
            output,
            "Fill {}: rgb={}, theme={}",
            fill.id,
            fill.rgb.as_deref().unwrap_or_default(),
            fill.theme.as_deref().unwrap_or_default()
        );
        if fill.yellow {
            output.push_str("  -> YELLOW DETECTED\n");
        }
    }

    output.push_str("\n=== CELL FORMATS (with yellow fills) ===\n");
    for format in &report.highlighted_formats {
        let _ = writeln!(
            output,
            "Style {}: fillId={} -> YELLOW",
            format.style_id, format.fill_id
        );
    }

    for sheet in &report.worksheets {
        render_sheet(&mut output, sheet);
    }

    output
}

fn render_sheet(output: &mut String, sheet: &SheetScan) {
    let _ = writeln!(output, "\n=== SHEET {} DATA ===", sheet.index);
    for cell in &sheet.cells {
        let marker = if cell.highlighted { HIGHLIGHT_MARKER } else { "" };
        let _ = writeln!(output, "{}: {}{}", cell.reference, cell.value, marker);
    }
}
