//! Worksheet scanning.

use super::shared_strings::SharedStrings;
use super::styles::StyleSheet;
use super::xml::{self, Outline};
use crate::error::Result;
use crate::model::{Cell, CellKind, ScannedCell};
use quick_xml::events::Event;

/// Archive path of the `index`-th worksheet (1-based).
pub fn worksheet_part(index: usize) -> String {
    format!("xl/worksheets/sheet{}.xml", index)
}

/// Which text node of a cell is being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Value,
    Inline,
}

/// Read the cells of one worksheet, limited to its first `max_rows` rows.
pub fn read_cells(part: &str, xml: &str, max_rows: usize) -> Result<Vec<Cell>> {
    let mut cells = Vec::new();
    let mut reader = xml::reader(xml);
    let mut outline = Outline::default();
    let mut buf = Vec::new();

    let mut rows_seen = 0usize;
    let mut row_depth: Option<usize> = None;
    let mut cell_depth: Option<usize> = None;
    let mut is_depth: Option<usize> = None;
    let mut capture: Option<(Capture, usize)> = None;
    let mut current = Cell::default();
    let mut seen_value = false;
    let mut inline_text: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let depth = outline.enter(part)?;
                let (ns, local) = reader.resolve_element(e.name());
                if row_depth.is_none() && xml::is_main(&ns, local, b"row") {
                    rows_seen += 1;
                    if rows_seen <= max_rows {
                        row_depth = Some(depth);
                    }
                } else if row_depth.is_some()
                    && cell_depth.is_none()
                    && xml::is_main(&ns, local, b"c")
                {
                    cell_depth = Some(depth);
                    seen_value = false;
                    inline_text = None;
                    current = Cell {
                        reference: xml::attr(part, &e, b"r")?.unwrap_or_default(),
                        style_id: xml::index_attr(part, &e, b"s", 0)?,
                        raw_value: None,
                        kind: CellKind::from_type_attr(xml::attr(part, &e, b"t")?.as_deref()),
                    };
                } else if cell_depth.is_some() && !seen_value && xml::is_main(&ns, local, b"v") {
                    seen_value = true;
                    current.raw_value = Some(String::new());
                    capture = Some((Capture::Value, depth));
                } else if cell_depth.is_some() && is_depth.is_none() && xml::is_main(&ns, local, b"is") {
                    is_depth = Some(depth);
                } else if is_depth.is_some()
                    && inline_text.is_none()
                    && capture.is_none()
                    && xml::is_main(&ns, local, b"t")
                {
                    inline_text = Some(String::new());
                    capture = Some((Capture::Inline, depth));
                }
            }
            Ok(Event::Text(e)) => {
                outline.check_text(part, &e)?;
                if let Some((target, depth)) = capture {
                    if depth == outline.depth() {
                        let text = xml::text(part, &e)?;
                        push_text(&mut current, &mut inline_text, target, &text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some((target, depth)) = capture {
                    if depth == outline.depth() {
                        let text = String::from_utf8_lossy(&e);
                        push_text(&mut current, &mut inline_text, target, &text);
                    }
                }
            }
            Ok(Event::End(_)) => {
                let closed = outline.leave();
                if capture.is_some_and(|(_, depth)| depth == closed) {
                    capture = None;
                } else if is_depth == Some(closed) {
                    is_depth = None;
                } else if cell_depth == Some(closed) {
                    let mut cell = std::mem::take(&mut current);
                    if cell.raw_value.is_none() && cell.kind == CellKind::InlineString {
                        cell.raw_value = inline_text.take();
                    }
                    cells.push(cell);
                    cell_depth = None;
                } else if row_depth == Some(closed) {
                    row_depth = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml::parse_error(part, &reader, e)),
            _ => {}
        }
        buf.clear();
    }

    outline.finish(part)?;
    if rows_seen > max_rows {
        log::debug!("{}: {} rows, only the first {} scanned", part, rows_seen, max_rows);
    }
    Ok(cells)
}

fn push_text(cell: &mut Cell, inline: &mut Option<String>, target: Capture, text: &str) {
    let slot = match target {
        Capture::Value => cell.raw_value.as_mut(),
        Capture::Inline => inline.as_mut(),
    };
    if let Some(slot) = slot {
        slot.push_str(text);
    }
}

/// Resolve a cell's display value.
///
/// Shared-string cells whose index cannot be resolved keep their raw text.
pub fn resolve_value(cell: &Cell, shared_strings: &SharedStrings) -> String {
    let raw = cell.raw_value.as_deref().unwrap_or_default();
    match cell.kind {
        CellKind::SharedString => match shared_strings.resolve(raw) {
            Ok(value) => value.to_string(),
            Err(e) => {
                log::debug!("{}: keeping raw value ({})", cell.reference, e);
                raw.to_string()
            }
        },
        CellKind::InlineString | CellKind::Direct => raw.to_string(),
    }
}

/// Scan one worksheet: resolve values and highlight status, keeping cells
/// that are highlighted or have a non-empty value.
pub fn scan_sheet(
    part: &str,
    xml: &str,
    shared_strings: &SharedStrings,
    styles: &StyleSheet,
    max_rows: usize,
) -> Result<Vec<ScannedCell>> {
    let cells = read_cells(part, xml, max_rows)?;
    let scanned = cells
        .into_iter()
        .filter_map(|cell| {
            let value = resolve_value(&cell, shared_strings);
            let highlighted = cell.style_id.is_some_and(|id| styles.is_highlighted(id));
            (highlighted || !value.is_empty()).then(|| ScannedCell {
                reference: cell.reference,
                value,
                highlighted,
            })
        })
        .collect();
    Ok(scanned)
}
