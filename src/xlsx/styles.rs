//! XLSX styles parsing for highlight detection.
//!
//! A cell counts as highlighted when its cell-format entry (`cellXfs/xf`)
//! points at a fill whose foreground color looks yellow.

use super::xml::{self, Outline};
use crate::error::Result;
use crate::model::{CellFormat, FillInfo};
use quick_xml::events::Event;
use std::collections::BTreeSet;

/// Archive path of the styles member.
pub const STYLES_PART: &str = "xl/styles.xml";

/// Whether an ARGB hex string counts as yellow.
///
/// This is a substring heuristic, not a color-space test: the value must
/// contain `FFFF` or `FFE5`, or have `FFF` somewhere in its first four
/// characters. Matching is case-sensitive.
pub fn is_yellow_rgb(rgb: &str) -> bool {
    if rgb.is_empty() {
        return false;
    }
    let head: String = rgb.chars().take(4).collect();
    rgb.contains("FFFF") || rgb.contains("FFE5") || head.contains("FFF")
}

/// Fill and cell-format information parsed from xl/styles.xml.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    fills: Vec<FillInfo>,
    fill_count: usize,
    yellow_fills: BTreeSet<usize>,
    /// Cell formats: style index -> fillId
    cell_xfs: Vec<Option<usize>>,
    highlighted: BTreeSet<usize>,
}

impl StyleSheet {
    /// Parse styles from xl/styles.xml content.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut styles = Self::default();
        let mut reader = xml::reader(xml);
        let mut outline = Outline::default();
        let mut buf = Vec::new();

        let mut fills_depth: Option<usize> = None;
        let mut fill_depth: Option<usize> = None;
        let mut fill_color: Option<(Option<String>, Option<String>)> = None;
        let mut cell_xfs_depth: Option<usize> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let depth = outline.enter(STYLES_PART)?;
                    let (ns, local) = reader.resolve_element(e.name());
                    if fills_depth.is_none() && xml::is_main(&ns, local, b"fills") {
                        fills_depth = Some(depth);
                    } else if fills_depth.map(|d| d + 1) == Some(depth)
                        && xml::is_main(&ns, local, b"fill")
                    {
                        fill_depth = Some(depth);
                        fill_color = None;
                    } else if fill_depth.is_some()
                        && fill_color.is_none()
                        && xml::is_main(&ns, local, b"fgColor")
                    {
                        fill_color = Some((
                            xml::attr(STYLES_PART, &e, b"rgb")?,
                            xml::attr(STYLES_PART, &e, b"theme")?,
                        ));
                    } else if cell_xfs_depth.is_none() && xml::is_main(&ns, local, b"cellXfs") {
                        cell_xfs_depth = Some(depth);
                    } else if cell_xfs_depth.map(|d| d + 1) == Some(depth)
                        && xml::is_main(&ns, local, b"xf")
                    {
                        let fill_id = xml::index_attr(STYLES_PART, &e, b"fillId", 0)?;
                        styles.cell_xfs.push(fill_id);
                    }
                }
                Ok(Event::End(_)) => {
                    let closed = outline.leave();
                    if fill_depth == Some(closed) {
                        styles.push_fill(fill_color.take());
                        fill_depth = None;
                    } else if fills_depth == Some(closed) {
                        fills_depth = None;
                    } else if cell_xfs_depth == Some(closed) {
                        cell_xfs_depth = None;
                    }
                }
                Ok(Event::Text(e)) => outline.check_text(STYLES_PART, &e)?,
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml::parse_error(STYLES_PART, &reader, e)),
                _ => {}
            }
            buf.clear();
        }

        outline.finish(STYLES_PART)?;
        styles.classify_formats();
        log::debug!(
            "{} fills ({} yellow), {} cell formats ({} highlighted)",
            styles.fill_count,
            styles.yellow_fills.len(),
            styles.cell_xfs.len(),
            styles.highlighted.len()
        );
        Ok(styles)
    }

    fn push_fill(&mut self, color: Option<(Option<String>, Option<String>)>) {
        let id = self.fill_count;
        self.fill_count += 1;

        let Some((rgb, theme)) = color else {
            return;
        };
        let yellow = rgb.as_deref().is_some_and(is_yellow_rgb);
        if yellow {
            self.yellow_fills.insert(id);
        }
        self.fills.push(FillInfo {
            id,
            rgb,
            theme,
            yellow,
        });
    }

    fn classify_formats(&mut self) {
        self.highlighted = self
            .cell_xfs
            .iter()
            .enumerate()
            .filter(|(_, fill_id)| fill_id.is_some_and(|id| self.yellow_fills.contains(&id)))
            .map(|(style_id, _)| style_id)
            .collect();
    }

    /// Whether the fill at `fill_id` counts as yellow.
    pub fn is_yellow_fill(&self, fill_id: usize) -> bool {
        self.yellow_fills.contains(&fill_id)
    }

    /// Whether cells using `style_id` are highlighted.
    pub fn is_highlighted(&self, style_id: usize) -> bool {
        self.highlighted.contains(&style_id)
    }

    /// Get the fillId for a cell style index.
    pub fn fill_id(&self, style_id: usize) -> Option<usize> {
        self.cell_xfs.get(style_id).copied().flatten()
    }

    /// Fills that declare a foreground color, in fill-list order.
    pub fn fills(&self) -> &[FillInfo] {
        &self.fills
    }

    /// Cell formats that reference a yellow fill, in style order.
    pub fn highlighted_formats(&self) -> Vec<CellFormat> {
        self.highlighted
            .iter()
            .filter_map(|&style_id| {
                self.fill_id(style_id)
                    .map(|fill_id| CellFormat { style_id, fill_id })
            })
            .collect()
    }
}
