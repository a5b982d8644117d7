//! Workbook index (`xl/workbook.xml`) parsing.

use super::xml::{self, Outline, REL_NS};
use crate::error::{Error, Result};
use crate::model::SheetDescriptor;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

/// Archive path of the workbook index.
pub const WORKBOOK_PART: &str = "xl/workbook.xml";

/// List the sheets declared in the workbook index, in document order.
pub fn parse_workbook(xml: &str) -> Result<Vec<SheetDescriptor>> {
    let mut sheets = Vec::new();
    let mut reader = xml::reader(xml);
    let mut outline = Outline::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                outline.enter(WORKBOOK_PART)?;
                let (ns, local) = reader.resolve_element(e.name());
                if xml::is_main(&ns, local, b"sheet") {
                    sheets.push(read_sheet(&reader, &e)?);
                }
            }
            Ok(Event::End(_)) => {
                outline.leave();
            }
            Ok(Event::Text(e)) => outline.check_text(WORKBOOK_PART, &e)?,
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml::parse_error(WORKBOOK_PART, &reader, e)),
            _ => {}
        }
        buf.clear();
    }

    outline.finish(WORKBOOK_PART)?;
    log::debug!("workbook declares {} sheets", sheets.len());
    Ok(sheets)
}

/// Read one `sheet` element. The relationship id is matched by namespace,
/// whatever prefix the document binds to it.
fn read_sheet(reader: &NsReader<&[u8]>, e: &BytesStart) -> Result<SheetDescriptor> {
    let name = xml::attr(WORKBOOK_PART, e, b"name")?.unwrap_or_default();
    let mut relationship_id = None;
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::malformed(WORKBOOK_PART, err.to_string()))?;
        let (ns, local) = reader.resolve_attribute(attr.key);
        let is_rel = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == REL_NS);
        if is_rel && local.as_ref() == b"id" {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::malformed(WORKBOOK_PART, err.to_string()))?;
            relationship_id = Some(value.into_owned());
        }
    }

    Ok(SheetDescriptor {
        name,
        relationship_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheets_in_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <bookViews><workbookView/></bookViews>
  <sheets>
    <sheet name="Formulaire" sheetId="1" r:id="rId1"/>
    <sheet name="Budget &amp; plan" sheetId="2" r:id="rId2"/>
    <sheet name="Annexe" sheetId="5" r:id="rId7"/>
  </sheets>
</workbook>"#;

        let sheets = parse_workbook(xml).unwrap();
        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Formulaire", "Budget & plan", "Annexe"]);
        assert_eq!(sheets[2].relationship_id.as_deref(), Some("rId7"));
    }

    #[test]
    fn test_relationship_prefix_is_resolved() {
        // Any prefix bound to the relationships namespace works; an `r:id`
        // bound elsewhere does not.
        let xml = r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:rel="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
          xmlns:r="urn:other">
  <sheets>
    <sheet name="One" rel:id="rId1"/>
    <sheet name="Two" r:id="rId2"/>
  </sheets>
</workbook>"#;

        let sheets = parse_workbook(xml).unwrap();
        assert_eq!(sheets[0].relationship_id.as_deref(), Some("rId1"));
        assert_eq!(sheets[1].relationship_id, None);
    }

    #[test]
    fn test_ignores_sheet_outside_namespace() {
        let xml = r#"<workbook xmlns="urn:not-spreadsheetml"><sheets><sheet name="X"/></sheets></workbook>"#;
        assert!(parse_workbook(xml).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_workbook() {
        let err = parse_workbook("<workbook><sheets></workbook>").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { ref part, .. } if part == WORKBOOK_PART));
    }
}
