//! The numbering part
//!
//! One abstract definition plus one concrete instance per numbering style
//! actually used, in first-use order. A list item naming a style with no
//! definition in the registry still gets a minimal single-level decimal
//! definition, so its `w:numId` never dangles.

use docforge_model::{NumberFormat, NumberingLevel, NumberingStyle};

use crate::context::WriteContext;
use crate::xml::{escape_xml, NS_WORDML, XML_DECLARATION};

/// Render `word/numbering.xml`
///
/// The part is emitted even when no list was used; the fixed main-part
/// relationship to it must always resolve.
pub fn numbering_part_xml(ctx: &WriteContext<'_>) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:numbering xmlns:w="{}">"#, NS_WORDML));

    // all abstract definitions come before any instance
    for (num_id, style_name) in &ctx.numbering {
        let abstract_id = *num_id;
        xml.push_str(&format!(r#"<w:abstractNum w:abstractNumId="{}">"#, abstract_id));
        match ctx.doc.styles.numbering(style_name) {
            Some(style) => write_levels(&mut xml, style),
            None => write_fallback_level(&mut xml),
        }
        xml.push_str("</w:abstractNum>");
    }
    for (num_id, _) in &ctx.numbering {
        xml.push_str(&format!(
            r#"<w:num w:numId="{0}"><w:abstractNumId w:val="{0}"/></w:num>"#,
            num_id
        ));
    }

    xml.push_str("</w:numbering>");
    xml
}

fn write_levels(xml: &mut String, style: &NumberingStyle) {
    for (depth, level) in style
        .levels
        .iter()
        .take(NumberingStyle::MAX_LEVELS)
        .enumerate()
    {
        write_level(xml, depth as u8, level);
    }
}

fn write_level(xml: &mut String, depth: u8, level: &NumberingLevel) {
    xml.push_str(&format!(r#"<w:lvl w:ilvl="{}">"#, depth));
    xml.push_str(&format!(r#"<w:start w:val="{}"/>"#, level.start));
    xml.push_str(&format!(
        r#"<w:numFmt w:val="{}"/>"#,
        level.format.as_str()
    ));
    if let Some(para_style) = &level.paragraph_style {
        xml.push_str(&format!(
            r#"<w:pStyle w:val="{}"/>"#,
            escape_xml(para_style)
        ));
    }
    xml.push_str(&format!(
        r#"<w:lvlText w:val="{}"/>"#,
        escape_xml(&level.text)
    ));
    xml.push_str(r#"<w:lvlJc w:val="start"/>"#);
    if level.indent.is_some() || level.hanging.is_some() {
        xml.push_str("<w:pPr><w:ind");
        if let Some(indent) = level.indent {
            xml.push_str(&format!(r#" w:start="{}""#, indent));
        }
        if let Some(hanging) = level.hanging {
            xml.push_str(&format!(r#" w:hanging="{}""#, hanging));
        }
        xml.push_str("/></w:pPr>");
    }
    xml.push_str("</w:lvl>");
}

fn write_fallback_level(xml: &mut String) {
    write_level(
        xml,
        0,
        &NumberingLevel {
            format: NumberFormat::Decimal,
            text: "%1.".to_string(),
            start: 1,
            indent: Some(720),
            hanging: Some(360),
            paragraph_style: None,
        },
    );
}
