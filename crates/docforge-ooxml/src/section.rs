//! Body assembly and section properties
//!
//! A document body is the concatenation of its sections' content. Section
//! properties are placed asymmetrically: the first N-1 sections close with a
//! paragraph whose `w:pPr` holds their `w:sectPr`, while the last section's
//! `w:sectPr` is a direct child of `w:body`. An empty document still gets one
//! body-level `w:sectPr` with default page setup.

use docforge_model::{Element, HeaderFooterKind, Orientation, Section, SectionBreak};

use crate::body::{write_children, Scope};
use crate::context::{HdrFtrPart, PartBuffer, WriteContext};
use crate::error::Result;
use crate::notes::write_note_pr;
use crate::rels::RelKind;
use crate::styles::write_border_set;

/// Write every section's content and properties into the main document part
pub fn write_body(ctx: &mut WriteContext<'_>, part: &mut PartBuffer) -> Result<()> {
    let doc = ctx.doc;
    if doc.sections.is_empty() {
        let sect_pr = sect_pr_xml(ctx, part, &Section::default())?;
        part.xml.push_str(&sect_pr);
        return Ok(());
    }

    let last = doc.sections.len() - 1;
    for (position, section) in doc.sections.iter().enumerate() {
        write_children(ctx, part, &section.elements, Scope::default())?;
        let sect_pr = sect_pr_xml(ctx, part, section)?;
        if position == last {
            part.xml.push_str(&sect_pr);
        } else {
            // in-body break: a paragraph carrying only the section properties
            part.xml.push_str("<w:p><w:pPr>");
            part.xml.push_str(&sect_pr);
            part.xml.push_str("</w:pPr></w:p>");
        }
    }
    Ok(())
}

/// Render one section's `w:sectPr`
///
/// Header and footer parts are generated here, each with its own relationship
/// set, and their references registered in the main part's set.
pub fn sect_pr_xml(
    ctx: &mut WriteContext<'_>,
    main: &mut PartBuffer,
    section: &Section,
) -> Result<String> {
    let mut out = String::from("<w:sectPr>");

    // Word lists header references as even, default, first regardless of
    // the order they were attached in
    let mut headers: Vec<_> = section.headers.iter().collect();
    headers.sort_by_key(|entry| match entry.0 {
        HeaderFooterKind::Even => 0,
        HeaderFooterKind::Default => 1,
        HeaderFooterKind::First => 2,
    });
    for (kind, header) in headers {
        let filename = build_hdr_ftr(ctx, &header.elements, true)?;
        let rel_id = main.rels.register(RelKind::Header, &filename, false)?;
        out.push_str(&format!(
            r#"<w:headerReference w:type="{}" r:id="rId{}"/>"#,
            kind.as_str(),
            rel_id
        ));
    }
    if let Some(footer) = &section.footer {
        let filename = build_hdr_ftr(ctx, &footer.elements, false)?;
        let rel_id = main.rels.register(RelKind::Footer, &filename, false)?;
        out.push_str(&format!(
            r#"<w:footerReference w:type="default" r:id="rId{}"/>"#,
            rel_id
        ));
    }

    let settings = &section.settings;
    if let Some(props) = &settings.footnote_properties {
        write_note_pr(&mut out, "w:footnotePr", props, false);
    }
    if let Some(props) = &settings.endnote_properties {
        write_note_pr(&mut out, "w:endnotePr", props, false);
    }

    if settings.break_type != SectionBreak::NextPage {
        out.push_str(&format!(
            r#"<w:type w:val="{}"/>"#,
            settings.break_type.as_str()
        ));
    }

    out.push_str(&format!(
        r#"<w:pgSz w:w="{}" w:h="{}""#,
        settings.page_width, settings.page_height
    ));
    if settings.orientation == Orientation::Landscape {
        out.push_str(r#" w:orient="landscape""#);
    }
    out.push_str("/>");

    out.push_str(&format!(
        r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{}" w:footer="{}" w:gutter="{}"/>"#,
        settings.margins.top,
        settings.margins.right,
        settings.margins.bottom,
        settings.margins.left,
        settings.header_height,
        settings.footer_height,
        settings.gutter
    ));

    if let Some(page_borders) = &settings.page_borders {
        out.push_str(r#"<w:pgBorders w:offsetFrom="page">"#);
        write_border_set(&mut out, &page_borders.borders);
        out.push_str("</w:pgBorders>");
    }

    if let Some(start) = settings.page_number_start {
        out.push_str(&format!(r#"<w:pgNumType w:start="{}"/>"#, start));
    }

    out.push_str(&format!(r#"<w:cols w:space="{}""#, settings.column_spacing));
    if settings.column_count > 1 {
        out.push_str(&format!(r#" w:num="{}""#, settings.column_count));
    }
    out.push_str("/>");

    if settings.title_page {
        out.push_str("<w:titlePg/>");
    }

    out.push_str("</w:sectPr>");
    Ok(out)
}

/// Generate a header or footer part and return its file name under word/
///
/// The part starts a fresh relationship set counting from rId1, so media and
/// hyperlinks inside it never collide with the main part's ids.
fn build_hdr_ftr(
    ctx: &mut WriteContext<'_>,
    elements: &[Element],
    is_header: bool,
) -> Result<String> {
    let mut part = PartBuffer::new();
    write_children(ctx, &mut part, elements, Scope::default())?;

    let number = ctx
        .hdr_ftr_parts
        .iter()
        .filter(|p| p.is_header == is_header)
        .count()
        + 1;
    let filename = if is_header {
        format!("header{}.xml", number)
    } else {
        format!("footer{}.xml", number)
    };
    ctx.hdr_ftr_parts.push(HdrFtrPart {
        filename: filename.clone(),
        is_header,
        part,
    });
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docforge_model::{
        Document, HeaderFooter, HeaderFooterKind, NoteProperties, SectionSettings, Text,
    };

    fn body_of(doc: &Document) -> String {
        let mut ctx = WriteContext::new(doc);
        let mut part = PartBuffer::main_document();
        write_body(&mut ctx, &mut part).unwrap();
        part.xml
    }

    #[test]
    fn test_empty_document_gets_default_section() {
        let doc = Document::new();
        let xml = body_of(&doc);
        assert_eq!(xml.matches("<w:sectPr>").count(), 1);
        assert!(xml.starts_with("<w:sectPr>"));
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
    }

    #[test]
    fn test_single_section_sect_pr_is_body_level() {
        let mut doc = Document::new();
        doc.add_section(Section::new(vec![Element::Text(Text::new("only"))]));
        let xml = body_of(&doc);
        assert_eq!(xml.matches("<w:sectPr>").count(), 1);
        // not wrapped in a paragraph
        assert!(!xml.contains("<w:pPr><w:sectPr>"));
        assert!(xml.ends_with("</w:sectPr>"));
    }

    #[test]
    fn test_three_sections_two_in_body_breaks() {
        let mut doc = Document::new();
        for label in ["a", "b", "c"] {
            doc.add_section(Section::new(vec![Element::Text(Text::new(label))]));
        }
        let xml = body_of(&doc);
        assert_eq!(xml.matches("<w:sectPr>").count(), 3);
        assert_eq!(xml.matches("<w:p><w:pPr><w:sectPr>").count(), 2);
        assert!(xml.ends_with("</w:sectPr>"));
    }

    #[test]
    fn test_landscape_and_columns() {
        let mut doc = Document::new();
        let mut section = Section::new(vec![Element::Text(Text::new("wide"))]);
        section.settings = SectionSettings {
            column_count: 2,
            ..SectionSettings::default()
        }
        .landscape();
        doc.add_section(section);
        let xml = body_of(&doc);
        assert!(xml.contains(r#"<w:pgSz w:w="16838" w:h="11906" w:orient="landscape"/>"#));
        assert!(xml.contains(r#"<w:cols w:space="720" w:num="2"/>"#));
    }

    #[test]
    fn test_header_reference_and_part() {
        let mut doc = Document::new();
        let mut section = Section::new(vec![Element::Text(Text::new("body"))]);
        section.set_header(
            HeaderFooterKind::Default,
            HeaderFooter::new(vec![Element::Text(Text::new("running head"))]),
        );
        doc.add_section(section);

        let mut ctx = WriteContext::new(&doc);
        let mut part = PartBuffer::main_document();
        write_body(&mut ctx, &mut part).unwrap();

        // first dynamic main-part id
        assert!(part.xml.contains(r#"<w:headerReference w:type="default" r:id="rId7"/>"#));
        assert_eq!(ctx.hdr_ftr_parts.len(), 1);
        assert_eq!(ctx.hdr_ftr_parts[0].filename, "header1.xml");
        assert!(ctx.hdr_ftr_parts[0].is_header);
        assert!(ctx.hdr_ftr_parts[0].part.xml.contains("running head"));
    }

    #[test]
    fn test_header_references_emit_in_fixed_order() {
        let mut doc = Document::new();
        let mut section = Section::new(vec![Element::Text(Text::new("body"))]);
        // attached out of order on purpose
        section.set_header(
            HeaderFooterKind::First,
            HeaderFooter::new(vec![Element::Text(Text::new("opening"))]),
        );
        section.set_header(
            HeaderFooterKind::Default,
            HeaderFooter::new(vec![Element::Text(Text::new("running"))]),
        );
        section.set_header(
            HeaderFooterKind::Even,
            HeaderFooter::new(vec![Element::Text(Text::new("verso"))]),
        );
        doc.add_section(section);
        let xml = body_of(&doc);

        let even = xml.find(r#"<w:headerReference w:type="even""#).unwrap();
        let default = xml.find(r#"<w:headerReference w:type="default""#).unwrap();
        let first = xml.find(r#"<w:headerReference w:type="first""#).unwrap();
        assert!(even < default);
        assert!(default < first);
    }

    #[test]
    fn test_two_sections_two_footer_parts() {
        let mut doc = Document::new();
        for _ in 0..2 {
            let mut section = Section::new(vec![Element::Text(Text::new("x"))]);
            section.footer = Some(HeaderFooter::new(vec![Element::Text(Text::new("pg"))]));
            doc.add_section(section);
        }
        let mut ctx = WriteContext::new(&doc);
        let mut part = PartBuffer::main_document();
        write_body(&mut ctx, &mut part).unwrap();

        let filenames: Vec<_> = ctx.hdr_ftr_parts.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(filenames, vec!["footer1.xml", "footer2.xml"]);
    }

    #[test]
    fn test_section_note_properties_override() {
        let mut doc = Document::new();
        let mut section = Section::new(vec![Element::Text(Text::new("x"))]);
        section.settings.footnote_properties = Some(NoteProperties {
            restart: docforge_model::NoteRestart::EachPage,
            ..NoteProperties::footnote_default()
        });
        doc.add_section(section);
        let xml = body_of(&doc);
        assert!(xml.contains("<w:footnotePr>"));
        assert!(xml.contains(r#"<w:numRestart w:val="eachPage"/>"#));
        // plain sections carry no note properties block
        assert!(!xml.contains("<w:endnotePr>"));
    }

    #[test]
    fn test_title_page_and_page_number_start() {
        let mut doc = Document::new();
        let mut section = Section::new(vec![Element::Text(Text::new("x"))]);
        section.settings.title_page = true;
        section.settings.page_number_start = Some(5);
        doc.add_section(section);
        let xml = body_of(&doc);
        assert!(xml.contains("<w:titlePg/>"));
        assert!(xml.contains(r#"<w:pgNumType w:start="5"/>"#));
    }
}
