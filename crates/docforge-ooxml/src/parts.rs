//! Fixed package parts
//!
//! Everything here is either fully static or a direct projection of document
//! settings and metadata: the content-types manifest, the package-root
//! relationships, docProps, settings, webSettings, fontTable, and the theme.
//! The six parts the main document's reserved relationship ids point at are
//! always emitted, even when empty, so those ids never dangle.

use std::collections::BTreeSet;

use docforge_model::{Document, DocumentMeta};

use crate::context::WriteContext;
use crate::error::Result;
use crate::notes::write_note_pr;
use crate::rels::{RelKind, RelationshipSet};
use crate::xml::{escape_xml, NS_WORDML, XML_DECLARATION};

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// MIME type for a media file extension (already lowercased)
fn media_content_type(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "wmf" => "image/x-wmf",
        "emf" => "image/x-emf",
        "bin" => "application/vnd.openxmlformats-officedocument.oleObject",
        _ => "application/octet-stream",
    }
}

/// Render `[Content_Types].xml`
///
/// Extension defaults cover rels, xml, and every media extension staged
/// during the write; overrides cover each XML part individually.
pub fn content_types_xml(
    ctx: &WriteContext<'_>,
    footnotes: bool,
    endnotes: bool,
    comments: bool,
) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<Types xmlns="{}">"#, CONTENT_TYPES_NS));
    xml.push('\n');

    xml.push_str(
        r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push('\n');
    xml.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push('\n');

    let extensions: BTreeSet<&str> = ctx.media.iter().map(|m| m.extension.as_str()).collect();
    for extension in extensions {
        xml.push_str(&format!(
            r#"  <Default Extension="{}" ContentType="{}"/>"#,
            escape_xml(extension),
            media_content_type(extension)
        ));
        xml.push('\n');
    }

    let mut push_override = |part: &str, content_type: &str| {
        xml.push_str(&format!(
            r#"  <Override PartName="{}" ContentType="{}"/>"#,
            part, content_type
        ));
        xml.push('\n');
    };

    const WORDML: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";
    push_override("/word/document.xml", &format!("{}.document.main+xml", WORDML));
    push_override("/word/styles.xml", &format!("{}.styles+xml", WORDML));
    push_override("/word/numbering.xml", &format!("{}.numbering+xml", WORDML));
    push_override("/word/settings.xml", &format!("{}.settings+xml", WORDML));
    push_override(
        "/word/webSettings.xml",
        &format!("{}.webSettings+xml", WORDML),
    );
    push_override("/word/fontTable.xml", &format!("{}.fontTable+xml", WORDML));
    push_override(
        "/word/theme/theme1.xml",
        "application/vnd.openxmlformats-officedocument.theme+xml",
    );
    push_override(
        "/docProps/core.xml",
        "application/vnd.openxmlformats-package.core-properties+xml",
    );
    push_override(
        "/docProps/app.xml",
        "application/vnd.openxmlformats-officedocument.extended-properties+xml",
    );

    for hdr_ftr in &ctx.hdr_ftr_parts {
        let content_type = if hdr_ftr.is_header {
            format!("{}.header+xml", WORDML)
        } else {
            format!("{}.footer+xml", WORDML)
        };
        push_override(&format!("/word/{}", hdr_ftr.filename), &content_type);
    }
    if footnotes {
        push_override("/word/footnotes.xml", &format!("{}.footnotes+xml", WORDML));
    }
    if endnotes {
        push_override("/word/endnotes.xml", &format!("{}.endnotes+xml", WORDML));
    }
    if comments {
        push_override("/word/comments.xml", &format!("{}.comments+xml", WORDML));
    }

    xml.push_str("</Types>");
    xml
}

/// The package-root `_rels/.rels` part
pub fn root_rels_xml() -> Result<String> {
    let mut rels = RelationshipSet::new();
    rels.register(RelKind::OfficeDocument, "word/document.xml", false)?;
    rels.register(RelKind::CoreProperties, "docProps/core.xml", false)?;
    rels.register(RelKind::ExtendedProperties, "docProps/app.xml", false)?;
    Ok(rels.to_xml())
}

/// `docProps/core.xml`; only set metadata fields are written
pub fn core_props_xml(meta: &DocumentMeta) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
        r#" xmlns:dc="http://purl.org/dc/elements/1.1/""#,
        r#" xmlns:dcterms="http://purl.org/dc/terms/""#,
        r#" xmlns:dcmitype="http://purl.org/dc/dcmitype/""#,
        r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));

    fn push_field(xml: &mut String, tag: &str, value: &Option<String>) {
        if let Some(value) = value {
            xml.push_str(&format!("<{0}>{1}</{0}>", tag, escape_xml(value)));
        }
    }
    push_field(&mut xml, "dc:title", &meta.title);
    push_field(&mut xml, "dc:subject", &meta.subject);
    push_field(&mut xml, "dc:creator", &meta.creator);
    push_field(&mut xml, "cp:keywords", &meta.keywords);
    push_field(&mut xml, "dc:description", &meta.description);
    push_field(&mut xml, "cp:lastModifiedBy", &meta.last_modified_by);
    if let Some(revision) = meta.revision {
        xml.push_str(&format!("<cp:revision>{}</cp:revision>", revision));
    }
    if let Some(created) = &meta.created {
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            escape_xml(created)
        ));
    }
    if let Some(modified) = &meta.modified {
        xml.push_str(&format!(
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            escape_xml(modified)
        ));
    }
    push_field(&mut xml, "cp:category", &meta.category);

    xml.push_str("</cp:coreProperties>");
    xml
}

/// `docProps/app.xml`
pub fn app_props_xml(meta: &DocumentMeta) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties""#,
        r#" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
    ));
    xml.push_str("<Application>docforge</Application>");
    if let Some(company) = &meta.company {
        xml.push_str(&format!("<Company>{}</Company>", escape_xml(company)));
    }
    xml.push_str("</Properties>");
    xml
}

/// `word/settings.xml`
///
/// Carries the document-wide note numbering defaults in the form that also
/// declares the separator notes (ids -1 and 0). `update_fields` is forced on
/// when the body contains a TOC field, whatever the document setting says.
pub fn settings_xml(doc: &Document, update_fields: bool) -> String {
    let settings = &doc.settings;
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:settings xmlns:w="{}">"#, NS_WORDML));

    xml.push_str(&format!(r#"<w:zoom w:percent="{}"/>"#, settings.zoom));
    if settings.even_and_odd_headers {
        xml.push_str("<w:evenAndOddHeaders/>");
    }
    if update_fields {
        xml.push_str(r#"<w:updateFields w:val="true"/>"#);
    }
    xml.push_str(&format!(
        r#"<w:defaultTabStop w:val="{}"/>"#,
        settings.default_tab_stop
    ));
    write_note_pr(&mut xml, "w:footnotePr", &settings.footnote_properties, true);
    write_note_pr(&mut xml, "w:endnotePr", &settings.endnote_properties, true);

    xml.push_str("</w:settings>");
    xml
}

/// `word/webSettings.xml`
pub fn web_settings_xml() -> String {
    format!(
        "{}\n<w:webSettings xmlns:w=\"{}\"><w:optimizeForBrowser/></w:webSettings>",
        XML_DECLARATION, NS_WORDML
    )
}

/// `word/fontTable.xml`; declares the document default font plus every font
/// named by a style definition
pub fn font_table_xml(doc: &Document) -> String {
    let mut fonts = BTreeSet::new();
    fonts.insert(doc.settings.default_font_name.as_str());
    for (_, definition) in doc.styles.iter() {
        let font = match definition {
            docforge_model::StyleDefinition::Font(font) => Some(font),
            docforge_model::StyleDefinition::Paragraph { font, .. } => Some(font),
            _ => None,
        };
        if let Some(name) = font.and_then(|f| f.name.as_deref()) {
            fonts.insert(name);
        }
    }

    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:fonts xmlns:w="{}">"#, NS_WORDML));
    for name in fonts {
        xml.push_str(&format!(
            r#"<w:font w:name="{}"><w:pitch w:val="variable"/></w:font>"#,
            escape_xml(name)
        ));
    }
    xml.push_str("</w:fonts>");
    xml
}

/// A minimal static `word/theme/theme1.xml`
///
/// The fixed relationship to the theme always resolves; the content is the
/// stock Office color/font/format scheme.
pub fn theme_xml() -> String {
    const DRAWINGML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<a:theme xmlns:a="{}" name="Office">"#,
        DRAWINGML_NS
    ));
    xml.push_str("<a:themeElements>");

    xml.push_str(concat!(
        r#"<a:clrScheme name="Office">"#,
        r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
        r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
        r#"<a:dk2><a:srgbClr val="44546A"/></a:dk2>"#,
        r#"<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#,
        r#"<a:accent1><a:srgbClr val="4472C4"/></a:accent1>"#,
        r#"<a:accent2><a:srgbClr val="ED7D31"/></a:accent2>"#,
        r#"<a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>"#,
        r#"<a:accent4><a:srgbClr val="FFC000"/></a:accent4>"#,
        r#"<a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>"#,
        r#"<a:accent6><a:srgbClr val="70AD47"/></a:accent6>"#,
        r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink>"#,
        r#"<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#,
        r#"</a:clrScheme>"#,
    ));

    xml.push_str(concat!(
        r#"<a:fontScheme name="Office">"#,
        r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
        r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
        r#"</a:fontScheme>"#,
    ));

    let solid_fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    xml.push_str(r#"<a:fmtScheme name="Office">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(solid_fill);
    }
    xml.push_str("</a:fillStyleLst>");
    xml.push_str("<a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        xml.push_str(&format!(r#"<a:ln w="{}">{}</a:ln>"#, width, solid_fill));
    }
    xml.push_str("</a:lnStyleLst>");
    xml.push_str("<a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst>");
    xml.push_str("<a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(solid_fill);
    }
    xml.push_str("</a:bgFillStyleLst>");
    xml.push_str("</a:fmtScheme>");

    xml.push_str("</a:themeElements></a:theme>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use docforge_model::MediaSource;

    #[test]
    fn test_content_types_media_defaults() {
        let doc = Document::new();
        let mut ctx = WriteContext::new(&doc);
        ctx.add_image(&MediaSource::Bytes {
            data: vec![1],
            extension: "PNG".into(),
        })
        .unwrap();
        ctx.add_image(&MediaSource::Bytes {
            data: vec![2],
            extension: "jpeg".into(),
        })
        .unwrap();

        let xml = content_types_xml(&ctx, false, false, false);
        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#));
        assert!(xml.contains(r#"<Override PartName="/word/document.xml""#));
        assert!(xml.contains(r#"<Override PartName="/word/numbering.xml""#));
        assert!(!xml.contains("/word/footnotes.xml"));
    }

    #[test]
    fn test_content_types_note_overrides() {
        let doc = Document::new();
        let ctx = WriteContext::new(&doc);
        let xml = content_types_xml(&ctx, true, true, true);
        assert!(xml.contains(r#"PartName="/word/footnotes.xml""#));
        assert!(xml.contains(r#"PartName="/word/endnotes.xml""#));
        assert!(xml.contains(r#"PartName="/word/comments.xml""#));
    }

    #[test]
    fn test_root_rels() {
        let xml = root_rels_xml().unwrap();
        assert!(xml.contains(r#"Target="word/document.xml""#));
        assert!(xml.contains(r#"Target="docProps/core.xml""#));
        assert!(xml.contains(r#"Target="docProps/app.xml""#));
        assert_eq!(xml.matches("<Relationship ").count(), 3);
    }

    #[test]
    fn test_core_props_only_set_fields() {
        let meta = DocumentMeta {
            title: Some("Report <2024>".into()),
            creator: Some("docforge".into()),
            created: Some("2024-01-01T00:00:00Z".into()),
            ..Default::default()
        };
        let xml = core_props_xml(&meta);
        assert!(xml.contains("<dc:title>Report &lt;2024&gt;</dc:title>"));
        assert!(xml.contains("<dc:creator>docforge</dc:creator>"));
        assert!(xml.contains(r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-01-01T00:00:00Z</dcterms:created>"#));
        assert!(!xml.contains("dc:subject"));
        assert!(!xml.contains("cp:revision"));
    }

    #[test]
    fn test_settings_note_defaults_and_flags() {
        let mut doc = Document::new();
        doc.settings.even_and_odd_headers = true;
        let xml = settings_xml(&doc, true);
        assert!(xml.contains(r#"<w:updateFields w:val="true"/>"#));
        assert!(xml.contains("<w:evenAndOddHeaders/>"));
        assert!(xml.contains(r#"<w:defaultTabStop w:val="708"/>"#));
        assert!(xml.contains(r#"<w:footnotePr><w:pos w:val="pageBottom"/>"#));
        assert!(xml.contains(r#"<w:footnote w:id="-1"/>"#));
        assert!(xml.contains(r#"<w:endnote w:id="0"/>"#));
    }

    #[test]
    fn test_font_table_collects_style_fonts() {
        let mut doc = Document::new();
        doc.styles.define(
            "Code",
            docforge_model::StyleDefinition::Font(docforge_model::FontStyle {
                name: Some("Courier New".into()),
                ..Default::default()
            }),
        );
        let xml = font_table_xml(&doc);
        assert!(xml.contains(r#"<w:font w:name="Arial">"#));
        assert!(xml.contains(r#"<w:font w:name="Courier New">"#));
    }

    #[test]
    fn test_theme_is_wellformed_scaffold() {
        let xml = theme_xml();
        assert!(xml.contains("<a:clrScheme"));
        assert!(xml.contains("<a:fontScheme"));
        assert!(xml.contains("<a:fmtScheme"));
        assert_eq!(xml.matches("<a:effectStyle>").count(), 3);
    }
}
