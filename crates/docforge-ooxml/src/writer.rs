//! The document writer
//!
//! One write pass walks the frozen document tree, allocating identifiers and
//! collecting media along the way, then flushes every part into a
//! [`DocxPackage`]. The pass is a pure function of the document: writing the
//! same model twice yields byte-identical parts.

use docforge_model::Document;

use crate::context::{PartBuffer, WriteContext};
use crate::error::Result;
use crate::notes::build_note_parts;
use crate::numbering::numbering_part_xml;
use crate::package::DocxPackage;
use crate::parts::{
    app_props_xml, content_types_xml, core_props_xml, font_table_xml, root_rels_xml, settings_xml,
    theme_xml, web_settings_xml,
};
use crate::rels::RelKind;
use crate::section::write_body;
use crate::styles::styles_part_xml;
use crate::xml::{wordml_namespace_attrs, XML_DECLARATION};

/// Writes a document model out as an OOXML part map
pub struct DocxWriter;

impl DocxWriter {
    /// Serialize the whole document
    ///
    /// The document is not mutated; all per-export state lives in a fresh
    /// [`WriteContext`]. Any error aborts the export with no partial package.
    pub fn write(doc: &Document) -> Result<DocxPackage> {
        let mut ctx = WriteContext::new(doc);
        let mut main = PartBuffer::main_document();

        write_body(&mut ctx, &mut main)?;

        // note bodies can pull in more notes, media, and comment ranges, so
        // they are built to a fixed point before anything that depends on
        // the final totals
        let note_parts = build_note_parts(&mut ctx)?;

        // note part references live in the main part's relationship set; the
        // body points at notes by w:id, so registering after the body is safe
        if note_parts.footnotes.is_some() {
            main.rels
                .register(RelKind::Footnotes, "footnotes.xml", false)?;
        }
        if note_parts.endnotes.is_some() {
            main.rels.register(RelKind::Endnotes, "endnotes.xml", false)?;
        }
        if note_parts.comments.is_some() {
            main.rels.register(RelKind::Comments, "comments.xml", false)?;
        }

        let mut package = DocxPackage::new();
        package.insert(
            "[Content_Types].xml",
            content_types_xml(
                &ctx,
                note_parts.footnotes.is_some(),
                note_parts.endnotes.is_some(),
                note_parts.comments.is_some(),
            )
            .into_bytes(),
        );
        package.insert("_rels/.rels", root_rels_xml()?.into_bytes());
        package.insert("docProps/core.xml", core_props_xml(&doc.meta).into_bytes());
        package.insert("docProps/app.xml", app_props_xml(&doc.meta).into_bytes());

        let document_xml = format!(
            "{}\n<w:document {}><w:body>{}</w:body></w:document>",
            XML_DECLARATION,
            wordml_namespace_attrs(),
            main.xml
        );
        package.insert("word/document.xml", document_xml.into_bytes());
        package.insert(
            "word/_rels/document.xml.rels",
            main.rels.to_xml().into_bytes(),
        );

        // the six parts behind the reserved relationship ids, always present
        package.insert("word/styles.xml", styles_part_xml(doc).into_bytes());
        package.insert("word/numbering.xml", numbering_part_xml(&ctx).into_bytes());
        package.insert(
            "word/settings.xml",
            settings_xml(doc, doc.settings.update_fields || ctx.toc_seen).into_bytes(),
        );
        package.insert("word/theme/theme1.xml", theme_xml().into_bytes());
        package.insert("word/webSettings.xml", web_settings_xml().into_bytes());
        package.insert("word/fontTable.xml", font_table_xml(doc).into_bytes());

        for hdr_ftr in &ctx.hdr_ftr_parts {
            let root_tag = if hdr_ftr.is_header { "w:hdr" } else { "w:ftr" };
            let xml = format!(
                "{}\n<{} {}>{}</{}>",
                XML_DECLARATION,
                root_tag,
                wordml_namespace_attrs(),
                hdr_ftr.part.xml,
                root_tag
            );
            package.insert(format!("word/{}", hdr_ftr.filename), xml.into_bytes());
            if !hdr_ftr.part.rels.is_empty() {
                package.insert(
                    format!("word/_rels/{}.rels", hdr_ftr.filename),
                    hdr_ftr.part.rels.to_xml().into_bytes(),
                );
            }
        }

        flush_notes_part(&mut package, note_parts.footnotes, "footnotes", "w:footnotes");
        flush_notes_part(&mut package, note_parts.endnotes, "endnotes", "w:endnotes");
        flush_notes_part(&mut package, note_parts.comments, "comments", "w:comments");

        for media in &ctx.media {
            package.insert(media.part_path.clone(), media.data.clone());
        }

        Ok(package)
    }
}

fn flush_notes_part(
    package: &mut DocxPackage,
    part: Option<PartBuffer>,
    basename: &str,
    root_tag: &str,
) {
    let Some(part) = part else { return };
    let xml = format!(
        "{}\n<{} {}>{}</{}>",
        XML_DECLARATION,
        root_tag,
        wordml_namespace_attrs(),
        part.xml,
        root_tag
    );
    package.insert(format!("word/{}.xml", basename), xml.into_bytes());
    if !part.rels.is_empty() {
        package.insert(
            format!("word/_rels/{}.xml.rels", basename),
            part.rels.to_xml().into_bytes(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::minimal_doc;
    use docforge_model::{Element, Note, NoteRef, Section, Text};

    #[test]
    fn test_minimal_document_part_set() {
        let doc = minimal_doc();
        let package = DocxWriter::write(&doc).unwrap();

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/numbering.xml",
            "word/settings.xml",
            "word/theme/theme1.xml",
            "word/webSettings.xml",
            "word/fontTable.xml",
        ] {
            assert!(package.get(name).is_some(), "missing part {}", name);
        }
        assert!(package.get("word/footnotes.xml").is_none());
        assert!(package.get("word/comments.xml").is_none());
    }

    #[test]
    fn test_write_is_deterministic() {
        let mut doc = Document::new();
        doc.add_footnote(Note::new(vec![Element::Text(Text::new("note"))]));
        doc.add_section(Section::new(vec![
            Element::Text(Text::new("body")),
            Element::FootnoteRef(NoteRef(0)),
        ]));

        let first = DocxWriter::write(&doc).unwrap();
        let second = DocxWriter::write(&doc).unwrap();
        let first_parts: Vec<_> = first.iter().collect();
        let second_parts: Vec<_> = second.iter().collect();
        assert_eq!(first_parts, second_parts);
    }

    #[test]
    fn test_footnote_part_and_relationship_appear_together() {
        let mut doc = Document::new();
        doc.add_footnote(Note::new(vec![Element::Text(Text::new("note"))]));
        doc.add_section(Section::new(vec![Element::FootnoteRef(NoteRef(0))]));

        let package = DocxWriter::write(&doc).unwrap();
        assert!(package.get("word/footnotes.xml").is_some());
        let rels = package.get_str("word/_rels/document.xml.rels").unwrap();
        assert!(rels.contains(r#"Target="footnotes.xml""#));
        let content_types = package.get_str("[Content_Types].xml").unwrap();
        assert!(content_types.contains("/word/footnotes.xml"));
    }

    #[test]
    fn test_empty_document_still_writes() {
        let doc = Document::new();
        let package = DocxWriter::write(&doc).unwrap();
        let body = package.get_str("word/document.xml").unwrap();
        assert!(body.contains("<w:sectPr>"));
        assert!(body.contains("<w:body>"));
    }

    #[test]
    fn test_toc_forces_update_fields() {
        let doc = crate::test_utils::doc_with(vec![Element::Toc(Default::default())]);
        let package = DocxWriter::write(&doc).unwrap();
        let settings = package.get_str("word/settings.xml").unwrap();
        assert!(settings.contains(r#"<w:updateFields w:val="true"/>"#));
    }
}
