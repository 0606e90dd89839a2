//! Footnote, endnote, and comment parts
//!
//! Note parts open with the two mandatory special notes: the separator rule
//! at id -1 and the continuation separator at id 0. Real notes follow in
//! reference-id order, which the context recorded in traversal order, so the
//! part layout is deterministic. Each part carries its own relationship set.
//!
//! Bodies can reference one another across parts: a footnote reachable only
//! from an endnote or a comment still needs a place in the footnotes part.
//! [`build_note_parts`] therefore drains the three usage tables to a fixed
//! point, flushing every body discovered while writing another part.

use docforge_model::NoteProperties;

use crate::body::{write_children, Scope};
use crate::context::{PartBuffer, WriteContext};
use crate::error::{Result, WriteError};

/// Footnote or endnote numbering properties block
///
/// `tag` is the qualified element name (`w:footnotePr` / `w:endnotePr`).
/// With `declare_separators`, the block also lists the special notes; that
/// form belongs in the settings part only.
pub(crate) fn write_note_pr(
    out: &mut String,
    tag: &str,
    props: &NoteProperties,
    declare_separators: bool,
) {
    out.push_str(&format!("<{}>", tag));
    out.push_str(&format!(r#"<w:pos w:val="{}"/>"#, props.position.as_str()));
    out.push_str(&format!(
        r#"<w:numFmt w:val="{}"/>"#,
        props.number_format.as_str()
    ));
    if props.number_start != 1 {
        out.push_str(&format!(r#"<w:numStart w:val="{}"/>"#, props.number_start));
    }
    out.push_str(&format!(
        r#"<w:numRestart w:val="{}"/>"#,
        props.restart.as_str()
    ));
    if declare_separators {
        let child = if tag == "w:footnotePr" {
            "w:footnote"
        } else {
            "w:endnote"
        };
        out.push_str(&format!(r#"<{} w:id="-1"/>"#, child));
        out.push_str(&format!(r#"<{} w:id="0"/>"#, child));
    }
    out.push_str(&format!("</{}>", tag));
}

/// The note and comment parts produced by one write pass; `None` means no
/// reference was discovered, so the part is not emitted
#[derive(Debug, Default)]
pub struct NoteParts {
    pub footnotes: Option<PartBuffer>,
    pub endnotes: Option<PartBuffer>,
    pub comments: Option<PartBuffer>,
}

/// Build the footnotes, endnotes, and comments parts
///
/// Each body is written exactly once, in the order its reference id was
/// allocated. Writing a body may append new entries to any of the three
/// usage tables; the outer loop keeps going until a full sweep discovers
/// nothing new.
pub fn build_note_parts(ctx: &mut WriteContext<'_>) -> Result<NoteParts> {
    let mut parts = NoteParts::default();
    let (mut f_pos, mut e_pos, mut c_pos) = (0usize, 0usize, 0usize);
    loop {
        let mut progressed = false;
        while f_pos < ctx.footnotes.len() {
            let part = parts.footnotes.get_or_insert_with(|| note_part_shell(true));
            write_note_body(ctx, part, true, f_pos)?;
            f_pos += 1;
            progressed = true;
        }
        while e_pos < ctx.endnotes.len() {
            let part = parts.endnotes.get_or_insert_with(|| note_part_shell(false));
            write_note_body(ctx, part, false, e_pos)?;
            e_pos += 1;
            progressed = true;
        }
        while c_pos < ctx.comments.len() {
            let part = parts.comments.get_or_insert_with(PartBuffer::new);
            write_comment_body(ctx, part, c_pos)?;
            c_pos += 1;
            progressed = true;
        }
        if !progressed {
            break;
        }
    }
    Ok(parts)
}

/// A fresh note part opened with the two separator entries
fn note_part_shell(footnote: bool) -> PartBuffer {
    let element = if footnote { "w:footnote" } else { "w:endnote" };
    let mut part = PartBuffer::new();
    part.xml.push_str(&format!(
        r#"<{0} w:type="separator" w:id="-1"><w:p><w:r><w:separator/></w:r></w:p></{0}>"#,
        element
    ));
    part.xml.push_str(&format!(
        r#"<{0} w:type="continuationSeparator" w:id="0"><w:p><w:r><w:continuationSeparator/></w:r></w:p></{0}>"#,
        element
    ));
    part
}

fn write_note_body(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    footnote: bool,
    position: usize,
) -> Result<()> {
    let (element, mark, text_style, ref_style) = if footnote {
        ("w:footnote", "<w:footnoteRef/>", "FootnoteText", "FootnoteReference")
    } else {
        ("w:endnote", "<w:endnoteRef/>", "EndnoteText", "EndnoteReference")
    };
    let (id, index) = if footnote {
        ctx.footnotes[position]
    } else {
        ctx.endnotes[position]
    };

    let doc = ctx.doc;
    let collection = if footnote {
        &doc.footnotes
    } else {
        &doc.endnotes
    };
    let note = collection
        .get(index)
        .ok_or(WriteError::DanglingReference {
            collection: if footnote { "footnotes" } else { "endnotes" },
            index,
            len: collection.len(),
        })?;

    part.xml
        .push_str(&format!(r#"<{} w:id="{}">"#, element, id));
    part.xml.push_str(&format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>"#,
        text_style
    ));
    part.xml.push_str(&format!(
        r#"<w:r><w:rPr><w:rStyle w:val="{}"/></w:rPr>{}</w:r>"#,
        ref_style, mark
    ));
    part.xml
        .push_str(r#"<w:r><w:t xml:space="preserve"> </w:t></w:r>"#);
    let scope = Scope {
        without_p: true,
        container_font: None,
    };
    write_children(ctx, part, &note.children, scope)?;
    part.xml.push_str("</w:p>");
    part.xml.push_str(&format!("</{}>", element));
    Ok(())
}

fn write_comment_body(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    position: usize,
) -> Result<()> {
    let (id, index) = ctx.comments[position];
    let doc = ctx.doc;
    let comment = doc
        .comments
        .get(index)
        .ok_or(WriteError::DanglingReference {
            collection: "comments",
            index,
            len: doc.comments.len(),
        })?;

    part.xml.push_str(&format!(
        r#"<w:comment w:id="{}" w:author="{}""#,
        id,
        crate::xml::escape_xml(&comment.author)
    ));
    if let Some(initials) = &comment.initials {
        part.xml.push_str(&format!(
            r#" w:initials="{}""#,
            crate::xml::escape_xml(initials)
        ));
    }
    if let Some(date) = &comment.date {
        part.xml
            .push_str(&format!(r#" w:date="{}""#, crate::xml::escape_xml(date)));
    }
    part.xml.push('>');
    write_children(ctx, part, &comment.children, Scope::default())?;
    part.xml.push_str("</w:comment>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docforge_model::{Comment, Document, Element, Note, NoteRef, Text};

    #[test]
    fn test_note_pr_settings_form_declares_separators() {
        let mut out = String::new();
        write_note_pr(
            &mut out,
            "w:footnotePr",
            &NoteProperties::footnote_default(),
            true,
        );
        assert!(out.contains(r#"<w:pos w:val="pageBottom"/>"#));
        assert!(out.contains(r#"<w:numFmt w:val="decimal"/>"#));
        assert!(out.contains(r#"<w:footnote w:id="-1"/>"#));
        assert!(out.contains(r#"<w:footnote w:id="0"/>"#));
        // default start is implied
        assert!(!out.contains("numStart"));
    }

    #[test]
    fn test_note_pr_section_form_has_no_separators() {
        let mut out = String::new();
        write_note_pr(
            &mut out,
            "w:endnotePr",
            &NoteProperties::endnote_default(),
            false,
        );
        assert!(out.contains(r#"<w:pos w:val="docEnd"/>"#));
        assert!(out.contains(r#"<w:numFmt w:val="lowerRoman"/>"#));
        assert!(!out.contains(r#"w:id="-1""#));
    }

    #[test]
    fn test_footnotes_part_has_separators_and_unique_ids() {
        let mut doc = Document::new();
        doc.add_footnote(Note::new(vec![Element::Text(Text::new("first note"))]));
        doc.add_footnote(Note::new(vec![Element::Text(Text::new("second note"))]));

        let mut ctx = WriteContext::new(&doc);
        ctx.footnote_id(0).unwrap();
        ctx.footnote_id(1).unwrap();

        let parts = build_note_parts(&mut ctx).unwrap();
        let part = parts.footnotes.unwrap();
        assert!(part
            .xml
            .contains(r#"<w:footnote w:type="separator" w:id="-1">"#));
        assert!(part
            .xml
            .contains(r#"<w:footnote w:type="continuationSeparator" w:id="0">"#));
        assert!(part.xml.contains(r#"<w:footnote w:id="1">"#));
        assert!(part.xml.contains(r#"<w:footnote w:id="2">"#));
        assert!(part.xml.contains("first note"));
        assert!(part.xml.contains(r#"<w:pStyle w:val="FootnoteText"/>"#));
        assert!(part.xml.contains("<w:footnoteRef/>"));
    }

    #[test]
    fn test_unreferenced_notes_are_not_emitted() {
        let mut doc = Document::new();
        doc.add_footnote(Note::new(vec![Element::Text(Text::new("used"))]));
        doc.add_footnote(Note::new(vec![Element::Text(Text::new("orphan"))]));

        let mut ctx = WriteContext::new(&doc);
        ctx.footnote_id(0).unwrap();

        let parts = build_note_parts(&mut ctx).unwrap();
        let part = parts.footnotes.unwrap();
        assert!(part.xml.contains("used"));
        assert!(!part.xml.contains("orphan"));
    }

    #[test]
    fn test_note_referencing_another_note_is_flushed_too() {
        let mut doc = Document::new();
        doc.add_footnote(Note::new(vec![Element::Text(Text::new("inner"))]));
        doc.add_footnote(Note::new(vec![
            Element::Text(Text::new("outer")),
            Element::FootnoteRef(NoteRef(0)),
        ]));

        let mut ctx = WriteContext::new(&doc);
        ctx.footnote_id(1).unwrap();

        let parts = build_note_parts(&mut ctx).unwrap();
        let part = parts.footnotes.unwrap();
        assert!(part.xml.contains("outer"));
        assert!(part.xml.contains("inner"));
        assert_eq!(ctx.footnotes.len(), 2);
    }

    #[test]
    fn test_footnote_discovered_in_endnote_body_is_flushed() {
        let mut doc = Document::new();
        doc.add_footnote(Note::new(vec![Element::Text(Text::new("supporting"))]));
        doc.add_endnote(Note::new(vec![
            Element::Text(Text::new("closing")),
            Element::FootnoteRef(NoteRef(0)),
        ]));

        let mut ctx = WriteContext::new(&doc);
        ctx.endnote_id(0).unwrap();

        let parts = build_note_parts(&mut ctx).unwrap();
        let endnotes = parts.endnotes.unwrap();
        assert!(endnotes.xml.contains(r#"<w:footnoteReference w:id="1"/>"#));
        // the footnote was only reachable through the endnote body
        let footnotes = parts.footnotes.unwrap();
        assert!(footnotes.xml.contains(r#"<w:footnote w:id="1">"#));
        assert!(footnotes.xml.contains("supporting"));
    }

    #[test]
    fn test_endnotes_part_styles() {
        let mut doc = Document::new();
        doc.add_endnote(Note::new(vec![Element::Text(Text::new("closing remark"))]));
        let mut ctx = WriteContext::new(&doc);
        ctx.endnote_id(0).unwrap();

        let parts = build_note_parts(&mut ctx).unwrap();
        let part = parts.endnotes.unwrap();
        assert!(part.xml.contains(r#"<w:endnote w:type="separator" w:id="-1">"#));
        assert!(part.xml.contains(r#"<w:pStyle w:val="EndnoteText"/>"#));
        assert!(part.xml.contains("<w:endnoteRef/>"));
        assert!(parts.footnotes.is_none());
    }

    #[test]
    fn test_comments_part_metadata() {
        let mut doc = Document::new();
        let mut comment = Comment::new("Reviewer", vec![Element::Text(Text::new("check this"))]);
        comment.initials = Some("RV".into());
        comment.date = Some("2024-03-01T10:00:00Z".into());
        doc.add_comment(comment);

        let mut ctx = WriteContext::new(&doc);
        ctx.comment_id(0).unwrap();

        let parts = build_note_parts(&mut ctx).unwrap();
        let part = parts.comments.unwrap();
        assert!(part.xml.contains(
            r#"<w:comment w:id="1" w:author="Reviewer" w:initials="RV" w:date="2024-03-01T10:00:00Z">"#
        ));
        assert!(part.xml.contains("check this"));
    }
}
