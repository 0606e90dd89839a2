//! Package-level consistency checks
//!
//! These tests treat the writer as a black box and verify the structural
//! guarantees that hold across parts: every referenced relationship id is
//! declared, every declared target resolves, every XML part parses.

use std::collections::HashSet;

use docforge_model::{
    Document, Element, FontStyle, HeaderFooter, HeaderFooterKind, Hyperlink, Image, MediaSource,
    Note, NoteRef, Section, Text, TextRun, Comment,
};
use docforge_ooxml::rels::declared_ids;
use docforge_ooxml::package::is_xml_part;
use docforge_ooxml::{DirAssembler, DocxPackage, DocxWriter, PackageAssembler};
use quick_xml::events::Event;
use quick_xml::Reader;

/// A document exercising every part the writer can emit
fn rich_document() -> Document {
    let mut doc = Document::new();
    let note = doc.add_footnote(Note::new(vec![Element::Text(Text::new("a footnote"))]));
    let endnote = doc.add_endnote(Note::new(vec![Element::Text(Text::new("an endnote"))]));
    let comment = doc.add_comment(Comment::new(
        "Reviewer",
        vec![Element::Text(Text::new("looks good"))],
    ));

    let mut section = Section::new(vec![
        Element::TextRun(TextRun::new(vec![
            Element::Text(Text {
                content: "annotated".into(),
                font: Some(FontStyle {
                    bold: Some(true),
                    ..Default::default()
                }),
                comment_start: Some(comment),
                comment_end: Some(comment),
                ..Default::default()
            }),
            Element::FootnoteRef(NoteRef(note)),
            Element::EndnoteRef(NoteRef(endnote)),
        ])),
        Element::Link(Hyperlink::external("https://example.com", "site")),
        Element::Image(Image {
            source: MediaSource::Bytes {
                data: vec![1, 2, 3, 4],
                extension: "png".into(),
            },
            width: 64,
            height: 64,
            alt: None,
        }),
    ]);
    section.set_header(
        HeaderFooterKind::Default,
        HeaderFooter::new(vec![Element::Text(Text::new("header"))]),
    );
    section.footer = Some(HeaderFooter::new(vec![Element::Text(Text::new("footer"))]));
    doc.add_section(section);
    doc
}

/// All `r:id` / `r:embed` values referenced by a part's XML
fn referenced_rids(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                for attr in e.attributes().filter_map(|a| a.ok()) {
                    let key = attr.key.as_ref();
                    if key == b"r:id" || key == b"r:embed" {
                        if let Ok(value) = attr.unescape_value() {
                            ids.push(value.to_string());
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("unparseable XML: {}", e),
            _ => {}
        }
    }
    ids
}

fn rels_for<'a>(package: &'a DocxPackage, part: &str) -> Option<&'a str> {
    let (dir, file) = match part.rfind('/') {
        Some(pos) => (&part[..pos], &part[pos + 1..]),
        None => ("", part),
    };
    let rels_name = if dir.is_empty() {
        format!("_rels/{}.rels", file)
    } else {
        format!("{}/_rels/{}.rels", dir, file)
    };
    package.get_str(&rels_name)
}

#[test]
fn test_no_orphan_relationship_references() {
    let package = DocxWriter::write(&rich_document()).unwrap();

    for part in [
        "word/document.xml",
        "word/header1.xml",
        "word/footer1.xml",
        "word/footnotes.xml",
        "word/endnotes.xml",
        "word/comments.xml",
    ] {
        let xml = match package.get_str(part) {
            Some(xml) => xml,
            None => continue,
        };
        let referenced = referenced_rids(xml);
        let declared: HashSet<String> = match rels_for(&package, part) {
            Some(rels) => declared_ids(rels.as_bytes()).unwrap().into_iter().collect(),
            None => HashSet::new(),
        };
        for id in &referenced {
            assert!(
                declared.contains(id),
                "{} references {} but does not declare it",
                part,
                id
            );
        }
    }
}

#[test]
fn test_every_declared_target_resolves() {
    let package = DocxWriter::write(&rich_document()).unwrap();
    let rels = package.get_str("word/_rels/document.xml.rels").unwrap();

    let mut reader = Reader::from_str(rels);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() != b"Relationship" {
                    continue;
                }
                let mut target = None;
                let mut external = false;
                for attr in e.attributes().filter_map(|a| a.ok()) {
                    match attr.key.as_ref() {
                        b"Target" => target = Some(attr.unescape_value().unwrap().to_string()),
                        b"TargetMode" => external = attr.unescape_value().unwrap() == "External",
                        _ => {}
                    }
                }
                if external {
                    continue;
                }
                let target = target.expect("relationship without target");
                let part_name = format!("word/{}", target);
                assert!(
                    package.get(&part_name).is_some(),
                    "relationship target {} has no part",
                    part_name
                );
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("unparseable rels: {}", e),
            _ => {}
        }
    }
}

#[test]
fn test_all_xml_parts_are_wellformed() {
    let package = DocxWriter::write(&rich_document()).unwrap();
    for (name, data) in package.iter() {
        if !is_xml_part(name) {
            continue;
        }
        let mut reader = Reader::from_reader(data);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("part {} is not well-formed: {}", name, e),
            }
            buf.clear();
        }
    }
}

#[test]
fn test_content_types_covers_every_part() {
    let package = DocxWriter::write(&rich_document()).unwrap();
    let content_types = package.get_str("[Content_Types].xml").unwrap();

    for name in package.part_names() {
        if name == "[Content_Types].xml" {
            continue;
        }
        let extension = name.rsplit('.').next().unwrap();
        let has_default = content_types.contains(&format!(r#"Extension="{}""#, extension));
        let has_override = content_types.contains(&format!(r#"PartName="/{}""#, name));
        assert!(
            has_default || has_override,
            "part {} is not covered by [Content_Types].xml",
            name
        );
    }
}

#[test]
fn test_dir_assembler_lays_out_the_tree() {
    let package = DocxWriter::write(&rich_document()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let root = DirAssembler::new(dir.path()).assemble(&package).unwrap();

    assert!(root.join("word/document.xml").is_file());
    assert!(root.join("word/_rels/document.xml.rels").is_file());
    assert!(root.join("word/media/image1.png").is_file());
    assert!(root.join("_rels/.rels").is_file());
}
