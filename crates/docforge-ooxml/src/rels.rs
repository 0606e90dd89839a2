//! Relationship graphs for OOXML parts
//!
//! Every output part that cross-references another part or an external
//! resource carries its own relationship set, serialized next to it as a
//! `_rels/*.rels` part. Sets from different parts are never merged: each has
//! its own id space.
//!
//! # Example
//!
//! ```ignore
//! use docforge_ooxml::rels::{RelKind, RelationshipSet};
//!
//! let mut rels = RelationshipSet::with_document_defaults();
//! let id = rels.register(RelKind::Image, "media/image1.png", false)?;
//! assert_eq!(id, 7); // ids 1-6 are reserved for the fixed parts
//! let xml = rels.to_xml();
//! ```

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Result, WriteError};
use crate::xml::escape_xml;

/// OOXML package namespace for relationship parts
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship kinds and their type URIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelKind {
    OfficeDocument,
    CoreProperties,
    ExtendedProperties,
    Styles,
    Numbering,
    Settings,
    Theme,
    WebSettings,
    FontTable,
    Image,
    Hyperlink,
    Header,
    Footer,
    Footnotes,
    Endnotes,
    Comments,
    OleObject,
}

impl RelKind {
    /// The full relationship type URI
    pub fn type_uri(&self) -> &'static str {
        match self {
            RelKind::OfficeDocument => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument"
            }
            RelKind::CoreProperties => {
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"
            }
            RelKind::ExtendedProperties => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties"
            }
            RelKind::Styles => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles"
            }
            RelKind::Numbering => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering"
            }
            RelKind::Settings => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings"
            }
            RelKind::Theme => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme"
            }
            RelKind::WebSettings => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/webSettings"
            }
            RelKind::FontTable => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/fontTable"
            }
            RelKind::Image => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image"
            }
            RelKind::Hyperlink => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink"
            }
            RelKind::Header => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header"
            }
            RelKind::Footer => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer"
            }
            RelKind::Footnotes => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footnotes"
            }
            RelKind::Endnotes => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/endnotes"
            }
            RelKind::Comments => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments"
            }
            RelKind::OleObject => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/oleObject"
            }
        }
    }

    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            RelKind::OfficeDocument => "officeDocument",
            RelKind::CoreProperties => "core-properties",
            RelKind::ExtendedProperties => "extended-properties",
            RelKind::Styles => "styles",
            RelKind::Numbering => "numbering",
            RelKind::Settings => "settings",
            RelKind::Theme => "theme",
            RelKind::WebSettings => "webSettings",
            RelKind::FontTable => "fontTable",
            RelKind::Image => "image",
            RelKind::Hyperlink => "hyperlink",
            RelKind::Header => "header",
            RelKind::Footer => "footer",
            RelKind::Footnotes => "footnotes",
            RelKind::Endnotes => "endnotes",
            RelKind::Comments => "comments",
            RelKind::OleObject => "oleObject",
        }
    }
}

/// One relationship entry
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: u32,
    pub kind: RelKind,
    pub target: String,
    /// External targets (hyperlink URLs) get `TargetMode="External"`
    pub external: bool,
}

/// The relationship graph of one output part
///
/// Entries are kept in allocation order, which is also id order, so the
/// emitted XML is deterministic.
#[derive(Debug, Clone, Default)]
pub struct RelationshipSet {
    entries: Vec<Relationship>,
    next_id: u32,
}

impl RelationshipSet {
    /// An empty set counting from rId1 (header/footer/notes parts)
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// The main document part's set: ids 1-6 are pre-reserved for the fixed
    /// parts, so dynamic allocation starts at rId7.
    pub fn with_document_defaults() -> Self {
        let fixed = [
            (RelKind::Styles, "styles.xml"),
            (RelKind::Numbering, "numbering.xml"),
            (RelKind::Settings, "settings.xml"),
            (RelKind::Theme, "theme/theme1.xml"),
            (RelKind::WebSettings, "webSettings.xml"),
            (RelKind::FontTable, "fontTable.xml"),
        ];
        let entries = fixed
            .iter()
            .enumerate()
            .map(|(i, (kind, target))| Relationship {
                id: i as u32 + 1,
                kind: *kind,
                target: (*target).to_string(),
                external: false,
            })
            .collect();
        Self { entries, next_id: 7 }
    }

    /// Allocate the next id and record an entry for it
    ///
    /// Returns the numeric id; the XML attribute form is `rId{id}`.
    pub fn register(&mut self, kind: RelKind, target: &str, external: bool) -> Result<u32> {
        if target.is_empty() {
            return Err(WriteError::EmptyRelationshipTarget { kind: kind.name() });
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Relationship {
            id,
            kind,
            target: target.to_string(),
            external,
        });
        Ok(id)
    }

    /// Serialize to a `.rels` part, one `<Relationship>` per entry in id order
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(crate::xml::XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        for rel in &self.entries {
            xml.push_str("  <Relationship");
            xml.push_str(&format!(r#" Id="rId{}""#, rel.id));
            xml.push_str(&format!(r#" Type="{}""#, rel.kind.type_uri()));
            xml.push_str(&format!(r#" Target="{}""#, escape_xml(&rel.target)));
            if rel.external {
                xml.push_str(r#" TargetMode="External""#);
            }
            xml.push_str("/>\n");
        }

        xml.push_str("</Relationships>");
        xml
    }

    pub fn get(&self, id: u32) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }
}

/// Ids declared in a `.rels` part, for consistency checks
///
/// Returns the `rId{n}` values in document order.
pub fn declared_ids(rels_xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);

    let mut ids = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    for attr in e.attributes().filter_map(|a| a.ok()) {
                        if attr.key.as_ref() == b"Id" {
                            if let Ok(v) = attr.unescape_value() {
                                ids.push(v.to_string());
                            }
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WriteError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_set_counts_from_one() {
        let mut rels = RelationshipSet::new();
        let id = rels.register(RelKind::Image, "media/image1.png", false).unwrap();
        assert_eq!(id, 1);
        let id = rels.register(RelKind::Hyperlink, "https://example.com", true).unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_document_defaults_reserve_six_ids() {
        let mut rels = RelationshipSet::with_document_defaults();
        assert_eq!(rels.len(), 6);
        assert_eq!(rels.get(1).unwrap().kind, RelKind::Styles);
        assert_eq!(rels.get(4).unwrap().target, "theme/theme1.xml");
        assert_eq!(rels.get(6).unwrap().kind, RelKind::FontTable);

        let id = rels.register(RelKind::Image, "media/image1.png", false).unwrap();
        assert_eq!(id, 7);
    }

    #[test]
    fn test_empty_target_is_fatal() {
        let mut rels = RelationshipSet::new();
        let err = rels.register(RelKind::Image, "", false).unwrap_err();
        assert!(matches!(
            err,
            WriteError::EmptyRelationshipTarget { kind: "image" }
        ));
    }

    #[test]
    fn test_to_xml_shape() {
        let mut rels = RelationshipSet::new();
        rels.register(RelKind::Header, "header1.xml", false).unwrap();
        rels.register(RelKind::Hyperlink, "https://example.com", true).unwrap();

        let xml = rels.to_xml();
        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains(&format!(r#"xmlns="{}""#, RELATIONSHIPS_NS)));
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Target="header1.xml""#));
        assert!(xml.contains(r#"Id="rId2""#));
        assert!(xml.contains(r#"TargetMode="External""#));
        // internal targets carry no mode
        assert_eq!(xml.matches("TargetMode").count(), 1);
    }

    #[test]
    fn test_to_xml_escapes_targets() {
        let mut rels = RelationshipSet::new();
        rels.register(RelKind::Hyperlink, "https://example.com/?a=1&b=2", true)
            .unwrap();
        let xml = rels.to_xml();
        assert!(xml.contains("a=1&amp;b=2"));
    }

    #[test]
    fn test_declared_ids_roundtrip() {
        let mut rels = RelationshipSet::with_document_defaults();
        rels.register(RelKind::Image, "media/image1.png", false).unwrap();

        let ids = declared_ids(rels.to_xml().as_bytes()).unwrap();
        assert_eq!(
            ids,
            vec!["rId1", "rId2", "rId3", "rId4", "rId5", "rId6", "rId7"]
        );
    }

    #[test]
    fn test_sets_are_independent_per_part() {
        let mut main = RelationshipSet::with_document_defaults();
        let mut header = RelationshipSet::new();

        let main_id = main.register(RelKind::Image, "media/image1.png", false).unwrap();
        let header_id = header.register(RelKind::Image, "media/image2.png", false).unwrap();

        assert_eq!(main_id, 7);
        assert_eq!(header_id, 1);
    }
}
