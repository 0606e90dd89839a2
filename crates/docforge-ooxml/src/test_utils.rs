//! Shared test fixtures
//!
//! Small document builders used across the inline test modules.

use docforge_model::{Document, Element, FontStyle, Section, Text};

/// A one-section document holding the given elements
pub fn doc_with(elements: Vec<Element>) -> Document {
    let mut doc = Document::new();
    doc.add_section(Section::new(elements));
    doc
}

/// A document with a single plain paragraph
pub fn minimal_doc() -> Document {
    doc_with(vec![Element::Text(Text::new("Hello, world"))])
}

/// A bold inline font
pub fn bold() -> FontStyle {
    FontStyle {
        bold: Some(true),
        ..Default::default()
    }
}
