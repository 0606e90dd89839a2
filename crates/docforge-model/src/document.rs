//! Document root, metadata, settings, and shared collections

use serde::{Deserialize, Serialize};

use crate::element::{Element, Note};
use crate::section::{NoteProperties, Section};
use crate::style::Styles;

/// The root aggregate: sections, named styles, notes, comments, settings
///
/// A document is frozen while it is being written: the writers take `&Document`
/// and never mutate it, so one model can be exported any number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub meta: DocumentMeta,
    pub settings: Settings,
    pub styles: Styles,
    pub sections: Vec<Section>,
    /// Footnote bodies, referenced from elements by index
    pub footnotes: Vec<Note>,
    /// Endnote bodies, referenced from elements by index
    pub endnotes: Vec<Note>,
    /// Comments, referenced from elements by index
    pub comments: Vec<Comment>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            meta: DocumentMeta::default(),
            settings: Settings::default(),
            styles: Styles::new(),
            sections: Vec::new(),
            footnotes: Vec::new(),
            endnotes: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Append a section and return its index
    pub fn add_section(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// Register a footnote body and return the index used by `FootnoteRef`
    pub fn add_footnote(&mut self, note: Note) -> usize {
        self.footnotes.push(note);
        self.footnotes.len() - 1
    }

    /// Register an endnote body and return the index used by `EndnoteRef`
    pub fn add_endnote(&mut self, note: Note) -> usize {
        self.endnotes.push(note);
        self.endnotes.len() - 1
    }

    /// Register a comment and return the index used by range markers
    pub fn add_comment(&mut self, comment: Comment) -> usize {
        self.comments.push(comment);
        self.comments.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata written to `docProps/core.xml` and `docProps/app.xml`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub last_modified_by: Option<String>,
    /// W3CDTF timestamp, e.g. "2024-01-01T00:00:00Z"
    pub created: Option<String>,
    /// W3CDTF timestamp
    pub modified: Option<String>,
    pub revision: Option<u32>,
    pub company: Option<String>,
}

impl DocumentMeta {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Global document settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Document default font family
    pub default_font_name: String,
    /// Document default font size in points
    pub default_font_size: f32,
    /// Default tab stop interval, twips
    pub default_tab_stop: u32,
    /// Zoom percentage
    pub zoom: u32,
    /// Ask the application to recalculate fields on open (needed for TOC)
    pub update_fields: bool,
    /// Enable distinct even/odd headers document-wide
    pub even_and_odd_headers: bool,
    /// Document-wide footnote numbering defaults
    pub footnote_properties: NoteProperties,
    /// Document-wide endnote numbering defaults
    pub endnote_properties: NoteProperties,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_font_name: "Arial".to_string(),
            default_font_size: 10.0,
            default_tab_stop: 708,
            zoom: 100,
            update_fields: false,
            even_and_odd_headers: false,
            footnote_properties: NoteProperties::footnote_default(),
            endnote_properties: NoteProperties::endnote_default(),
        }
    }
}

/// A comment anchored to a range of elements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub initials: Option<String>,
    /// W3CDTF timestamp
    pub date: Option<String>,
    pub children: Vec<Element>,
}

impl Comment {
    pub fn new(author: impl Into<String>, children: Vec<Element>) -> Self {
        Self {
            author: author.into(),
            initials: None,
            date: None,
            children,
        }
    }
}
