//! Document elements
//!
//! The element set is a closed enum: every construct a document can contain
//! has a variant here, and the writers match it exhaustively. Containers
//! (text runs, table cells, list items, text boxes) hold nested elements.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::style::{CellStyle, FontStyle, ParagraphStyle, RowStyle, TableStyle};

/// A document content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    /// A piece of text; standalone it forms its own paragraph
    Text(Text),
    /// A paragraph holding nested inline elements
    TextRun(TextRun),
    /// A numbered or bulleted list paragraph
    ListItem(ListItem),
    Table(Table),
    Image(Image),
    Link(Hyperlink),
    /// A named bookmark anchor
    Bookmark(Bookmark),
    /// A simple field (page number, date, ...)
    Field(Field),
    /// Reference to a footnote in the document's footnote collection
    FootnoteRef(NoteRef),
    /// Reference to an endnote in the document's endnote collection
    EndnoteRef(NoteRef),
    /// Table-of-contents field
    Toc(Toc),
    /// A basic drawing shape
    Shape(Shape),
    /// An embedded OLE object
    Object(OleObject),
    /// A legacy checkbox form field
    CheckBox(CheckBox),
    /// A legacy form field (text input / dropdown)
    FormField(FormField),
    /// A structured document tag (content control)
    StructuredDocumentTag(Sdt),
    /// A line break
    TextBreak,
    /// A page break
    PageBreak,
    /// Phonetic guide text
    Ruby(Ruby),
    /// A floating text box holding nested elements
    TextBox(TextBox),
}

/// Metadata attached to a tracked revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackChange {
    pub kind: ChangeKind,
    pub author: String,
    /// W3CDTF timestamp
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Inserted,
    Deleted,
}

/// A text element
///
/// `font`/`paragraph` carry inline formatting; `font_style`/`paragraph_style`
/// reference named styles by name. Inline formatting wins over the reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    pub font: Option<FontStyle>,
    pub font_style: Option<String>,
    pub paragraph: Option<ParagraphStyle>,
    pub paragraph_style: Option<String>,
    pub change: Option<TrackChange>,
    /// Open a comment range for the comment at this collection index
    pub comment_start: Option<usize>,
    /// Close the comment range for the comment at this collection index
    pub comment_end: Option<usize>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_font(content: impl Into<String>, font: FontStyle) -> Self {
        Self {
            content: content.into(),
            font: Some(font),
            ..Default::default()
        }
    }
}

/// A paragraph container for inline elements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextRun {
    pub children: Vec<Element>,
    /// Default run formatting for children without their own
    pub font: Option<FontStyle>,
    pub paragraph: Option<ParagraphStyle>,
    pub paragraph_style: Option<String>,
    pub change: Option<TrackChange>,
    pub comment_start: Option<usize>,
    pub comment_end: Option<usize>,
}

impl TextRun {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }
}

/// A list paragraph bound to a named numbering definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<Element>,
    /// Zero-based list depth (0..=8)
    pub depth: u8,
    /// Name of a numbering definition in the style registry
    pub numbering_style: String,
    pub paragraph: Option<ParagraphStyle>,
    pub paragraph_style: Option<String>,
}

impl ListItem {
    pub fn new(children: Vec<Element>, depth: u8, numbering_style: impl Into<String>) -> Self {
        Self {
            children,
            depth,
            numbering_style: numbering_style.into(),
            paragraph: None,
            paragraph_style: None,
        }
    }
}

/// A table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
    pub style: Option<TableStyle>,
    pub style_name: Option<String>,
}

/// A table row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub style: Option<RowStyle>,
}

/// A table cell; a container for block content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub children: Vec<Element>,
    pub style: Option<CellStyle>,
}

impl Cell {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            children,
            style: None,
        }
    }
}

/// Where media bytes come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaSource {
    /// Read from disk at write time; a missing or unreadable file aborts the
    /// export before any bytes are packaged
    Path(PathBuf),
    /// Already in memory
    Bytes { data: Vec<u8>, extension: String },
}

impl MediaSource {
    /// File extension used for the media part name and content type
    pub fn extension(&self) -> Option<&str> {
        match self {
            MediaSource::Path(p) => p.extension().and_then(|e| e.to_str()),
            MediaSource::Bytes { extension, .. } => Some(extension.as_str()),
        }
    }
}

/// An inline picture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub source: MediaSource,
    /// Display width in pixels (96 dpi)
    pub width: u32,
    /// Display height in pixels (96 dpi)
    pub height: u32,
    pub alt: Option<String>,
}

/// Hyperlink target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LinkTarget {
    /// External URL; recorded as an external relationship
    Url(String),
    /// Internal jump to a bookmark name
    Bookmark(String),
}

/// A hyperlink wrapping a text run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperlink {
    pub target: LinkTarget,
    pub text: String,
    pub font: Option<FontStyle>,
    pub font_style: Option<String>,
}

impl Hyperlink {
    pub fn external(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target: LinkTarget::Url(url.into()),
            text: text.into(),
            font: None,
            font_style: None,
        }
    }

    pub fn internal(bookmark: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target: LinkTarget::Bookmark(bookmark.into()),
            text: text.into(),
            font: None,
            font_style: None,
        }
    }
}

/// A named bookmark (start and end markers around a point)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
}

/// A simple field instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub kind: FieldKind,
    pub font: Option<FontStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Current page number
    Page,
    /// Total page count
    NumPages,
    /// Document date
    Date,
    /// File name
    FileName,
    /// Cross-reference to a bookmark
    Ref { bookmark: String },
}

impl FieldKind {
    /// Field instruction text
    pub fn instruction(&self) -> String {
        match self {
            FieldKind::Page => " PAGE ".to_string(),
            FieldKind::NumPages => " NUMPAGES ".to_string(),
            FieldKind::Date => " DATE ".to_string(),
            FieldKind::FileName => " FILENAME ".to_string(),
            FieldKind::Ref { bookmark } => format!(" REF {} \\h ", bookmark),
        }
    }
}

/// Index into the document's footnote or endnote collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef(pub usize);

/// A footnote or endnote body
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Note {
    pub children: Vec<Element>,
}

impl Note {
    pub fn new(children: Vec<Element>) -> Self {
        Self { children }
    }
}

/// A table-of-contents field covering the given heading depth range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toc {
    pub min_depth: u8,
    pub max_depth: u8,
}

impl Default for Toc {
    fn default() -> Self {
        Self {
            min_depth: 1,
            max_depth: 9,
        }
    }
}

/// A basic VML shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RRGGBB outline color
    pub outline_color: Option<String>,
    /// RRGGBB fill color
    pub fill_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rect,
    Oval,
    Line,
}

/// An embedded OLE object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OleObject {
    pub source: MediaSource,
    /// ProgID of the embedded object (e.g. "Excel.Sheet.12")
    pub prog_id: String,
}

/// A standalone legacy checkbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckBox {
    pub name: String,
    pub label: String,
    pub checked: bool,
}

/// A legacy form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub kind: FormFieldKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormFieldKind {
    TextInput { default: String },
    DropDown { options: Vec<String> },
    CheckBox { checked: bool },
}

/// A structured document tag (content control)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sdt {
    pub kind: SdtKind,
    pub alias: Option<String>,
    pub tag: Option<String>,
    /// Placeholder or current content
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SdtKind {
    PlainText,
    ComboBox { options: Vec<String> },
    DatePicker { format: String },
}

/// Phonetic guide (ruby) text over a base run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruby {
    pub base: String,
    pub annotation: String,
    /// Annotation size in points
    pub annotation_size: Option<f32>,
}

/// A floating text box container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub children: Vec<Element>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}
