//! Sections, headers/footers, and page setup

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::style::{BorderSet, NumberFormat};

/// One section of a document: a run of content plus its page setup
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    pub elements: Vec<Element>,
    /// Headers keyed by kind; at most one of each
    pub headers: Vec<(HeaderFooterKind, HeaderFooter)>,
    /// Zero or one footer
    pub footer: Option<HeaderFooter>,
    pub settings: SectionSettings,
}

impl Section {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Default::default()
        }
    }

    /// Attach a header, replacing any existing header of the same kind
    pub fn set_header(&mut self, kind: HeaderFooterKind, header: HeaderFooter) {
        if let Some(slot) = self.headers.iter_mut().find(|(k, _)| *k == kind) {
            slot.1 = header;
        } else {
            self.headers.push((kind, header));
        }
    }

    pub fn header(&self, kind: HeaderFooterKind) -> Option<&HeaderFooter> {
        self.headers
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, h)| h)
    }
}

/// Which pages a header applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderFooterKind {
    /// Odd pages (the default header)
    Default,
    /// First page of the section
    First,
    /// Even pages
    Even,
}

impl HeaderFooterKind {
    /// Value of the `w:type` attribute on the header/footer reference
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderFooterKind::Default => "default",
            HeaderFooterKind::First => "first",
            HeaderFooterKind::Even => "even",
        }
    }
}

/// Header or footer content; a container for block elements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeaderFooter {
    pub elements: Vec<Element>,
}

impl HeaderFooter {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// How a section starts relative to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionBreak {
    #[default]
    NextPage,
    Continuous,
    EvenPage,
    OddPage,
}

impl SectionBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionBreak::NextPage => "nextPage",
            SectionBreak::Continuous => "continuous",
            SectionBreak::EvenPage => "evenPage",
            SectionBreak::OddPage => "oddPage",
        }
    }
}

/// Page margins in twips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margins {
    fn default() -> Self {
        // One inch on every side
        Self {
            top: 1440,
            right: 1440,
            bottom: 1440,
            left: 1440,
        }
    }
}

/// Page borders for a section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageBorders {
    pub borders: BorderSet,
}

/// Per-section page setup
///
/// Sizes and distances are in twips. Defaults describe an A4 portrait page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSettings {
    pub page_width: u32,
    pub page_height: u32,
    pub orientation: Orientation,
    pub margins: Margins,
    /// Distance from the page edge to the header
    pub header_height: u32,
    /// Distance from the page edge to the footer
    pub footer_height: u32,
    pub gutter: u32,
    /// Number of text columns
    pub column_count: u32,
    /// Spacing between columns, twips
    pub column_spacing: u32,
    pub break_type: SectionBreak,
    /// Restart page numbering at this value
    pub page_number_start: Option<u32>,
    /// Distinct first-page header/footer
    pub title_page: bool,
    pub page_borders: Option<PageBorders>,
    /// Override the document-wide footnote properties for this section
    pub footnote_properties: Option<NoteProperties>,
    /// Override the document-wide endnote properties for this section
    pub endnote_properties: Option<NoteProperties>,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            page_width: 11906,
            page_height: 16838,
            orientation: Orientation::Portrait,
            margins: Margins::default(),
            header_height: 720,
            footer_height: 720,
            gutter: 0,
            column_count: 1,
            column_spacing: 720,
            break_type: SectionBreak::NextPage,
            page_number_start: None,
            title_page: false,
            page_borders: None,
            footnote_properties: None,
            endnote_properties: None,
        }
    }
}

impl SectionSettings {
    /// Swap width and height and flip the orientation flag
    pub fn landscape(mut self) -> Self {
        if self.orientation == Orientation::Portrait {
            std::mem::swap(&mut self.page_width, &mut self.page_height);
            self.orientation = Orientation::Landscape;
        }
        self
    }
}

/// Where notes are placed on the page or in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotePosition {
    BeneathText,
    PageBottom,
    SectionEnd,
    DocEnd,
}

impl NotePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotePosition::BeneathText => "beneathText",
            NotePosition::PageBottom => "pageBottom",
            NotePosition::SectionEnd => "sectEnd",
            NotePosition::DocEnd => "docEnd",
        }
    }
}

/// When displayed note numbering restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteRestart {
    Continuous,
    EachSection,
    /// Requires a pagination pass to compute; the directive is persisted to
    /// the output and resolved by the rendering application
    EachPage,
}

impl NoteRestart {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteRestart::Continuous => "continuous",
            NoteRestart::EachSection => "eachSect",
            NoteRestart::EachPage => "eachPage",
        }
    }
}

/// Footnote or endnote numbering properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteProperties {
    pub position: NotePosition,
    pub number_format: NumberFormat,
    pub number_start: u32,
    pub restart: NoteRestart,
}

impl NoteProperties {
    /// Word's defaults for footnotes
    pub fn footnote_default() -> Self {
        Self {
            position: NotePosition::PageBottom,
            number_format: NumberFormat::Decimal,
            number_start: 1,
            restart: NoteRestart::Continuous,
        }
    }

    /// Word's defaults for endnotes
    pub fn endnote_default() -> Self {
        Self {
            position: NotePosition::DocEnd,
            number_format: NumberFormat::LowerRoman,
            number_start: 1,
            restart: NoteRestart::Continuous,
        }
    }
}
