//! Style value types
//!
//! Styles are plain value records: every property is optional, and an unset
//! property means "inherit". The writers emit only the properties that are
//! actually set, so an element never forces an explicit default into the
//! output. Styles are never mutated by the writers; cascading produces new
//! values instead.

use serde::{Deserialize, Serialize};

/// Character-level formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontStyle {
    /// Font family name
    pub name: Option<String>,
    /// Font size in points
    pub size: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<Underline>,
    pub strikethrough: Option<bool>,
    /// Superscript / subscript
    pub vert_align: Option<VertAlign>,
    /// Text color as an RRGGBB hex string
    pub color: Option<String>,
    /// Highlight color name (e.g. "yellow")
    pub highlight: Option<String>,
    /// Language tag (e.g. "en-US")
    pub lang: Option<String>,
}

impl FontStyle {
    /// Overlay `self` on top of `base`: set properties win, unset properties
    /// fall through to the base layer.
    pub fn merged_over(&self, base: &FontStyle) -> FontStyle {
        FontStyle {
            name: self.name.clone().or_else(|| base.name.clone()),
            size: self.size.or(base.size),
            bold: self.bold.or(base.bold),
            italic: self.italic.or(base.italic),
            underline: self.underline.or(base.underline),
            strikethrough: self.strikethrough.or(base.strikethrough),
            vert_align: self.vert_align.or(base.vert_align),
            color: self.color.clone().or_else(|| base.color.clone()),
            highlight: self.highlight.clone().or_else(|| base.highlight.clone()),
            lang: self.lang.clone().or_else(|| base.lang.clone()),
        }
    }

    /// True if no property is set
    pub fn is_empty(&self) -> bool {
        *self == FontStyle::default()
    }
}

/// Underline patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Underline {
    Single,
    Double,
    Dotted,
    Dash,
    Wavy,
}

impl Underline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Underline::Single => "single",
            Underline::Double => "double",
            Underline::Dotted => "dotted",
            Underline::Dash => "dash",
            Underline::Wavy => "wave",
        }
    }
}

/// Vertical run alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertAlign {
    Superscript,
    Subscript,
}

impl VertAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VertAlign::Superscript => "superscript",
            VertAlign::Subscript => "subscript",
        }
    }
}

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distribute,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
            Alignment::Distribute => "distribute",
        }
    }
}

/// Paragraph-level formatting
///
/// Spacing and indentation values are in twips (twentieths of a point).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParagraphStyle {
    pub alignment: Option<Alignment>,
    /// Space before the paragraph, twips
    pub space_before: Option<u32>,
    /// Space after the paragraph, twips
    pub space_after: Option<u32>,
    /// Line height in 240ths of a line
    pub line_spacing: Option<u32>,
    /// Start (left) indentation, twips
    pub indent_start: Option<i32>,
    /// End (right) indentation, twips
    pub indent_end: Option<i32>,
    /// Hanging indentation, twips
    pub hanging: Option<u32>,
    /// First-line indentation, twips
    pub first_line: Option<u32>,
    pub tabs: Vec<TabStop>,
    /// Pagination: prevent widows/orphans
    pub widow_control: Option<bool>,
    /// Pagination: keep with the next paragraph
    pub keep_next: Option<bool>,
    /// Pagination: keep all lines on one page
    pub keep_lines: Option<bool>,
    /// Pagination: force a page break before the paragraph
    pub page_break_before: Option<bool>,
}

impl ParagraphStyle {
    /// Overlay `self` on top of `base`
    pub fn merged_over(&self, base: &ParagraphStyle) -> ParagraphStyle {
        ParagraphStyle {
            alignment: self.alignment.or(base.alignment),
            space_before: self.space_before.or(base.space_before),
            space_after: self.space_after.or(base.space_after),
            line_spacing: self.line_spacing.or(base.line_spacing),
            indent_start: self.indent_start.or(base.indent_start),
            indent_end: self.indent_end.or(base.indent_end),
            hanging: self.hanging.or(base.hanging),
            first_line: self.first_line.or(base.first_line),
            tabs: if self.tabs.is_empty() {
                base.tabs.clone()
            } else {
                self.tabs.clone()
            },
            widow_control: self.widow_control.or(base.widow_control),
            keep_next: self.keep_next.or(base.keep_next),
            keep_lines: self.keep_lines.or(base.keep_lines),
            page_break_before: self.page_break_before.or(base.page_break_before),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ParagraphStyle::default()
    }
}

/// A tab stop definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabStop {
    pub alignment: TabAlignment,
    pub leader: Option<TabLeader>,
    /// Position from the start margin, twips
    pub position: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabAlignment {
    Left,
    Center,
    Right,
    Decimal,
}

impl TabAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabAlignment::Left => "left",
            TabAlignment::Center => "center",
            TabAlignment::Right => "right",
            TabAlignment::Decimal => "decimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabLeader {
    Dot,
    Hyphen,
    Underscore,
}

impl TabLeader {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabLeader::Dot => "dot",
            TabLeader::Hyphen => "hyphen",
            TabLeader::Underscore => "underscore",
        }
    }
}

/// A single border line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub style: BorderStyle,
    /// Line width in eighths of a point
    pub size: u32,
    /// RRGGBB hex color, or "auto"
    pub color: String,
    /// Spacing offset in points
    pub space: u32,
}

impl Border {
    pub fn single(size: u32, color: impl Into<String>) -> Self {
        Self {
            style: BorderStyle::Single,
            size,
            color: color.into(),
            space: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderStyle {
    Single,
    Double,
    Dashed,
    Dotted,
    None,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::Single => "single",
            BorderStyle::Double => "double",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::None => "none",
        }
    }
}

/// Borders for the four sides of a table, cell, or page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BorderSet {
    pub top: Option<Border>,
    pub start: Option<Border>,
    pub bottom: Option<Border>,
    pub end: Option<Border>,
}

impl BorderSet {
    pub fn all(border: Border) -> Self {
        Self {
            top: Some(border.clone()),
            start: Some(border.clone()),
            bottom: Some(border.clone()),
            end: Some(border),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.start.is_none() && self.bottom.is_none() && self.end.is_none()
    }
}

/// Table width specification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TableWidth {
    Auto,
    /// Fiftieths of a percent (5000 = 100%)
    Pct(u32),
    /// Absolute width in twips
    Twips(u32),
}

/// Table-level formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableStyle {
    pub width: Option<TableWidth>,
    pub alignment: Option<Alignment>,
    /// Outer borders
    pub borders: BorderSet,
    /// Borders between rows / columns
    pub inside_h: Option<Border>,
    pub inside_v: Option<Border>,
    /// Default cell margins, twips: top, start, bottom, end
    pub cell_margins: Option<[u32; 4]>,
    /// RRGGBB hex background fill
    pub shading: Option<String>,
}

/// Row-level formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowStyle {
    /// Row height, twips
    pub height: Option<u32>,
    /// Repeat this row as a table header on every page
    pub table_header: bool,
    /// Forbid splitting the row across pages
    pub cant_split: bool,
}

/// Vertical cell-merge directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VMerge {
    /// Start a new merged region
    Restart,
    /// Continue the merged region from the cell above
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

/// Cell-level formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellStyle {
    /// Cell width, twips
    pub width: Option<u32>,
    pub borders: BorderSet,
    /// Cell margins, twips: top, start, bottom, end
    pub margins: Option<[u32; 4]>,
    /// RRGGBB hex background fill
    pub shading: Option<String>,
    /// Horizontal span over this many grid columns
    pub grid_span: Option<u32>,
    pub v_merge: Option<VMerge>,
    pub vertical_align: Option<VerticalAlign>,
}

/// Number format tokens shared by list numbering and note numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberFormat {
    #[default]
    Decimal,
    LowerRoman,
    UpperRoman,
    LowerLetter,
    UpperLetter,
    Ordinal,
    CardinalText,
    OrdinalText,
    Chicago,
    DecimalEnclosedCircle,
    DecimalEnclosedParen,
    Bullet,
    None,
}

impl NumberFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::Ordinal => "ordinal",
            NumberFormat::CardinalText => "cardinalText",
            NumberFormat::OrdinalText => "ordinalText",
            NumberFormat::Chicago => "chicago",
            NumberFormat::DecimalEnclosedCircle => "decimalEnclosedCircle",
            NumberFormat::DecimalEnclosedParen => "decimalEnclosedParen",
            NumberFormat::Bullet => "bullet",
            NumberFormat::None => "none",
        }
    }
}

/// One level of a multi-level numbering definition (at most nine levels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberingLevel {
    pub format: NumberFormat,
    /// Number text pattern, e.g. "%1." or a bullet glyph
    pub text: String,
    /// Restart value for this level
    pub start: u32,
    /// Left indentation, twips
    pub indent: Option<u32>,
    /// Hanging indentation, twips
    pub hanging: Option<u32>,
    /// Paragraph style bound to this level
    pub paragraph_style: Option<String>,
}

impl NumberingLevel {
    pub fn new(format: NumberFormat, text: impl Into<String>) -> Self {
        Self {
            format,
            text: text.into(),
            start: 1,
            indent: None,
            hanging: None,
            paragraph_style: None,
        }
    }
}

/// A named multi-level list-formatting rule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberingStyle {
    pub levels: Vec<NumberingLevel>,
}

impl NumberingStyle {
    /// Maximum number of levels a definition may carry
    pub const MAX_LEVELS: usize = 9;

    pub fn new(levels: Vec<NumberingLevel>) -> Self {
        Self { levels }
    }
}

/// A named style definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleDefinition {
    /// Character style
    Font(FontStyle),
    /// Paragraph style (carries both paragraph and run formatting)
    Paragraph {
        font: FontStyle,
        paragraph: ParagraphStyle,
    },
    /// Table style
    Table(TableStyle),
    /// Numbering definition
    Numbering(NumberingStyle),
}

/// Named style registry, keyed by unique name
///
/// Insertion order is preserved so the styles part is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Styles {
    entries: Vec<(String, StyleDefinition)>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a style. Re-defining a name replaces the earlier definition so
    /// each name is defined exactly once.
    pub fn define(&mut self, name: impl Into<String>, definition: StyleDefinition) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = definition;
        } else {
            self.entries.push((name, definition));
        }
    }

    pub fn get(&self, name: &str) -> Option<&StyleDefinition> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    pub fn font(&self, name: &str) -> Option<&FontStyle> {
        match self.get(name) {
            Some(StyleDefinition::Font(f)) => Some(f),
            Some(StyleDefinition::Paragraph { font, .. }) => Some(font),
            _ => None,
        }
    }

    pub fn paragraph(&self, name: &str) -> Option<&ParagraphStyle> {
        match self.get(name) {
            Some(StyleDefinition::Paragraph { paragraph, .. }) => Some(paragraph),
            _ => None,
        }
    }

    pub fn numbering(&self, name: &str) -> Option<&NumberingStyle> {
        match self.get(name) {
            Some(StyleDefinition::Numbering(n)) => Some(n),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleDefinition)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
