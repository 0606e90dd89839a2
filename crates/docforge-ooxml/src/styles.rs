//! Style cascade resolution and style property emission
//!
//! Effective formatting is resolved from four layers, highest precedence
//! first: the element's own inline style, a named-style reference, the
//! nearest container default, the document default. Emission is a sparse
//! diff: only properties actually set are written, so everything else
//! inherits at render time instead of being forced to explicit defaults.
//!
//! Named-style references that do not resolve are tolerated: the reference
//! is emitted as-is and the cascade simply skips the missing layer.

use docforge_model::{
    Border, BorderSet, CellStyle, Document, FontStyle, ParagraphStyle, RowStyle, StyleDefinition,
    TableStyle, TableWidth,
};

use crate::xml::{escape_xml, points_to_half_points};

/// Read-only view over a document's style layers
///
/// Resolution never mutates the styles it reads; every query builds a fresh
/// value.
pub struct StyleCascade<'a> {
    doc: &'a Document,
}

impl<'a> StyleCascade<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// The document default font layer, from global settings
    pub fn document_default_font(&self) -> FontStyle {
        FontStyle {
            name: Some(self.doc.settings.default_font_name.clone()),
            size: Some(self.doc.settings.default_font_size),
            ..Default::default()
        }
    }

    /// Resolve an effective font from all four layers
    pub fn effective_font(
        &self,
        inline: Option<&FontStyle>,
        named: Option<&str>,
        container: Option<&FontStyle>,
    ) -> FontStyle {
        let mut effective = self.document_default_font();
        if let Some(container) = container {
            effective = container.merged_over(&effective);
        }
        if let Some(named) = named.and_then(|n| self.doc.styles.font(n)) {
            effective = named.merged_over(&effective);
        }
        if let Some(inline) = inline {
            effective = inline.merged_over(&effective);
        }
        effective
    }

    /// The direct run formatting to materialize next to a named-style
    /// reference
    ///
    /// Container defaults have no OOXML encoding of their own; they are
    /// written as direct formatting, which outranks the `w:rStyle` reference
    /// at render time. Any property the named style defines is therefore
    /// dropped from the container layer before the inline layer is applied,
    /// so resolution stays inline over named over container.
    pub fn run_font_diff(
        &self,
        inline: Option<&FontStyle>,
        named: Option<&str>,
        container: Option<&FontStyle>,
    ) -> FontStyle {
        let masked = match (container, named.and_then(|n| self.doc.styles.font(n))) {
            (Some(container), Some(named)) => mask_defined(container, named),
            (Some(container), None) => container.clone(),
            (None, _) => FontStyle::default(),
        };
        match inline {
            Some(inline) => inline.merged_over(&masked),
            None => masked,
        }
    }

    /// Resolve an effective paragraph style; the document default layer for
    /// paragraphs is empty (everything is a schema default).
    pub fn effective_paragraph(
        &self,
        inline: Option<&ParagraphStyle>,
        named: Option<&str>,
        container: Option<&ParagraphStyle>,
    ) -> ParagraphStyle {
        let mut effective = ParagraphStyle::default();
        if let Some(container) = container {
            effective = container.merged_over(&effective);
        }
        if let Some(named) = named.and_then(|n| self.doc.styles.paragraph(n)) {
            effective = named.merged_over(&effective);
        }
        if let Some(inline) = inline {
            effective = inline.merged_over(&effective);
        }
        effective
    }
}

/// Drop from `base` every property `named` defines, leaving only the values
/// the style reference cannot supply
fn mask_defined(base: &FontStyle, named: &FontStyle) -> FontStyle {
    FontStyle {
        name: if named.name.is_some() { None } else { base.name.clone() },
        size: if named.size.is_some() { None } else { base.size },
        bold: if named.bold.is_some() { None } else { base.bold },
        italic: if named.italic.is_some() { None } else { base.italic },
        underline: if named.underline.is_some() {
            None
        } else {
            base.underline
        },
        strikethrough: if named.strikethrough.is_some() {
            None
        } else {
            base.strikethrough
        },
        vert_align: if named.vert_align.is_some() {
            None
        } else {
            base.vert_align
        },
        color: if named.color.is_some() {
            None
        } else {
            base.color.clone()
        },
        highlight: if named.highlight.is_some() {
            None
        } else {
            base.highlight.clone()
        },
        lang: if named.lang.is_some() {
            None
        } else {
            base.lang.clone()
        },
    }
}

/// Run properties (`w:rPr`); emits nothing when every property is unset and
/// no named character style is referenced
pub fn write_rpr(out: &mut String, font: &FontStyle, named: Option<&str>) {
    if font.is_empty() && named.is_none() {
        return;
    }
    out.push_str("<w:rPr>");
    if let Some(named) = named {
        out.push_str(&format!(r#"<w:rStyle w:val="{}"/>"#, escape_xml(named)));
    }
    if let Some(name) = &font.name {
        out.push_str(&format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}"/>"#,
            escape_xml(name)
        ));
    }
    if font.bold == Some(true) {
        out.push_str("<w:b/>");
    }
    if font.italic == Some(true) {
        out.push_str("<w:i/>");
    }
    if font.strikethrough == Some(true) {
        out.push_str("<w:strike/>");
    }
    if let Some(color) = &font.color {
        out.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_xml(color)));
    }
    if let Some(size) = font.size {
        let half = points_to_half_points(size);
        out.push_str(&format!(r#"<w:sz w:val="{}"/>"#, half));
        out.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, half));
    }
    if let Some(highlight) = &font.highlight {
        out.push_str(&format!(
            r#"<w:highlight w:val="{}"/>"#,
            escape_xml(highlight)
        ));
    }
    if let Some(underline) = font.underline {
        out.push_str(&format!(r#"<w:u w:val="{}"/>"#, underline.as_str()));
    }
    if let Some(vert) = font.vert_align {
        out.push_str(&format!(r#"<w:vertAlign w:val="{}"/>"#, vert.as_str()));
    }
    if let Some(lang) = &font.lang {
        out.push_str(&format!(r#"<w:lang w:val="{}"/>"#, escape_xml(lang)));
    }
    out.push_str("</w:rPr>");
}

/// Paragraph properties (`w:pPr`)
///
/// `numbering` is a resolved `(numId, level)` pair; `sect_pr` is a complete
/// `w:sectPr` block for in-body section breaks. The element is omitted when
/// there is nothing to write.
pub fn write_ppr(
    out: &mut String,
    para: &ParagraphStyle,
    named: Option<&str>,
    numbering: Option<(u32, u8)>,
    sect_pr: Option<&str>,
) {
    if para.is_empty() && named.is_none() && numbering.is_none() && sect_pr.is_none() {
        return;
    }
    out.push_str("<w:pPr>");
    if let Some(named) = named {
        out.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(named)));
    }
    if para.keep_next == Some(true) {
        out.push_str("<w:keepNext/>");
    }
    if para.keep_lines == Some(true) {
        out.push_str("<w:keepLines/>");
    }
    if para.page_break_before == Some(true) {
        out.push_str("<w:pageBreakBefore/>");
    }
    match para.widow_control {
        Some(true) => out.push_str("<w:widowControl/>"),
        Some(false) => out.push_str(r#"<w:widowControl w:val="0"/>"#),
        None => {}
    }
    if let Some((num_id, level)) = numbering {
        out.push_str("<w:numPr>");
        out.push_str(&format!(r#"<w:ilvl w:val="{}"/>"#, level));
        out.push_str(&format!(r#"<w:numId w:val="{}"/>"#, num_id));
        out.push_str("</w:numPr>");
    }
    if !para.tabs.is_empty() {
        out.push_str("<w:tabs>");
        for tab in &para.tabs {
            out.push_str(&format!(
                r#"<w:tab w:val="{}" w:pos="{}""#,
                tab.alignment.as_str(),
                tab.position
            ));
            if let Some(leader) = tab.leader {
                out.push_str(&format!(r#" w:leader="{}""#, leader.as_str()));
            }
            out.push_str("/>");
        }
        out.push_str("</w:tabs>");
    }
    if para.space_before.is_some() || para.space_after.is_some() || para.line_spacing.is_some() {
        out.push_str("<w:spacing");
        if let Some(before) = para.space_before {
            out.push_str(&format!(r#" w:before="{}""#, before));
        }
        if let Some(after) = para.space_after {
            out.push_str(&format!(r#" w:after="{}""#, after));
        }
        if let Some(line) = para.line_spacing {
            out.push_str(&format!(r#" w:line="{}" w:lineRule="auto""#, line));
        }
        out.push_str("/>");
    }
    if para.indent_start.is_some()
        || para.indent_end.is_some()
        || para.hanging.is_some()
        || para.first_line.is_some()
    {
        out.push_str("<w:ind");
        if let Some(start) = para.indent_start {
            out.push_str(&format!(r#" w:start="{}""#, start));
        }
        if let Some(end) = para.indent_end {
            out.push_str(&format!(r#" w:end="{}""#, end));
        }
        if let Some(hanging) = para.hanging {
            out.push_str(&format!(r#" w:hanging="{}""#, hanging));
        }
        if let Some(first) = para.first_line {
            out.push_str(&format!(r#" w:firstLine="{}""#, first));
        }
        out.push_str("/>");
    }
    if let Some(alignment) = para.alignment {
        out.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.as_str()));
    }
    if let Some(sect_pr) = sect_pr {
        out.push_str(sect_pr);
    }
    out.push_str("</w:pPr>");
}

/// One border edge, e.g. `<w:top w:val="single" w:sz="4" w:space="0" w:color="000000"/>`
fn write_border(out: &mut String, tag: &str, border: &Border) {
    out.push_str(&format!(
        r#"<w:{} w:val="{}" w:sz="{}" w:space="{}" w:color="{}"/>"#,
        tag,
        border.style.as_str(),
        border.size,
        border.space,
        escape_xml(&border.color)
    ));
}

/// The four edges of a border set, in schema order
pub(crate) fn write_border_set(out: &mut String, borders: &BorderSet) {
    if let Some(top) = &borders.top {
        write_border(out, "top", top);
    }
    if let Some(start) = &borders.start {
        write_border(out, "start", start);
    }
    if let Some(bottom) = &borders.bottom {
        write_border(out, "bottom", bottom);
    }
    if let Some(end) = &borders.end {
        write_border(out, "end", end);
    }
}

/// Table properties (`w:tblPr`); always emitted since a table carries at
/// least its width declaration
pub fn write_tblpr(out: &mut String, style: &TableStyle, named: Option<&str>) {
    out.push_str("<w:tblPr>");
    if let Some(named) = named {
        out.push_str(&format!(r#"<w:tblStyle w:val="{}"/>"#, escape_xml(named)));
    }
    match style.width {
        Some(TableWidth::Pct(pct)) => {
            out.push_str(&format!(r#"<w:tblW w:w="{}" w:type="pct"/>"#, pct));
        }
        Some(TableWidth::Twips(twips)) => {
            out.push_str(&format!(r#"<w:tblW w:w="{}" w:type="dxa"/>"#, twips));
        }
        Some(TableWidth::Auto) | None => {
            out.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
        }
    }
    if let Some(alignment) = style.alignment {
        out.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.as_str()));
    }
    if !style.borders.is_empty() || style.inside_h.is_some() || style.inside_v.is_some() {
        out.push_str("<w:tblBorders>");
        write_border_set(out, &style.borders);
        if let Some(inside_h) = &style.inside_h {
            write_border(out, "insideH", inside_h);
        }
        if let Some(inside_v) = &style.inside_v {
            write_border(out, "insideV", inside_v);
        }
        out.push_str("</w:tblBorders>");
    }
    if let Some(fill) = &style.shading {
        out.push_str(&format!(
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            escape_xml(fill)
        ));
    }
    if let Some([top, start, bottom, end]) = style.cell_margins {
        out.push_str("<w:tblCellMar>");
        out.push_str(&format!(r#"<w:top w:w="{}" w:type="dxa"/>"#, top));
        out.push_str(&format!(r#"<w:start w:w="{}" w:type="dxa"/>"#, start));
        out.push_str(&format!(r#"<w:bottom w:w="{}" w:type="dxa"/>"#, bottom));
        out.push_str(&format!(r#"<w:end w:w="{}" w:type="dxa"/>"#, end));
        out.push_str("</w:tblCellMar>");
    }
    out.push_str("</w:tblPr>");
}

/// Row properties (`w:trPr`); omitted when nothing is set
pub fn write_trpr(out: &mut String, style: &RowStyle) {
    if style.height.is_none() && !style.table_header && !style.cant_split {
        return;
    }
    out.push_str("<w:trPr>");
    if style.cant_split {
        out.push_str("<w:cantSplit/>");
    }
    if let Some(height) = style.height {
        out.push_str(&format!(
            r#"<w:trHeight w:val="{}" w:hRule="atLeast"/>"#,
            height
        ));
    }
    if style.table_header {
        out.push_str("<w:tblHeader/>");
    }
    out.push_str("</w:trPr>");
}

/// Cell properties (`w:tcPr`)
pub fn write_tcpr(out: &mut String, style: &CellStyle) {
    out.push_str("<w:tcPr>");
    if let Some(width) = style.width {
        out.push_str(&format!(r#"<w:tcW w:w="{}" w:type="dxa"/>"#, width));
    }
    if let Some(span) = style.grid_span {
        out.push_str(&format!(r#"<w:gridSpan w:val="{}"/>"#, span));
    }
    match style.v_merge {
        Some(docforge_model::VMerge::Restart) => {
            out.push_str(r#"<w:vMerge w:val="restart"/>"#);
        }
        Some(docforge_model::VMerge::Continue) => {
            out.push_str(r#"<w:vMerge w:val="continue"/>"#);
        }
        None => {}
    }
    if !style.borders.is_empty() {
        out.push_str("<w:tcBorders>");
        write_border_set(out, &style.borders);
        out.push_str("</w:tcBorders>");
    }
    if let Some(fill) = &style.shading {
        out.push_str(&format!(
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            escape_xml(fill)
        ));
    }
    if let Some([top, start, bottom, end]) = style.margins {
        out.push_str("<w:tcMar>");
        out.push_str(&format!(r#"<w:top w:w="{}" w:type="dxa"/>"#, top));
        out.push_str(&format!(r#"<w:start w:w="{}" w:type="dxa"/>"#, start));
        out.push_str(&format!(r#"<w:bottom w:w="{}" w:type="dxa"/>"#, bottom));
        out.push_str(&format!(r#"<w:end w:w="{}" w:type="dxa"/>"#, end));
        out.push_str("</w:tcMar>");
    }
    if let Some(valign) = style.vertical_align {
        out.push_str(&format!(r#"<w:vAlign w:val="{}"/>"#, valign.as_str()));
    }
    out.push_str("</w:tcPr>");
}

/// The `word/styles.xml` part: docDefaults from global settings plus every
/// named font/paragraph/table style. Numbering definitions live in the
/// numbering part instead.
pub fn styles_part_xml(doc: &Document) -> String {
    let mut xml = String::new();
    xml.push_str(crate::xml::XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<w:styles xmlns:w="{}">"#,
        crate::xml::NS_WORDML
    ));

    let default_half = points_to_half_points(doc.settings.default_font_size);
    xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
    xml.push_str(&format!(
        r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}"/>"#,
        escape_xml(&doc.settings.default_font_name)
    ));
    xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, default_half));
    xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, default_half));
    xml.push_str("</w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>");

    xml.push_str(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>"#,
    );

    for (name, definition) in doc.styles.iter() {
        match definition {
            StyleDefinition::Font(font) => {
                xml.push_str(&format!(
                    r#"<w:style w:type="character" w:styleId="{0}"><w:name w:val="{0}"/>"#,
                    escape_xml(name)
                ));
                write_rpr(&mut xml, font, None);
                xml.push_str("</w:style>");
            }
            StyleDefinition::Paragraph { font, paragraph } => {
                xml.push_str(&format!(
                    r#"<w:style w:type="paragraph" w:styleId="{0}"><w:name w:val="{0}"/><w:basedOn w:val="Normal"/>"#,
                    escape_xml(name)
                ));
                write_ppr(&mut xml, paragraph, None, None, None);
                write_rpr(&mut xml, font, None);
                xml.push_str("</w:style>");
            }
            StyleDefinition::Table(table) => {
                xml.push_str(&format!(
                    r#"<w:style w:type="table" w:styleId="{0}"><w:name w:val="{0}"/>"#,
                    escape_xml(name)
                ));
                write_tblpr(&mut xml, table, None);
                xml.push_str("</w:style>");
            }
            StyleDefinition::Numbering(_) => {}
        }
    }

    xml.push_str("</w:styles>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use docforge_model::{Alignment, Underline, VertAlign};

    fn doc_with_styles() -> Document {
        let mut doc = Document::new();
        doc.styles.define(
            "Strong",
            StyleDefinition::Font(FontStyle {
                bold: Some(true),
                size: Some(12.0),
                ..Default::default()
            }),
        );
        doc
    }

    #[test]
    fn test_cascade_precedence_inline_over_named() {
        let doc = doc_with_styles();
        let cascade = StyleCascade::new(&doc);
        let inline = FontStyle {
            size: Some(16.0),
            ..Default::default()
        };
        let effective = cascade.effective_font(Some(&inline), Some("Strong"), None);
        // inline size beats the named style's, named bold survives
        assert_eq!(effective.size, Some(16.0));
        assert_eq!(effective.bold, Some(true));
        // document default fills the rest
        assert_eq!(effective.name.as_deref(), Some("Arial"));
    }

    #[test]
    fn test_cascade_container_layer() {
        let doc = Document::new();
        let cascade = StyleCascade::new(&doc);
        let container = FontStyle {
            italic: Some(true),
            size: Some(9.0),
            ..Default::default()
        };
        let inline = FontStyle {
            size: Some(11.0),
            ..Default::default()
        };
        let effective = cascade.effective_font(Some(&inline), None, Some(&container));
        assert_eq!(effective.italic, Some(true));
        assert_eq!(effective.size, Some(11.0));
    }

    #[test]
    fn test_cascade_missing_named_style_is_tolerated() {
        let doc = Document::new();
        let cascade = StyleCascade::new(&doc);
        let effective = cascade.effective_font(None, Some("DoesNotExist"), None);
        assert_eq!(effective.name.as_deref(), Some("Arial"));
        assert_eq!(effective.bold, None);
    }

    #[test]
    fn test_run_font_diff_masks_named_properties() {
        let mut doc = Document::new();
        doc.styles.define(
            "Plain",
            StyleDefinition::Font(FontStyle {
                italic: Some(false),
                ..Default::default()
            }),
        );
        let cascade = StyleCascade::new(&doc);
        let container = FontStyle {
            italic: Some(true),
            bold: Some(true),
            ..Default::default()
        };

        // the named style defines italic, so the container value must not be
        // written as direct formatting; bold passes through
        let diff = cascade.run_font_diff(None, Some("Plain"), Some(&container));
        assert_eq!(diff.italic, None);
        assert_eq!(diff.bold, Some(true));

        // inline still outranks the named layer
        let inline = FontStyle {
            italic: Some(true),
            ..Default::default()
        };
        let diff = cascade.run_font_diff(Some(&inline), Some("Plain"), Some(&container));
        assert_eq!(diff.italic, Some(true));
    }

    #[test]
    fn test_run_font_diff_without_named_passes_container() {
        let doc = Document::new();
        let cascade = StyleCascade::new(&doc);
        let container = FontStyle {
            italic: Some(true),
            ..Default::default()
        };
        let diff = cascade.run_font_diff(None, None, Some(&container));
        assert_eq!(diff.italic, Some(true));
    }

    #[test]
    fn test_rpr_sparse_diff() {
        let font = FontStyle {
            bold: Some(true),
            size: Some(14.0),
            color: Some("FF0000".into()),
            ..Default::default()
        };
        let mut out = String::new();
        write_rpr(&mut out, &font, None);
        assert!(out.contains("<w:b/>"));
        assert!(out.contains(r#"<w:sz w:val="28"/>"#));
        assert!(out.contains(r#"<w:color w:val="FF0000"/>"#));
        // nothing else was set, nothing else is emitted
        assert!(!out.contains("<w:i"));
        assert!(!out.contains("<w:u "));
        assert!(!out.contains("rFonts"));
        assert!(!out.contains("highlight"));
    }

    #[test]
    fn test_rpr_empty_emits_nothing() {
        let mut out = String::new();
        write_rpr(&mut out, &FontStyle::default(), None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_rpr_vert_align_and_underline() {
        let font = FontStyle {
            underline: Some(Underline::Single),
            vert_align: Some(VertAlign::Superscript),
            ..Default::default()
        };
        let mut out = String::new();
        write_rpr(&mut out, &font, None);
        assert!(out.contains(r#"<w:u w:val="single"/>"#));
        assert!(out.contains(r#"<w:vertAlign w:val="superscript"/>"#));
    }

    #[test]
    fn test_ppr_pagination_flags() {
        let para = ParagraphStyle {
            alignment: Some(Alignment::Center),
            keep_next: Some(true),
            widow_control: Some(false),
            ..Default::default()
        };
        let mut out = String::new();
        write_ppr(&mut out, &para, None, None, None);
        assert!(out.contains("<w:keepNext/>"));
        assert!(out.contains(r#"<w:widowControl w:val="0"/>"#));
        assert!(out.contains(r#"<w:jc w:val="center"/>"#));
    }

    #[test]
    fn test_ppr_empty_emits_nothing() {
        let mut out = String::new();
        write_ppr(&mut out, &ParagraphStyle::default(), None, None, None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_tcpr_grid_span() {
        let style = CellStyle {
            grid_span: Some(2),
            ..Default::default()
        };
        let mut out = String::new();
        write_tcpr(&mut out, &style);
        assert!(out.contains(r#"<w:gridSpan w:val="2"/>"#));
    }

    #[test]
    fn test_styles_part_contains_defaults_and_styles() {
        let doc = doc_with_styles();
        let xml = styles_part_xml(&doc);
        assert!(xml.contains("<w:docDefaults>"));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Arial" w:hAnsi="Arial"/>"#));
        assert!(xml.contains(r#"w:styleId="Strong""#));
        assert!(xml.contains(r#"w:type="character""#));
    }
}
