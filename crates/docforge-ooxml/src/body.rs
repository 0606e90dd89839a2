//! Element writers
//!
//! One writer per element kind, dispatched from a single exhaustive match so
//! an element without a writer is a compile error, not a silently dropped
//! construct. Containers recurse through the same dispatch. The `without_p`
//! flag on [`Scope`] marks that the writer is already inside an enclosing
//! paragraph, so nested runs and text do not double-wrap in `<w:p>`.

use docforge_model::{
    Bookmark, Cell, ChangeKind, CheckBox, Element, Field, FontStyle, FormField, FormFieldKind,
    Hyperlink, Image, LinkTarget, ListItem, OleObject, Ruby, Sdt, SdtKind, Shape, ShapeKind,
    Table, TableWidth, Text, TextBox, TextRun, TrackChange,
};

use crate::context::{PartBuffer, WriteContext};
use crate::error::Result;
use crate::rels::RelKind;
use crate::styles::{write_ppr, write_rpr, write_tblpr, write_tcpr, write_trpr};
use crate::xml::{escape_xml, pixels_to_emu, points_to_half_points};

/// Traversal position handed down through container recursion
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope<'s> {
    /// Already inside an enclosing paragraph
    pub without_p: bool,
    /// Run formatting defaults inherited from the nearest container
    pub container_font: Option<&'s FontStyle>,
}

/// Dispatch an element to its writer
pub fn write_element(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    element: &Element,
    scope: Scope<'_>,
) -> Result<()> {
    match element {
        Element::Text(text) => write_text(ctx, part, text, scope),
        Element::TextRun(run) => write_text_run(ctx, part, run, scope),
        Element::ListItem(item) => write_list_item(ctx, part, item, scope),
        Element::Table(table) => write_table(ctx, part, table),
        Element::Image(image) => write_image(ctx, part, image, scope),
        Element::Link(link) => write_link(ctx, part, link, scope),
        Element::Bookmark(bookmark) => write_bookmark(ctx, part, bookmark, scope),
        Element::Field(field) => write_field(ctx, part, field, scope),
        Element::FootnoteRef(note) => write_note_ref(ctx, part, note.0, true, scope),
        Element::EndnoteRef(note) => write_note_ref(ctx, part, note.0, false, scope),
        Element::Toc(toc) => {
            ctx.toc_seen = true;
            write_toc(part, toc.min_depth, toc.max_depth)
        }
        Element::Shape(shape) => write_shape(part, shape, scope),
        Element::Object(object) => write_object(ctx, part, object, scope),
        Element::CheckBox(checkbox) => write_checkbox(ctx, part, checkbox, scope),
        Element::FormField(field) => write_form_field(ctx, part, field, scope),
        Element::StructuredDocumentTag(sdt) => write_sdt(part, sdt, scope),
        Element::TextBreak => write_break(part, None, scope),
        Element::PageBreak => write_break(part, Some("page"), scope),
        Element::Ruby(ruby) => write_ruby(part, ruby, scope),
        Element::TextBox(textbox) => write_text_box(ctx, part, textbox, scope),
    }
}

/// Write a sequence of elements under the same scope
pub fn write_children(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    children: &[Element],
    scope: Scope<'_>,
) -> Result<()> {
    for child in children {
        write_element(ctx, part, child, scope)?;
    }
    Ok(())
}

fn open_change(ctx: &mut WriteContext<'_>, part: &mut PartBuffer, change: &Option<TrackChange>) {
    if let Some(change) = change {
        let id = ctx.ids.revision.allocate();
        let tag = match change.kind {
            ChangeKind::Inserted => "w:ins",
            ChangeKind::Deleted => "w:del",
        };
        part.xml.push_str(&format!(
            r#"<{} w:id="{}" w:author="{}""#,
            tag,
            id,
            escape_xml(&change.author)
        ));
        if let Some(date) = &change.date {
            part.xml
                .push_str(&format!(r#" w:date="{}""#, escape_xml(date)));
        }
        part.xml.push('>');
    }
}

fn close_change(part: &mut PartBuffer, change: &Option<TrackChange>) {
    if let Some(change) = change {
        part.xml.push_str(match change.kind {
            ChangeKind::Inserted => "</w:ins>",
            ChangeKind::Deleted => "</w:del>",
        });
    }
}

fn write_comment_start(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    index: Option<usize>,
) -> Result<()> {
    if let Some(index) = index {
        let id = ctx.comment_id(index)?;
        part.xml
            .push_str(&format!(r#"<w:commentRangeStart w:id="{}"/>"#, id));
    }
    Ok(())
}

fn write_comment_end(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    index: Option<usize>,
) -> Result<()> {
    if let Some(index) = index {
        let id = ctx.comment_id(index)?;
        part.xml
            .push_str(&format!(r#"<w:commentRangeEnd w:id="{}"/>"#, id));
        part.xml.push_str(&format!(
            r#"<w:r><w:commentReference w:id="{}"/></w:r>"#,
            id
        ));
    }
    Ok(())
}

fn write_text(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    text: &Text,
    scope: Scope<'_>,
) -> Result<()> {
    if !scope.without_p {
        part.xml.push_str("<w:p>");
        write_ppr(
            &mut part.xml,
            text.paragraph.as_ref().unwrap_or(&Default::default()),
            text.paragraph_style.as_deref(),
            None,
            None,
        );
    }
    write_comment_start(ctx, part, text.comment_start)?;
    open_change(ctx, part, &text.change);

    part.xml.push_str("<w:r>");
    // the named layer stays a reference; only the inline-over-container diff
    // is materialized as direct formatting
    let font = ctx.cascade.run_font_diff(
        text.font.as_ref(),
        text.font_style.as_deref(),
        scope.container_font,
    );
    write_rpr(&mut part.xml, &font, text.font_style.as_deref());
    let deleted = matches!(
        text.change,
        Some(TrackChange {
            kind: ChangeKind::Deleted,
            ..
        })
    );
    let tag = if deleted { "w:delText" } else { "w:t" };
    part.xml.push_str(&format!(
        r#"<{0} xml:space="preserve">{1}</{0}>"#,
        tag,
        escape_xml(&text.content)
    ));
    part.xml.push_str("</w:r>");

    close_change(part, &text.change);
    write_comment_end(ctx, part, text.comment_end)?;
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_text_run(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    run: &TextRun,
    scope: Scope<'_>,
) -> Result<()> {
    if !scope.without_p {
        part.xml.push_str("<w:p>");
        write_ppr(
            &mut part.xml,
            run.paragraph.as_ref().unwrap_or(&Default::default()),
            run.paragraph_style.as_deref(),
            None,
            None,
        );
    }
    write_comment_start(ctx, part, run.comment_start)?;
    open_change(ctx, part, &run.change);

    // the run's font becomes the container default for its children
    let container = match (run.font.as_ref(), scope.container_font) {
        (Some(own), Some(outer)) => Some(own.merged_over(outer)),
        (Some(own), None) => Some(own.clone()),
        (None, Some(outer)) => Some(outer.clone()),
        (None, None) => None,
    };
    let child_scope = Scope {
        without_p: true,
        container_font: container.as_ref(),
    };
    write_children(ctx, part, &run.children, child_scope)?;

    close_change(part, &run.change);
    write_comment_end(ctx, part, run.comment_end)?;
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_list_item(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    item: &ListItem,
    _scope: Scope<'_>,
) -> Result<()> {
    let num_id = ctx.numbering_id(&item.numbering_style);
    // ilvl tops out at 8
    let depth = item.depth.min(8);
    part.xml.push_str("<w:p>");
    write_ppr(
        &mut part.xml,
        item.paragraph.as_ref().unwrap_or(&Default::default()),
        item.paragraph_style.as_deref(),
        Some((num_id, depth)),
        None,
    );
    let child_scope = Scope {
        without_p: true,
        container_font: None,
    };
    write_children(ctx, part, &item.children, child_scope)?;
    part.xml.push_str("</w:p>");
    Ok(())
}

fn write_table(ctx: &mut WriteContext<'_>, part: &mut PartBuffer, table: &Table) -> Result<()> {
    part.xml.push_str("<w:tbl>");

    let style = table.style.clone().unwrap_or_default();
    write_tblpr(&mut part.xml, &style, table.style_name.as_deref());

    // grid column count: the widest row measured in spanned columns
    let columns = table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| {
                    cell.style
                        .as_ref()
                        .and_then(|s| s.grid_span)
                        .unwrap_or(1)
                        .max(1)
                })
                .sum::<u32>()
        })
        .max()
        .unwrap_or(0);

    let column_width = match style.width {
        Some(TableWidth::Twips(w)) if columns > 0 => w / columns,
        _ => 2000,
    };
    part.xml.push_str("<w:tblGrid>");
    for _ in 0..columns {
        part.xml
            .push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, column_width));
    }
    part.xml.push_str("</w:tblGrid>");

    for row in &table.rows {
        part.xml.push_str("<w:tr>");
        if let Some(row_style) = &row.style {
            write_trpr(&mut part.xml, row_style);
        }
        for cell in &row.cells {
            write_cell(ctx, part, cell)?;
        }
        part.xml.push_str("</w:tr>");
    }

    part.xml.push_str("</w:tbl>");
    Ok(())
}

fn write_cell(ctx: &mut WriteContext<'_>, part: &mut PartBuffer, cell: &Cell) -> Result<()> {
    part.xml.push_str("<w:tc>");
    if let Some(style) = &cell.style {
        write_tcpr(&mut part.xml, style);
    }
    if cell.children.is_empty() {
        // a cell must contain at least one paragraph
        part.xml.push_str("<w:p/>");
    } else {
        write_children(ctx, part, &cell.children, Scope::default())?;
    }
    part.xml.push_str("</w:tc>");
    Ok(())
}

fn write_image(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    image: &Image,
    scope: Scope<'_>,
) -> Result<()> {
    let target = ctx.add_image(&image.source)?;
    let rel_id = part.rels.register(RelKind::Image, &target, false)?;
    let drawing_id = ctx.ids.drawing.allocate();
    let cx = pixels_to_emu(image.width);
    let cy = pixels_to_emu(image.height);
    let name = format!("Picture {}", drawing_id);
    let alt = image.alt.clone().unwrap_or_default();

    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    part.xml.push_str("<w:r><w:drawing>");
    part.xml
        .push_str(r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#);
    part.xml
        .push_str(&format!(r#"<wp:extent cx="{}" cy="{}"/>"#, cx, cy));
    part.xml
        .push_str(r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#);
    part.xml.push_str(&format!(
        r#"<wp:docPr id="{}" name="{}" descr="{}"/>"#,
        drawing_id,
        escape_xml(&name),
        escape_xml(&alt)
    ));
    part.xml.push_str(
        r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
    );
    part.xml.push_str("<a:graphic>");
    part.xml.push_str(
        r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
    );
    part.xml.push_str("<pic:pic>");
    part.xml.push_str(&format!(
        r#"<pic:nvPicPr><pic:cNvPr id="{}" name="{}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
        drawing_id,
        escape_xml(&name)
    ));
    part.xml.push_str(&format!(
        r#"<pic:blipFill><a:blip r:embed="rId{}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
        rel_id
    ));
    part.xml.push_str(&format!(
        r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
        cx, cy
    ));
    part.xml.push_str("</pic:pic>");
    part.xml.push_str("</a:graphicData></a:graphic></wp:inline>");
    part.xml.push_str("</w:drawing></w:r>");
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_link(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    link: &Hyperlink,
    scope: Scope<'_>,
) -> Result<()> {
    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    match &link.target {
        LinkTarget::Url(url) => {
            let rel_id = part.rels.register(RelKind::Hyperlink, url, true)?;
            part.xml
                .push_str(&format!(r#"<w:hyperlink r:id="rId{}">"#, rel_id));
        }
        LinkTarget::Bookmark(anchor) => {
            part.xml.push_str(&format!(
                r#"<w:hyperlink w:anchor="{}">"#,
                escape_xml(anchor)
            ));
        }
    }
    part.xml.push_str("<w:r>");
    let named = link.font_style.as_deref().or(Some("Hyperlink"));
    let font = ctx
        .cascade
        .run_font_diff(link.font.as_ref(), named, scope.container_font);
    write_rpr(&mut part.xml, &font, named);
    part.xml.push_str(&format!(
        r#"<w:t xml:space="preserve">{}</w:t>"#,
        escape_xml(&link.text)
    ));
    part.xml.push_str("</w:r></w:hyperlink>");
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_bookmark(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    bookmark: &Bookmark,
    scope: Scope<'_>,
) -> Result<()> {
    let id = ctx.ids.bookmark.allocate();
    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    // start and end are adjacent, so pairs always nest validly
    part.xml.push_str(&format!(
        r#"<w:bookmarkStart w:id="{}" w:name="{}"/><w:bookmarkEnd w:id="{}"/>"#,
        id,
        escape_xml(&bookmark.name),
        id
    ));
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_field(
    _ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    field: &Field,
    scope: Scope<'_>,
) -> Result<()> {
    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    part.xml.push_str(&format!(
        r#"<w:fldSimple w:instr="{}">"#,
        escape_xml(&field.kind.instruction())
    ));
    part.xml.push_str("<w:r>");
    if let Some(font) = &field.font {
        write_rpr(&mut part.xml, font, None);
    }
    part.xml.push_str("</w:r></w:fldSimple>");
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_note_ref(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    index: usize,
    footnote: bool,
    scope: Scope<'_>,
) -> Result<()> {
    let (id, style, tag) = if footnote {
        (
            ctx.footnote_id(index)?,
            "FootnoteReference",
            "w:footnoteReference",
        )
    } else {
        (
            ctx.endnote_id(index)?,
            "EndnoteReference",
            "w:endnoteReference",
        )
    };
    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    part.xml.push_str(&format!(
        r#"<w:r><w:rPr><w:rStyle w:val="{}"/></w:rPr><{} w:id="{}"/></w:r>"#,
        style, tag, id
    ));
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

/// A complex TOC field; the entries are produced by the application on open
/// (`w:updateFields` in settings asks for the recalculation).
fn write_toc(part: &mut PartBuffer, min_depth: u8, max_depth: u8) -> Result<()> {
    part.xml.push_str("<w:p>");
    part.xml
        .push_str(r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r>"#);
    part.xml.push_str(&format!(
        r#"<w:r><w:instrText xml:space="preserve"> TOC \o "{}-{}" \h \z \u </w:instrText></w:r>"#,
        min_depth, max_depth
    ));
    part.xml
        .push_str(r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#);
    part.xml
        .push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
    part.xml.push_str("</w:p>");
    Ok(())
}

fn write_shape(part: &mut PartBuffer, shape: &Shape, scope: Scope<'_>) -> Result<()> {
    // VML uses points; model dimensions are pixels at 96 dpi
    let width_pt = shape.width as f32 * 0.75;
    let height_pt = shape.height as f32 * 0.75;

    let mut attrs = String::new();
    if let Some(color) = &shape.outline_color {
        attrs.push_str(&format!(r##" strokecolor="#{}""##, escape_xml(color)));
    }
    if let Some(color) = &shape.fill_color {
        attrs.push_str(&format!(r##" fillcolor="#{}""##, escape_xml(color)));
    } else {
        attrs.push_str(r#" filled="f""#);
    }

    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    part.xml.push_str("<w:r><w:pict>");
    match shape.kind {
        ShapeKind::Rect => {
            part.xml.push_str(&format!(
                r#"<v:rect style="width:{}pt;height:{}pt"{}/>"#,
                width_pt, height_pt, attrs
            ));
        }
        ShapeKind::Oval => {
            part.xml.push_str(&format!(
                r#"<v:oval style="width:{}pt;height:{}pt"{}/>"#,
                width_pt, height_pt, attrs
            ));
        }
        ShapeKind::Line => {
            part.xml.push_str(&format!(
                r#"<v:line from="0,0" to="{}pt,{}pt"{}/>"#,
                width_pt, height_pt, attrs
            ));
        }
    }
    part.xml.push_str("</w:pict></w:r>");
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_object(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    object: &OleObject,
    scope: Scope<'_>,
) -> Result<()> {
    let target = ctx.add_object(&object.source)?;
    let rel_id = part.rels.register(RelKind::OleObject, &target, false)?;

    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    part.xml.push_str("<w:r><w:object>");
    part.xml.push_str(&format!(
        r#"<o:OLEObject Type="Embed" ProgID="{}" ShapeID="_obj{}" DrawAspect="Icon" ObjectID="_obj{}" r:id="rId{}"/>"#,
        escape_xml(&object.prog_id),
        rel_id,
        rel_id,
        rel_id
    ));
    part.xml.push_str("</w:object></w:r>");
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_checkbox(
    _ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    checkbox: &CheckBox,
    scope: Scope<'_>,
) -> Result<()> {
    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    write_ff_checkbox(part, &checkbox.name, checkbox.checked);
    // label text follows the field
    part.xml.push_str(&format!(
        r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape_xml(&checkbox.label)
    ));
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_ff_checkbox(part: &mut PartBuffer, name: &str, checked: bool) {
    part.xml.push_str(r#"<w:r><w:fldChar w:fldCharType="begin">"#);
    part.xml.push_str("<w:ffData>");
    part.xml
        .push_str(&format!(r#"<w:name w:val="{}"/>"#, escape_xml(name)));
    part.xml.push_str("<w:enabled/>");
    part.xml.push_str("<w:checkBox><w:sizeAuto/>");
    part.xml.push_str(&format!(
        r#"<w:default w:val="{}"/>"#,
        if checked { 1 } else { 0 }
    ));
    part.xml.push_str("</w:checkBox></w:ffData>");
    part.xml.push_str("</w:fldChar></w:r>");
    part.xml.push_str(
        r#"<w:r><w:instrText xml:space="preserve"> FORMCHECKBOX </w:instrText></w:r>"#,
    );
    part.xml
        .push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
}

fn write_form_field(
    _ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    field: &FormField,
    scope: Scope<'_>,
) -> Result<()> {
    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    match &field.kind {
        FormFieldKind::CheckBox { checked } => {
            write_ff_checkbox(part, &field.name, *checked);
        }
        FormFieldKind::TextInput { default } => {
            part.xml.push_str(r#"<w:r><w:fldChar w:fldCharType="begin">"#);
            part.xml.push_str("<w:ffData>");
            part.xml
                .push_str(&format!(r#"<w:name w:val="{}"/>"#, escape_xml(&field.name)));
            part.xml.push_str("<w:enabled/>");
            part.xml.push_str(&format!(
                r#"<w:textInput><w:default w:val="{}"/></w:textInput>"#,
                escape_xml(default)
            ));
            part.xml.push_str("</w:ffData></w:fldChar></w:r>");
            part.xml.push_str(
                r#"<w:r><w:instrText xml:space="preserve"> FORMTEXT </w:instrText></w:r>"#,
            );
            part.xml
                .push_str(r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#);
            part.xml.push_str(&format!(
                r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
                escape_xml(default)
            ));
            part.xml
                .push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
        }
        FormFieldKind::DropDown { options } => {
            part.xml.push_str(r#"<w:r><w:fldChar w:fldCharType="begin">"#);
            part.xml.push_str("<w:ffData>");
            part.xml
                .push_str(&format!(r#"<w:name w:val="{}"/>"#, escape_xml(&field.name)));
            part.xml.push_str("<w:enabled/>");
            part.xml.push_str("<w:ddList>");
            for option in options {
                part.xml.push_str(&format!(
                    r#"<w:listEntry w:val="{}"/>"#,
                    escape_xml(option)
                ));
            }
            part.xml.push_str("</w:ddList></w:ffData></w:fldChar></w:r>");
            part.xml.push_str(
                r#"<w:r><w:instrText xml:space="preserve"> FORMDROPDOWN </w:instrText></w:r>"#,
            );
            part.xml
                .push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
        }
    }
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_sdt(part: &mut PartBuffer, sdt: &Sdt, scope: Scope<'_>) -> Result<()> {
    part.xml.push_str("<w:sdt><w:sdtPr>");
    if let Some(alias) = &sdt.alias {
        part.xml
            .push_str(&format!(r#"<w:alias w:val="{}"/>"#, escape_xml(alias)));
    }
    if let Some(tag) = &sdt.tag {
        part.xml
            .push_str(&format!(r#"<w:tag w:val="{}"/>"#, escape_xml(tag)));
    }
    match &sdt.kind {
        SdtKind::PlainText => part.xml.push_str("<w:text/>"),
        SdtKind::ComboBox { options } => {
            part.xml.push_str("<w:comboBox>");
            for option in options {
                part.xml.push_str(&format!(
                    r#"<w:listItem w:displayText="{0}" w:value="{0}"/>"#,
                    escape_xml(option)
                ));
            }
            part.xml.push_str("</w:comboBox>");
        }
        SdtKind::DatePicker { format } => {
            part.xml.push_str(&format!(
                r#"<w:date><w:dateFormat w:val="{}"/></w:date>"#,
                escape_xml(format)
            ));
        }
    }
    part.xml.push_str("</w:sdtPr><w:sdtContent>");
    let run = format!(
        r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape_xml(&sdt.text)
    );
    if scope.without_p {
        part.xml.push_str(&run);
    } else {
        part.xml.push_str("<w:p>");
        part.xml.push_str(&run);
        part.xml.push_str("</w:p>");
    }
    part.xml.push_str("</w:sdtContent></w:sdt>");
    Ok(())
}

fn write_break(part: &mut PartBuffer, break_type: Option<&str>, scope: Scope<'_>) -> Result<()> {
    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    match break_type {
        Some(kind) => part
            .xml
            .push_str(&format!(r#"<w:r><w:br w:type="{}"/></w:r>"#, kind)),
        None => part.xml.push_str("<w:r><w:br/></w:r>"),
    }
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_ruby(part: &mut PartBuffer, ruby: &Ruby, scope: Scope<'_>) -> Result<()> {
    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    part.xml.push_str("<w:r><w:ruby>");
    part.xml.push_str(r#"<w:rubyPr><w:rubyAlign w:val="center"/>"#);
    if let Some(size) = ruby.annotation_size {
        part.xml.push_str(&format!(
            r#"<w:hps w:val="{}"/>"#,
            points_to_half_points(size)
        ));
    }
    part.xml.push_str("</w:rubyPr>");
    part.xml.push_str(&format!(
        r#"<w:rt><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:rt>"#,
        escape_xml(&ruby.annotation)
    ));
    part.xml.push_str(&format!(
        r#"<w:rubyBase><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:rubyBase>"#,
        escape_xml(&ruby.base)
    ));
    part.xml.push_str("</w:ruby></w:r>");
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}

fn write_text_box(
    ctx: &mut WriteContext<'_>,
    part: &mut PartBuffer,
    textbox: &TextBox,
    scope: Scope<'_>,
) -> Result<()> {
    let width_pt = textbox.width as f32 * 0.75;
    let height_pt = textbox.height as f32 * 0.75;

    if !scope.without_p {
        part.xml.push_str("<w:p>");
    }
    part.xml.push_str("<w:r><w:pict>");
    part.xml.push_str(&format!(
        r##"<v:shape type="#_x0000_t202" style="width:{}pt;height:{}pt">"##,
        width_pt, height_pt
    ));
    part.xml.push_str("<v:textbox><w:txbxContent>");
    // block context inside the text box
    write_children(ctx, part, &textbox.children, Scope::default())?;
    part.xml.push_str("</w:txbxContent></v:textbox>");
    part.xml.push_str("</v:shape>");
    part.xml.push_str("</w:pict></w:r>");
    if !scope.without_p {
        part.xml.push_str("</w:p>");
    }
    Ok(())
}
