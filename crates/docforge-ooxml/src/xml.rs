//! Small XML emission helpers shared by the part writers
//!
//! Parts are built by pushing onto a `String`; these helpers cover escaping
//! and the unit conversions that appear throughout WordprocessingML.

/// Escape special XML characters for text content and attribute values
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Convert pixels (96 dpi) to EMUs (914400 per inch)
pub fn pixels_to_emu(px: u32) -> i64 {
    px as i64 * 9525
}

/// Font size in points to the half-point units of `w:sz`
pub fn points_to_half_points(points: f32) -> u32 {
    (points * 2.0).round() as u32
}

/// The XML declaration every part starts with
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// WordprocessingML main namespace
pub const NS_WORDML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// officeDocument relationships namespace (the `r:` prefix)
pub const NS_DOC_RELS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Attribute block declaring the namespaces used by body-level parts
pub fn wordml_namespace_attrs() -> String {
    format!(
        r#"xmlns:w="{}" xmlns:r="{}" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" xmlns:v="urn:schemas-microsoft-com:vml" xmlns:o="urn:schemas-microsoft-com:office:office""#,
        NS_WORDML, NS_DOC_RELS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(pixels_to_emu(96), 914400);
        assert_eq!(points_to_half_points(10.0), 20);
        assert_eq!(points_to_half_points(10.5), 21);
    }
}
