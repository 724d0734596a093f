//! Append-only XML fragment writer.
//!
//! The downstream schema is order-sensitive and distinguishes an empty CDATA
//! element (`<c0059><![CDATA[]]></c0059>`) from a bare empty element
//! (`<c0060></c0060>`), so this is a plain fragment appender, not a tree
//! builder: what gets appended, in the order it is appended, is exactly what
//! is emitted.

use crate::export::sanitize::sanitize_latin1;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>"#;

#[derive(Debug, Default)]
pub struct XmlWriter {
    buf: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment verbatim. Callers own its well-formedness.
    pub fn raw(&mut self, fragment: &str) {
        self.buf.push_str(fragment);
    }

    pub fn open(&mut self, tag: &str) {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    pub fn close(&mut self, tag: &str) {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// `<TAG><![CDATA[sanitized]]></TAG>`.
    ///
    /// Every text value goes through the Latin-1 pipeline and is then CDATA
    /// wrapped, so markup-like user data stays character data for the
    /// downstream parser even where sanitization already escaped it.
    pub fn cdata(&mut self, tag: &str, value: &str) {
        self.open(tag);
        self.buf.push_str("<![CDATA[");
        self.buf.push_str(&sanitize_latin1(value));
        self.buf.push_str("]]>");
        self.close(tag);
    }

    /// CDATA element for an optional text value; absent emits an empty payload.
    pub fn cdata_opt(&mut self, tag: &str, value: Option<&str>) {
        self.cdata(tag, value.unwrap_or(""));
    }

    /// CDATA element for an optional numeric value, formatted per [`fmt_num`].
    pub fn cdata_num(&mut self, tag: &str, value: Option<f64>) {
        self.cdata(tag, &fmt_num(value));
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Absent and non-finite values print as the empty string — never `null`,
/// `NaN` or a zero. Finite values use the default decimal form: no fixed
/// precision, no grouping, integral values without a trailing `.0`.
pub fn fmt_num(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdata_wraps_sanitized_text() {
        let mut w = XmlWriter::new();
        w.cdata("c0002", "Pérez & Hijos");
        assert_eq!(
            w.into_string(),
            "<c0002><![CDATA[Pérez &amp; Hijos]]></c0002>"
        );
    }

    #[test]
    fn test_cdata_empty_value() {
        let mut w = XmlWriter::new();
        w.cdata("c0059", "");
        assert_eq!(w.into_string(), "<c0059><![CDATA[]]></c0059>");
    }

    #[test]
    fn test_markup_in_value_cannot_close_the_cdata_section() {
        let mut w = XmlWriter::new();
        w.cdata("c0030", "a]]>b</XML>");
        let out = w.into_string();
        // `>` is escaped by sanitization, so no literal `]]>` terminator and
        // no element markup survive inside the payload.
        assert!(out.contains("a]]&gt;b&lt;/XML&gt;"));
        assert_eq!(out.matches("]]></c0030>").count(), 1);
    }

    #[test]
    fn test_open_close_emit_bare_elements() {
        let mut w = XmlWriter::new();
        w.open("c0060");
        w.close("c0060");
        assert_eq!(w.into_string(), "<c0060></c0060>");
    }

    #[test]
    fn test_cdata_opt_none_matches_empty() {
        let mut w = XmlWriter::new();
        w.cdata_opt("c0007", None);
        assert_eq!(w.into_string(), "<c0007><![CDATA[]]></c0007>");
    }

    #[test]
    fn test_fmt_num_absent_and_non_finite_are_empty() {
        assert_eq!(fmt_num(None), "");
        assert_eq!(fmt_num(Some(f64::NAN)), "");
        assert_eq!(fmt_num(Some(f64::INFINITY)), "");
    }

    #[test]
    fn test_fmt_num_integral_without_decimal_point() {
        assert_eq!(fmt_num(Some(100.0)), "100");
        assert_eq!(fmt_num(Some(0.0)), "0");
    }

    #[test]
    fn test_fmt_num_fractional_round_trips() {
        let out = fmt_num(Some(12.5));
        assert_eq!(out, "12.5");
        assert_eq!(out.parse::<f64>().unwrap(), 12.5);
    }
}
