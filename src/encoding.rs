//! Character encoding detection and transcoding.
//!
//! Pages arrive as bytes. The charset is taken from the HTTP `Content-Type`
//! header when one is known, then from the document's own meta declarations,
//! and defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Match the `charset` parameter of a `Content-Type` header value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i);\s*charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Detect character encoding from HTML bytes.
///
/// Looks at `<meta charset>` first, then the `http-equiv` form, within the
/// first 1024 bytes. Defaults to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    [
        capture(&CHARSET_META_RE, &head_str),
        capture(&CONTENT_TYPE_CHARSET_RE, &head_str),
    ]
    .into_iter()
    .flatten()
    .find_map(|label| Encoding::for_label(label.as_bytes()))
    .unwrap_or(UTF_8)
}

/// Encoding named by a `Content-Type` header value, if any.
///
/// ```rust
/// use og_card::encoding::encoding_from_content_type;
///
/// let enc = encoding_from_content_type("text/html; charset=Shift_JIS");
/// assert_eq!(enc.map(|e| e.name()), Some("Shift_JIS"));
/// assert!(encoding_from_content_type("text/html").is_none());
/// ```
#[must_use]
pub fn encoding_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    capture(&HEADER_CHARSET_RE, content_type).and_then(|label| Encoding::for_label(label.as_bytes()))
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Invalid sequences become U+FFFD rather than errors.
///
/// ```
/// use og_card::encoding::transcode_to_utf8;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9</title></head></html>";
/// assert!(transcode_to_utf8(html).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    decode(html, detect_encoding(html))
}

/// Transcode using the header charset when present, else detection.
#[must_use]
pub fn transcode_with_hint(html: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(encoding_from_content_type)
        .unwrap_or_else(|| detect_encoding(html));
    decode(html, encoding)
}

fn decode(html: &[u8], encoding: &'static Encoding) -> String {
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }
    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_utf8_from_meta_charset() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Test</body></html>"#;
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn detect_iso88591_from_meta_charset() {
        let html = br#"<html><head><meta charset="ISO-8859-1"></head><body>Test</body></html>"#;
        // WHATWG maps ISO-8859-1 to windows-1252
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn detect_charset_from_http_equiv() {
        let html = br#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1"></head></html>"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        let html = br#"<meta charset="klingon">"#;
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn default_to_utf8_when_no_charset() {
        assert_eq!(detect_encoding(b"<html><body>Test</body></html>"), UTF_8);
    }

    #[test]
    fn header_charset() {
        assert_eq!(
            encoding_from_content_type("text/html;charset=\"windows-1251\"").map(Encoding::name),
            Some("windows-1251")
        );
        assert_eq!(
            encoding_from_content_type("text/html; CHARSET=utf-8; foo=bar").map(Encoding::name),
            Some("UTF-8")
        );
        assert!(encoding_from_content_type("text/html; charset=").is_none());
    }

    #[test]
    fn header_charset_wins_over_meta() {
        let html = b"<meta charset=\"utf-8\"><title>\xE9t\xE9</title>";
        let text = transcode_with_hint(html, Some("text/html; charset=iso-8859-1"));
        assert!(text.contains("été"));

        let text = transcode_with_hint(b"<title>plain</title>", Some("text/html"));
        assert!(text.contains("plain"));
    }

    #[test]
    fn transcode_windows1252_to_utf8() {
        let html = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Hello\x94</body></html>";
        assert!(transcode_to_utf8(html).contains("\u{201C}Hello\u{201D}"));
    }

    #[test]
    fn handle_invalid_encoding_gracefully() {
        let result = transcode_to_utf8(b"<html><body>Test \xFF\xFE Invalid</body></html>");
        assert!(result.contains("Test"));
        assert!(result.contains("Invalid"));
    }

    #[test]
    fn meta_charset_case_and_quotes() {
        assert_eq!(capture(&CHARSET_META_RE, "<META CHARSET=\"UTF-8\">").as_deref(), Some("UTF-8"));
        assert_eq!(capture(&CHARSET_META_RE, "<meta charset=utf-8>").as_deref(), Some("utf-8"));
    }
}
