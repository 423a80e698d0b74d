//! JSON-LD image lookup.
//!
//! Structured data is only consulted for one thing: an image to fall back on
//! when the meta tags provide none. Blocks that fail to parse are classified,
//! logged and skipped.

use dom_query::Document;
use log::debug;
use serde_json::Value;

use crate::dom;

/// Why a JSON-LD block was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum JsonLdError {
    /// Nesting deeper than the parser allows.
    #[error("Maximum stack depth exceeded")]
    DepthExceeded,

    /// Unbalanced brackets or a document cut short.
    #[error("Underflow or the modes mismatch")]
    StateMismatch,

    /// Raw control character inside a string.
    #[error("Unexpected control character found")]
    ControlChar,

    /// Anything else the grammar rejects.
    #[error("Syntax error, malformed JSON")]
    SyntaxError,

    /// Escapes that do not form valid Unicode.
    #[error("Malformed UTF-8 characters, possibly incorrectly encoded")]
    MalformedUtf8,
}

impl From<serde_json::Error> for JsonLdError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        if message.starts_with("recursion limit exceeded") {
            JsonLdError::DepthExceeded
        } else if message.starts_with("control character") {
            JsonLdError::ControlChar
        } else if message.starts_with("invalid unicode code point")
            || message.starts_with("lone leading surrogate")
            || message.starts_with("unexpected end of hex escape")
        {
            JsonLdError::MalformedUtf8
        } else if err.is_eof() {
            JsonLdError::StateMismatch
        } else {
            JsonLdError::SyntaxError
        }
    }
}

/// Parse the text of one JSON-LD script block.
pub fn parse_block(text: &str) -> Result<Value, JsonLdError> {
    Ok(serde_json::from_str(text.trim())?)
}

/// Image of the first JSON-LD block that declares one.
///
/// Blocks are visited in document order. The scan ends at the first block
/// that parses to an object with an `image` member, even when that member
/// holds nothing usable.
#[must_use]
pub fn find_image(doc: &Document) -> Option<String> {
    for (idx, script) in dom::select_all(doc, r#"script[type="application/ld+json"]"#)
        .iter()
        .enumerate()
    {
        let text = dom::text_content(script);
        let data = match parse_block(&text) {
            Ok(data) => data,
            Err(e) => {
                debug!("skipping JSON-LD block {idx}: {e}");
                continue;
            }
        };

        if let Some(image) = data.as_object().and_then(|obj| obj.get("image")) {
            return image_url(image);
        }
    }
    None
}

/// URL of a schema.org `image` value: a string, an `ImageObject`, or a list
/// of either (first entry wins).
fn image_url(image: &Value) -> Option<String> {
    match image {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => ["url", "contentUrl", "@id"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        Value::Array(arr) => arr.first().and_then(image_url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_blocks(blocks: &[&str]) -> Document {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{b}</script>"#))
            .collect();
        Document::from(format!("<html><head>{scripts}</head><body></body></html>").as_str())
    }

    #[test]
    fn test_string_image() {
        let doc = doc_with_blocks(&[r#"{"@type": "Recipe", "image": "https://x.com/pie.jpg"}"#]);
        assert_eq!(find_image(&doc).as_deref(), Some("https://x.com/pie.jpg"));
    }

    #[test]
    fn test_image_extraction_formats() {
        let obj = serde_json::json!({"@type": "ImageObject", "url": "https://x.com/a.jpg"});
        assert_eq!(image_url(&obj).as_deref(), Some("https://x.com/a.jpg"));

        let list = serde_json::json!(["https://x.com/1.jpg", "https://x.com/2.jpg"]);
        assert_eq!(image_url(&list).as_deref(), Some("https://x.com/1.jpg"));

        let nested = serde_json::json!([{"contentUrl": "https://x.com/c.jpg"}]);
        assert_eq!(image_url(&nested).as_deref(), Some("https://x.com/c.jpg"));

        assert_eq!(image_url(&serde_json::json!(42)), None);
    }

    #[test]
    fn test_invalid_json_skipped() {
        let doc = doc_with_blocks(&[
            r#"{"image": "https://x.com/broken.jpg""#,
            r#"{"image": "https://x.com/ok.jpg"}"#,
        ]);
        assert_eq!(find_image(&doc).as_deref(), Some("https://x.com/ok.jpg"));
    }

    #[test]
    fn test_first_block_with_image_wins() {
        let doc = doc_with_blocks(&[
            r#"{"@type": "Organization", "name": "Acme"}"#,
            r#"{"image": "https://x.com/first.jpg"}"#,
            r#"{"image": "https://x.com/second.jpg"}"#,
        ]);
        assert_eq!(find_image(&doc).as_deref(), Some("https://x.com/first.jpg"));
    }

    #[test]
    fn test_unusable_image_stops_scan() {
        let doc = doc_with_blocks(&[
            r#"{"image": 12}"#,
            r#"{"image": "https://x.com/later.jpg"}"#,
        ]);
        assert_eq!(find_image(&doc), None);
    }

    #[test]
    fn test_top_level_array_is_not_searched() {
        let doc = doc_with_blocks(&[r#"[{"image": "https://x.com/in-array.jpg"}]"#]);
        assert_eq!(find_image(&doc), None);
    }

    #[test]
    fn test_no_blocks() {
        let doc = Document::from("<html><head></head><body></body></html>");
        assert_eq!(find_image(&doc), None);
    }

    #[test]
    fn test_error_classification() {
        assert_eq!(parse_block(r#"{"a": [1, 2"#), Err(JsonLdError::StateMismatch));
        assert_eq!(parse_block("{\"a\": \"x\u{0001}y\"}"), Err(JsonLdError::ControlChar));
        assert_eq!(parse_block(r#"{"a": "\uD800"}"#), Err(JsonLdError::MalformedUtf8));
        assert_eq!(parse_block(r#"{"a": nope}"#), Err(JsonLdError::SyntaxError));

        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        assert_eq!(parse_block(&deep), Err(JsonLdError::DepthExceeded));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert!(parse_block("\n\t  {\"image\": \"a.jpg\"}  \n").is_ok());
    }
}
