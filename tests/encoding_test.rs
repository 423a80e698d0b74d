#![allow(clippy::expect_used)]

use og_card::encoding::transcode_with_hint;
use std::cell::RefCell;

use og_card::{parse_bytes, parse_bytes_with_probe, Error, ImageSize, NoProbe, Options};

#[test]
fn utf8_content_handled_correctly() {
    let html = r#"<html><head><meta charset="utf-8">
        <meta property="og:title" content="Crème brûlée, 中文">
    </head></html>"#
        .as_bytes();

    let graph = parse_bytes(html, &Options::default()).expect("metadata");
    assert_eq!(graph.get("title"), Some("Crème brûlée, 中文"));
}

#[test]
fn iso88591_converted_to_utf8() {
    let html = b"<html><head><meta charset=\"ISO-8859-1\"><meta property=\"og:description\" content=\"Caf\xE9 au lait\"></head></html>";
    let graph = parse_bytes(html, &Options::default()).expect("metadata");
    assert_eq!(graph.get("description"), Some("Café au lait"));
}

#[test]
fn windows1252_from_http_equiv() {
    let html = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\">\
        <title>\x93Quoted\x94</title></head></html>";
    let graph = parse_bytes(html, &Options::default()).expect("metadata");
    assert_eq!(graph.get("title"), Some("\u{201C}Quoted\u{201D}"));
}

#[test]
fn invalid_utf8_is_replaced() {
    let html = b"<meta property=\"og:title\" content=\"Bad \xFF byte\">";
    let graph = parse_bytes(html, &Options::default()).expect("metadata");
    assert_eq!(graph.get("title"), Some("Bad \u{FFFD} byte"));
}

#[test]
fn header_charset_overrides_document() {
    let html = b"<meta charset=\"utf-8\"><title>Gr\xFC\xDFe</title>";
    let text = transcode_with_hint(html, Some("text/html; charset=ISO-8859-1"));
    assert!(text.contains("Grüße"));
}

/// Byte input measures images with the caller's sizer, after transcoding
#[test]
fn bytes_use_the_injected_image_sizer() {
    let html = b"<meta charset=\"ISO-8859-1\"><meta property=\"og:title\" content=\"Caf\xE9\">\
        <meta property=\"og:image\" content=\"/caf\xE9.jpg\">";
    let seen = RefCell::new(Vec::new());
    let sizer = |url: &str| {
        seen.borrow_mut().push(url.to_string());
        Some(ImageSize::new(1200, 630))
    };

    let graph = parse_bytes_with_probe(html, &Options::for_url("http://example.com/p"), &sizer)
        .expect("metadata");

    assert_eq!(graph.get("title"), Some("Café"));
    assert_eq!(seen.borrow().len(), 1);
    assert!(graph.get("image").is_some_and(|image| image.starts_with("http://example.com/caf")));
}

#[test]
fn bytes_without_sizer_drop_undeclared_images() {
    let html = b"<meta property=\"og:title\" content=\"T\"><meta property=\"og:image\" content=\"https://x.com/a.jpg\">";
    let options = Options {
        placeholder_image: String::new(),
        ..Options::default()
    };
    let graph = parse_bytes_with_probe(html, &options, &NoProbe).expect("metadata");
    assert!(!graph.has("image"));

    assert!(matches!(
        parse_bytes_with_probe(b"", &Options::default(), &NoProbe),
        Err(Error::EmptyInput)
    ));
}
