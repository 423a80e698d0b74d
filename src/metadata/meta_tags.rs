//! Meta tag scanning.
//!
//! Walks every `<meta>` tag once, in document order, deriving record keys
//! from Open Graph and Twitter Card attributes and collecting the plain HTML
//! signals (description, keywords, rating, canonical link) that the fallback
//! rules may promote later.

use dom_query::{Document, Selection};

use crate::dom;
use crate::error::{Error, Result};
use crate::metadata::json_ld;
use crate::record::OpenGraph;

/// Values seen during the scan that only enter the record if the
/// corresponding canonical field is still missing afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// `<meta name="description">`, last one wins.
    pub description: Option<String>,
    /// `<meta name="keywords">`, last one wins.
    pub keywords: Option<String>,
    /// `<meta name="rating">`, last one wins.
    pub rating: Option<String>,
    /// `<link rel="canonical">` href, last one wins.
    pub canonical_url: Option<String>,
    /// First image declared in JSON-LD.
    pub json_ld_image: Option<String>,
}

/// Output of [`scan`].
#[derive(Debug, Clone, Default)]
pub struct Scan {
    pub graph: OpenGraph,
    pub candidates: Candidates,
}

/// `og:image:secure-url` → `image:secure_url`
fn og_key(attr: &str) -> Option<String> {
    attr.strip_prefix("og:").map(|rest| rest.replace('-', "_"))
}

/// `twitter:image:alt` → `twitter_image_alt`
fn twitter_key(attr: &str) -> Option<String> {
    attr.starts_with("twitter:")
        .then(|| attr.replace(['-', ':'], "_"))
}

/// Scan all meta and link tags of a parsed document.
///
/// Fails with [`Error::NoMetadataFound`] when the document has no `<meta>`
/// tag at all.
pub fn scan(doc: &Document) -> Result<Scan> {
    let metas = dom::select_all(doc, "meta");
    if metas.is_empty() {
        return Err(Error::NoMetadataFound);
    }

    let mut graph = OpenGraph::new();
    let mut candidates = Candidates {
        json_ld_image: json_ld::find_image(doc),
        ..Candidates::default()
    };

    for meta in &metas {
        scan_meta(meta, &mut graph, &mut candidates);
    }

    for link in dom::select_all(doc, "link") {
        if dom::attribute_is(&link, "rel", "canonical") {
            candidates.canonical_url = Some(dom::attribute_or_empty(&link, "href"));
        }
    }

    Ok(Scan { graph, candidates })
}

fn scan_meta(meta: &Selection, graph: &mut OpenGraph, candidates: &mut Candidates) {
    let property = dom::get_attribute(meta, "property");
    let name = dom::get_attribute(meta, "name");
    let content = dom::attribute_or_empty(meta, "content");

    if let Some(key) = property.as_deref().and_then(og_key) {
        graph.accumulate(key.clone(), content.clone());

        // Some publishers put the text in `value` instead of `content`
        if let Some(value) = dom::get_attribute(meta, "value") {
            graph.set(&key, value);
        }
    }

    match name.as_deref() {
        Some("description") => candidates.description = Some(content.clone()),
        Some("keywords") => candidates.keywords = Some(content.clone()),
        Some("rating") => candidates.rating = Some(content.clone()),
        _ => {}
    }

    if let Some(key) = property.as_deref().and_then(twitter_key) {
        graph.accumulate(key, content.clone());
    }
    if let Some(key) = name.as_deref().and_then(twitter_key) {
        graph.accumulate(key, content.clone());
    }

    if let Some(key) = name.as_deref().and_then(og_key) {
        graph.accumulate(key, content.clone());
    }

    // Only tags that come after og:type can be namespaced under it.
    if let (Some(og_type), Some(property)) = (graph.get("type").map(str::to_string), property) {
        if let Some(rest) = property.strip_prefix(&format!("{og_type}:")) {
            graph.accumulate(format!("{og_type}_{}", rest.replace('-', "_")), content);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn scan_html(head: &str) -> Scan {
        let doc = Document::from(format!("<html><head>{head}</head><body></body></html>").as_str());
        scan(&doc).expect("document has meta tags")
    }

    #[test]
    fn test_key_derivation() {
        assert_eq!(og_key("og:title").as_deref(), Some("title"));
        assert_eq!(og_key("og:image:secure-url").as_deref(), Some("image:secure_url"));
        assert_eq!(og_key("twitter:card"), None);
        assert_eq!(twitter_key("twitter:image:alt").as_deref(), Some("twitter_image_alt"));
        assert_eq!(twitter_key("twitter:app:name-iphone").as_deref(), Some("twitter_app_name_iphone"));
        assert_eq!(twitter_key("og:title"), None);
    }

    #[test]
    fn test_open_graph_tags() {
        let scan = scan_html(
            r#"<meta property="og:title" content="OG Title">
               <meta property="og:site-name" content="Example">"#,
        );
        assert_eq!(scan.graph.get("title"), Some("OG Title"));
        assert_eq!(scan.graph.get("site_name"), Some("Example"));
    }

    #[test]
    fn test_value_attribute_overrides_content() {
        let scan = scan_html(r#"<meta property="og:description" content="" value="Real text">"#);
        assert_eq!(scan.graph.get("description"), Some("Real text"));
        assert!(!scan.graph.has("description_additional"));
    }

    #[test]
    fn test_value_attribute_overrides_first_value_on_repeat() {
        let scan = scan_html(
            r#"<meta property="og:description" content="first">
               <meta property="og:description" content="second" value="fixed">"#,
        );
        assert_eq!(scan.graph.get("description"), Some("fixed"));
        assert_eq!(scan.graph.additional("description"), ["second"]);
    }

    #[test]
    fn test_twitter_cards_from_name_and_property() {
        let scan = scan_html(
            r#"<meta name="twitter:card" content="summary_large_image">
               <meta property="twitter:image" content="https://x.com/a.jpg">
               <meta name="twitter:image" content="https://x.com/b.jpg">"#,
        );
        assert_eq!(scan.graph.get("twitter_card"), Some("summary_large_image"));
        assert_eq!(scan.graph.get("twitter_image"), Some("https://x.com/a.jpg"));
        assert_eq!(scan.graph.additional("twitter_image"), ["https://x.com/b.jpg"]);
    }

    #[test]
    fn test_og_in_name_attribute() {
        let scan = scan_html(r#"<meta name="og:title" content="Named">"#);
        assert_eq!(scan.graph.get("title"), Some("Named"));
    }

    #[test]
    fn test_candidates_last_wins() {
        let scan = scan_html(
            r#"<meta name="description" content="one">
               <meta name="description" content="two">
               <meta name="keywords" content="a, b">
               <meta name="rating" content="general">
               <link rel="canonical" href="https://x.com/1">
               <link rel="canonical" href="https://x.com/2">"#,
        );
        assert_eq!(scan.candidates.description.as_deref(), Some("two"));
        assert_eq!(scan.candidates.keywords.as_deref(), Some("a, b"));
        assert_eq!(scan.candidates.rating.as_deref(), Some("general"));
        assert_eq!(scan.candidates.canonical_url.as_deref(), Some("https://x.com/2"));
        assert!(scan.graph.is_empty());
    }

    #[test]
    fn test_type_namespacing_after_type() {
        let scan = scan_html(
            r#"<meta property="og:type" content="product">
               <meta property="product:price:amount" content="9.99">
               <meta property="product:retailer-item-id" content="SKU1">"#,
        );
        assert_eq!(scan.graph.get("product_price:amount"), Some("9.99"));
        assert_eq!(scan.graph.get("product_retailer_item_id"), Some("SKU1"));
    }

    #[test]
    fn test_type_namespacing_is_order_sensitive() {
        let scan = scan_html(
            r#"<meta property="music:duration" content="200">
               <meta property="og:type" content="music">
               <meta property="music:album" content="LP">"#,
        );
        assert!(!scan.graph.has("music_duration"));
        assert_eq!(scan.graph.get("music_album"), Some("LP"));
    }

    #[test]
    fn test_missing_content_is_empty_string() {
        let scan = scan_html(r#"<meta property="og:title">"#);
        assert_eq!(scan.graph.get("title"), Some(""));
    }

    #[test]
    fn test_json_ld_image_collected() {
        let scan = scan_html(
            r#"<meta charset="utf-8">
               <script type="application/ld+json">{"image": "https://x.com/ld.jpg"}</script>"#,
        );
        assert_eq!(scan.candidates.json_ld_image.as_deref(), Some("https://x.com/ld.jpg"));
    }

    #[test]
    fn test_no_meta_tags() {
        let doc = Document::from("<html><head><title>T</title></head><body></body></html>");
        assert!(matches!(scan(&doc), Err(Error::NoMetadataFound)));
    }
}
