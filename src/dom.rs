//! DOM access helpers.
//!
//! Thin layer over `dom_query` so the scanners read attributes the same way
//! everywhere: an absent attribute is `None`, a present-but-empty one is
//! `Some("")`.

pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

/// Parse an HTML document with the tolerant html5ever-based parser.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Every element matching `selector`, in document order, each as its own
/// single-node selection.
#[must_use]
pub fn select_all<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value, empty when absent.
#[inline]
#[must_use]
pub fn attribute_or_empty(sel: &Selection, name: &str) -> String {
    get_attribute(sel, name).unwrap_or_default()
}

/// Whether the attribute exists and equals `expected` exactly.
#[must_use]
pub fn attribute_is(sel: &Selection, name: &str, expected: &str) -> bool {
    sel.attr(name).is_some_and(|v| &*v == expected)
}

/// Get all text content of node and descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}
