//! Fallback rules for the canonical fields.
//!
//! Runs once after the tag scan. Rules in [`fill_from_page`] only use what
//! the document itself provides; [`fill_from_request`] derives values from
//! the URL the page was requested from and runs last.

use dom_query::Document;

use crate::currency;
use crate::dom;
use crate::metadata::meta_tags::Candidates;
use crate::record::OpenGraph;
use crate::url_utils;
use crate::Options;

/// Coarse category replacing the scanned `type`.
#[must_use]
pub fn coarse_type(raw: &str) -> &'static str {
    match raw {
        "video" | "video.movie" => "video",
        _ => "website",
    }
}

/// `"<minutes>min"` for a duration in seconds, rounded half away from zero.
#[must_use]
pub fn duration_minutes(seconds: &str) -> Option<String> {
    let seconds: f64 = seconds.trim().parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }
    Some(format!("{}min", (seconds / 60.0).round() as i64))
}

/// Apply the rules that read the document and the scan candidates.
pub fn fill_from_page(
    doc: &Document,
    graph: &mut OpenGraph,
    candidates: &Candidates,
    opts: &Options,
) {
    coarsen_type(graph);

    if !graph.has("title") {
        if let Some(title) = dom::select_all(doc, "title").first() {
            graph.set("title", dom::text_content(title).trim());
        }
    }

    fill_from_candidate(graph, "description", candidates.description.as_deref());
    fill_from_candidate(graph, "keywords", candidates.keywords.as_deref());
    fill_from_candidate(graph, "rating", candidates.rating.as_deref());

    if let Some(canonical) = non_empty(candidates.canonical_url.as_deref()) {
        graph.set("url", canonical);
    }

    fill_price(graph, opts.locale_tag());
}

/// Apply the rules that need the resource URL.
///
/// Without a canonical link the request URL always becomes `url`, even when
/// the page declared `og:url`.
pub fn fill_from_request(graph: &mut OpenGraph, candidates: &Candidates, opts: &Options) {
    let Some(resource) = opts.url.as_deref() else {
        return;
    };

    if !graph.has("site_name") {
        if let Some(site_name) = url_utils::site_name_from_url(resource) {
            graph.set("site_name", site_name);
        }
    }

    if non_empty(candidates.canonical_url.as_deref()).is_none() {
        graph.set("url", resource);
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn fill_from_candidate(graph: &mut OpenGraph, key: &str, candidate: Option<&str>) {
    if graph.has(key) {
        return;
    }
    if let Some(value) = non_empty(candidate) {
        graph.set(key, value);
    }
}

fn coarsen_type(graph: &mut OpenGraph) {
    let Some(raw) = graph.get("type").map(str::to_string) else {
        return;
    };
    let category = coarse_type(&raw);

    if category == "video" {
        let minutes = graph.get("duration").and_then(duration_minutes);
        if let Some(minutes) = &minutes {
            graph.set("duration_minute", minutes.as_str());
        }
        graph.set(
            "video_type",
            format!("{category} {}", minutes.unwrap_or_default()),
        );
    }

    graph.set("type", category);
}

fn fill_price(graph: &mut OpenGraph, locale: &str) {
    if let Some(amount) = graph.get("product_price:amount").map(str::to_string) {
        let currency = graph
            .get("price:currency")
            .or_else(|| graph.get("product_price:currency"))
            .map(str::to_string);
        let price = currency::format_price(&amount, currency.as_deref(), locale);
        graph.set("price", price);
    } else if let Some(price) = graph.get("twitter_data1").map(str::to_string) {
        graph.set("price", price);
    }
}
