//! Image selection.
//!
//! The scanned `image` is kept only when it is wide enough. Otherwise the
//! page is searched for a replacement in a fixed order, ending with a
//! placeholder, and the winner is anchored on the resource host when it is
//! a bare path.

use dom_query::{Document, Selection};
use log::debug;

use crate::dom;
use crate::metadata::meta_tags::Candidates;
use crate::probe::{ImageProbe, ImageSize};
use crate::record::OpenGraph;
use crate::url_utils;
use crate::Options;

/// Drop `image` (with its companions) unless the probe reports a width of at
/// least `opts.min_image_width`. An unknown size counts as too small.
pub fn validate(graph: &mut OpenGraph, opts: &Options, probe: &dyn ImageProbe) {
    let Some(image) = graph.get("image").map(str::to_string) else {
        return;
    };

    let size = url_utils::probe_target(&image, opts.url.as_deref()).and_then(|t| probe.probe(&t));
    let wide_enough = size.is_some_and(|s| s.width >= opts.min_image_width);
    if !wide_enough {
        debug!("dropping image {image}: size {size:?} below {}px", opts.min_image_width);
        graph.remove("image");
    }
}

/// Fill a missing `image` from the page. Stops at the first source that
/// yields a value; the placeholder is left to [`finish`].
pub fn fill_from_page(
    doc: &Document,
    graph: &mut OpenGraph,
    candidates: &Candidates,
    opts: &Options,
    probe: &dyn ImageProbe,
) {
    if graph.has("image") {
        return;
    }

    if let Some(href) = image_src_link(doc) {
        graph.set("image", href.as_str());
        graph.set("image_src", href);
        return;
    }

    if let Some(twitter) = graph.get("twitter_image").filter(|v| !v.is_empty()) {
        let twitter = twitter.to_string();
        graph.set("image", twitter);
        return;
    }

    if let Some(ld) = candidates.json_ld_image.as_deref().filter(|v| !v.is_empty()) {
        graph.set("image", ld);
        return;
    }

    if from_itemprop(doc, graph, opts, probe) {
        return;
    }

    from_img_tags(doc, graph, opts, probe);
}

/// Placeholder when nothing else was found, then host anchoring of
/// scheme-less values.
pub fn finish(graph: &mut OpenGraph, opts: &Options) {
    if !graph.has("image") && !opts.placeholder_image.is_empty() {
        graph.set("image", opts.placeholder_image.as_str());
    }

    let Some(image) = graph.get("image").map(str::to_string) else {
        return;
    };
    if url_utils::is_absolute_or_protocol_relative(&image) {
        return;
    }
    if let Some(resource) = opts.url.as_deref() {
        if let Some(anchored) = url_utils::rebuild_on_host(&image, resource) {
            graph.set("image", anchored);
        }
    }
}

fn image_src_link(doc: &Document) -> Option<String> {
    dom::select_all(doc, "link")
        .iter()
        .filter(|link| dom::attribute_is(link, "rel", "image_src"))
        .find_map(|link| dom::get_attribute(link, "href").filter(|h| !h.is_empty()))
}

fn from_itemprop(
    doc: &Document,
    graph: &mut OpenGraph,
    opts: &Options,
    probe: &dyn ImageProbe,
) -> bool {
    let Some(content) = dom::select_all(doc, "meta")
        .iter()
        .filter(|meta| dom::attribute_is(meta, "itemprop", "image"))
        .find_map(|meta| dom::get_attribute(meta, "content").filter(|c| !c.is_empty()))
    else {
        return false;
    };

    let image = match url_utils::is_absolute_url(&content) {
        (true, _) => content,
        (false, _) => opts
            .url
            .as_deref()
            .and_then(|resource| url::Url::parse(resource).ok())
            .map_or(content.clone(), |base| url_utils::create_absolute_url(&content, &base)),
    };

    if let Some(size) = url_utils::probe_target(&image, opts.url.as_deref()).and_then(|t| probe.probe(&t)) {
        set_dimensions(graph, &size.width.to_string(), &size.height.to_string());
    }
    graph.set("image", image);
    true
}

/// Declared pixel width, tolerating a `px` suffix.
fn declared_width(img: &Selection) -> Option<f64> {
    let raw = dom::get_attribute(img, "width")?;
    raw.trim().trim_end_matches("px").trim().parse().ok()
}

fn from_img_tags(doc: &Document, graph: &mut OpenGraph, opts: &Options, probe: &dyn ImageProbe) {
    let min_width = f64::from(opts.min_image_width);

    for img in dom::select_all(doc, "img") {
        let Some(src) = dom::get_attribute(&img, "src").filter(|s| !s.trim().is_empty()) else {
            continue;
        };

        let measured: Option<ImageSize> =
            url_utils::probe_target(&src, opts.url.as_deref()).and_then(|t| probe.probe(&t));
        let declared_ok = declared_width(&img).is_some_and(|w| w >= min_width)
            || dom::attribute_is(&img, "width", "100%");
        let measured_ok = measured.is_some_and(|s| s.width >= opts.min_image_width);

        if !declared_ok && !measured_ok {
            continue;
        }

        match measured {
            Some(size) => set_dimensions(graph, &size.width.to_string(), &size.height.to_string()),
            None => set_dimensions(
                graph,
                &dom::attribute_or_empty(&img, "width"),
                &dom::attribute_or_empty(&img, "height"),
            ),
        }
        graph.set("image", src);
        return;
    }
}

fn set_dimensions(graph: &mut OpenGraph, width: &str, height: &str) {
    if !width.is_empty() {
        graph.set("image:width", width);
    }
    if !height.is_empty() {
        graph.set("image:height", height);
    }
}
