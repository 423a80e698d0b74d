//! Metadata extraction module.
//!
//! Turns a parsed document into an [`OpenGraph`] record:
//! 1. Meta tag scan (Open Graph, Twitter Card, type-namespaced keys)
//! 2. Page fallbacks (title, description, keywords, rating, url, price, type)
//! 3. Image size gate and page image sources
//! 4. Request-derived values (site name, url, placeholder image)
//!
//! Values synthesized purely from the request in step 4 do not count as
//! metadata: a page with nothing usable of its own is reported as
//! [`Error::NoMetadataFound`].

pub mod fallback;
pub mod image;
pub mod json_ld;
pub mod meta_tags;

use dom_query::Document;
use log::debug;

use crate::error::{Error, Result};
use crate::probe::ImageProbe;
use crate::record::OpenGraph;
use crate::Options;

pub use json_ld::{find_image, JsonLdError};
pub use meta_tags::{scan, Candidates, Scan};

/// Extract the card of a parsed document.
pub fn extract(doc: &Document, opts: &Options, probe: &dyn ImageProbe) -> Result<OpenGraph> {
    let Scan {
        mut graph,
        candidates,
    } = meta_tags::scan(doc)?;
    debug!("meta scan produced {} keys", graph.len());

    fallback::fill_from_page(doc, &mut graph, &candidates, opts);
    let mut found = !graph.is_empty();

    image::validate(&mut graph, opts, probe);
    image::fill_from_page(doc, &mut graph, &candidates, opts, probe);
    found |= graph.has("image");

    if !found {
        return Err(Error::NoMetadataFound);
    }

    fallback::fill_from_request(&mut graph, &candidates, opts);
    image::finish(&mut graph, opts);

    Ok(graph)
}
