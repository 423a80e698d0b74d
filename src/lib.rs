//! # og-card
//!
//! Open Graph and Twitter Card metadata extraction for link previews.
//!
//! Given the HTML of a page, this library collects every `og:*`,
//! `twitter:*` and type-namespaced meta tag into an ordered record, then
//! fills the fields a preview card needs (title, description, url, image,
//! type, site name, keywords, rating, price) from whatever else the page
//! offers.
//!
//! ## Quick Start
//!
//! ```rust
//! use og_card::{parse_with_probe, NoProbe, Options};
//!
//! let html = r#"<html><head>
//!   <meta property="og:title" content="Hello">
//!   <meta property="og:type" content="restaurant">
//!   <meta property="og:latitude" content="51.5">
//!   <meta property="og:longitude" content="-0.12">
//! </head></html>"#;
//!
//! let card = parse_with_probe(html, &Options::for_url("https://www.example.com/menu"), &NoProbe)?;
//! assert_eq!(card.get("title"), Some("Hello"));
//! assert_eq!(card.get("site_name"), Some("example.com"));
//! assert_eq!(card.get("type"), Some("website"));
//! assert_eq!(card.schema(), Some("website"));
//! assert!(card.has_location());
//! # Ok::<(), og_card::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Tag scanning**: Open Graph (`property` or `name`), Twitter Cards,
//!   `<type>:*` namespaced tags, repeated tags kept as `_additional` values
//! - **Fallbacks**: `<title>`, meta description, canonical link, JSON-LD
//!   image, `<img>` tags, product prices with currency symbols
//! - **Image checks**: pluggable [`ImageProbe`] for minimum width checks
//! - **Fetching** (feature `fetch`): crawler-aware HTTP download

mod error;
mod options;

/// DOM access helpers over `dom_query`.
pub mod dom;

/// Meta tag scanning, fallbacks and image selection.
pub mod metadata;

/// The ordered result record.
pub mod record;

/// Type-to-schema classification.
pub mod schema;

/// Image dimension probing.
pub mod probe;

/// Currency symbols for prices.
pub mod currency;

/// URL resolution and site name helpers.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// HTTP fetching.
#[cfg(feature = "fetch")]
pub mod fetch;

// Public API - re-exports
pub use error::{Error, FetchError, Result};
pub use options::{Options, DEFAULT_LOCALE, DEFAULT_MIN_IMAGE_WIDTH, DEFAULT_PLACEHOLDER_IMAGE};
pub use probe::{ImageProbe, ImageSize, NoProbe};
pub use record::OpenGraph;

/// Parses an HTML document with default options and no image probing.
///
/// Without probing, `og:image` values are always dropped by the width check
/// and only declared `<img width>` values can qualify. Use
/// [`parse_with_probe`] to supply real dimensions.
///
/// # Example
///
/// ```rust
/// use og_card::parse;
///
/// let card = parse(r#"<meta name="twitter:title" content="Hi"><title>Page</title>"#)?;
/// assert_eq!(card.get("twitter_title"), Some("Hi"));
/// assert_eq!(card.get("title"), Some("Page"));
/// # Ok::<(), og_card::Error>(())
/// ```
pub fn parse(html: &str) -> Result<OpenGraph> {
    parse_with_probe(html, &Options::default(), &NoProbe)
}

/// Parses an HTML document with custom options.
///
/// With the `fetch` feature, images are measured over HTTP; otherwise no
/// probing takes place.
pub fn parse_with_options(html: &str, options: &Options) -> Result<OpenGraph> {
    with_default_probe(|probe| parse_with_probe(html, options, probe))
}

/// Runs `f` with an HTTP image probe when the `fetch` feature is enabled and
/// a client can be built, else with [`NoProbe`].
fn with_default_probe<T>(f: impl FnOnce(&dyn ImageProbe) -> T) -> T {
    #[cfg(feature = "fetch")]
    {
        match probe::HttpImageProbe::new() {
            Ok(probe) => return f(&probe),
            Err(e) => log::warn!("image probing disabled: {e}"),
        }
    }
    f(&NoProbe)
}

/// Parses an HTML document, measuring images with `probe`.
///
/// # Errors
///
/// [`Error::EmptyInput`] for an empty string, [`Error::NoMetadataFound`]
/// when the page has no `<meta>` tag or nothing usable came out of it.
///
/// # Example
///
/// ```rust
/// use og_card::{parse_with_probe, ImageSize, Options};
///
/// let html = r#"<meta property="og:image" content="https://cdn.example.com/big.jpg">"#;
/// let probe = |_: &str| Some(ImageSize::new(1200, 630));
/// let card = parse_with_probe(html, &Options::default(), &probe)?;
/// assert_eq!(card.get("image"), Some("https://cdn.example.com/big.jpg"));
/// # Ok::<(), og_card::Error>(())
/// ```
pub fn parse_with_probe(html: &str, options: &Options, probe: &dyn ImageProbe) -> Result<OpenGraph> {
    if html.is_empty() {
        return Err(Error::EmptyInput);
    }
    let doc = dom::parse(html);
    metadata::extract(&doc, options, probe)
}

/// Parses HTML bytes, detecting the character encoding from meta tags.
///
/// Images are probed as in [`parse_with_options`]; use
/// [`parse_bytes_with_probe`] to supply the probe.
///
/// ```rust
/// use og_card::{parse_bytes, Options};
///
/// let html = b"<meta charset=\"ISO-8859-1\"><meta property=\"og:title\" content=\"Caf\xE9\">";
/// let card = parse_bytes(html, &Options::default())?;
/// assert_eq!(card.get("title"), Some("Café"));
/// # Ok::<(), og_card::Error>(())
/// ```
pub fn parse_bytes(html: &[u8], options: &Options) -> Result<OpenGraph> {
    with_default_probe(|probe| parse_bytes_with_probe(html, options, probe))
}

/// Parses HTML bytes, measuring images with `probe`.
///
/// ```rust
/// use og_card::{parse_bytes_with_probe, NoProbe, Options};
///
/// let html = b"<meta charset=\"windows-1252\"><title>\x93Hi\x94</title>";
/// let card = parse_bytes_with_probe(html, &Options::default(), &NoProbe)?;
/// assert_eq!(card.get("title"), Some("\u{201C}Hi\u{201D}"));
/// # Ok::<(), og_card::Error>(())
/// ```
pub fn parse_bytes_with_probe(html: &[u8], options: &Options, probe: &dyn ImageProbe) -> Result<OpenGraph> {
    if html.is_empty() {
        return Err(Error::EmptyInput);
    }
    parse_with_probe(&encoding::transcode_to_utf8(html), options, probe)
}
