//! URL Utility Functions
//!
//! Resolution and normalisation helpers for the URLs found in meta tags,
//! plus the host-based `site_name` derivation.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// `www.`, `www1.`, ... labels removed when deriving a site name.
#[allow(clippy::expect_used)]
static WWW_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"www[0-9]?\.").expect("valid regex"));

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Convert a relative or absolute URL to absolute form.
///
/// Protocol-relative URLs (`//cdn.example.com/a.jpg`) take the base's
/// scheme. Returns the input unchanged when resolution fails.
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    // Preserve special URLs unchanged
    if url_str.starts_with("data:") || url_str.starts_with("javascript:") {
        return url_str.to_string();
    }

    let (is_abs, _) = is_absolute_url(url_str);
    if is_abs {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Whether an image value already carries a scheme or is protocol-relative.
///
/// Anything starting with `http` counts, matching how preview consumers
/// decide whether to prefix a host.
#[must_use]
pub fn is_absolute_or_protocol_relative(s: &str) -> bool {
    s.starts_with("http") || s.starts_with("//")
}

/// Site name derived from a URL's host: `www`/`wwwN` labels removed and
/// leading dots stripped.
///
/// ```rust
/// use og_card::url_utils::site_name_from_url;
///
/// assert_eq!(site_name_from_url("https://www.example.co.uk/a").as_deref(), Some("example.co.uk"));
/// assert_eq!(site_name_from_url("http://www2.shop.example.com/").as_deref(), Some("shop.example.com"));
/// assert_eq!(site_name_from_url("not a url"), None);
/// ```
#[must_use]
pub fn site_name_from_url(url_str: &str) -> Option<String> {
    let url = Url::parse(url_str.trim()).ok()?;
    let host = url.host_str()?;
    let tidy = WWW_LABEL_RE.replace_all(host, "");
    Some(tidy.trim_start_matches('.').to_string())
}

/// `scheme://host[:port]/` + `path`, built from the resource URL.
///
/// Used to anchor a scheme-less image value on the page's own host. The
/// path is appended as-is (minus leading slashes); no directory resolution
/// takes place.
#[must_use]
pub fn rebuild_on_host(path: &str, resource: &str) -> Option<String> {
    let url = Url::parse(resource.trim()).ok()?;
    let host = url.host_str()?;
    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Some(format!(
        "{}://{}/{}",
        url.scheme(),
        authority.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// The URL an image probe should request for a candidate value.
///
/// Absolute values pass through, protocol-relative ones get `http:` and
/// relative ones are resolved against the resource URL when known.
#[must_use]
pub fn probe_target(candidate: &str, resource: Option<&str>) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    if candidate.starts_with("//") {
        return Some(format!("http:{candidate}"));
    }
    let (is_abs, _) = is_absolute_url(candidate);
    if is_abs {
        return Some(candidate.to_string());
    }
    let base = Url::parse(resource?.trim()).ok()?;
    let resolved = create_absolute_url(candidate, &base);
    is_absolute_url(&resolved).0.then_some(resolved)
}
