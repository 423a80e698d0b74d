//! Fetching pages over HTTP.
//!
//! Some sites serve full Open Graph markup only to particular crawlers, so
//! the user agent is chosen from the target URL. Failures never panic and
//! never fall through to parsing: they come back as a [`FetchError`].

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;

use crate::encoding;
use crate::error::{FetchError, Result};
use crate::probe::{HttpImageProbe, ImageProbe, NoProbe};
use crate::record::OpenGraph;
use crate::Options;

/// Facebook's link preview crawler.
pub const FACEBOOK_USER_AGENT: &str =
    "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)";

/// Googlebot, which most sites serve complete markup to.
pub const GOOGLEBOT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

/// Used for sites that want a browser when the caller has no UA of its own.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:31.0) Gecko/20100101 Firefox/31.0";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_REDIRECTS: usize = 10;

/// Options for [`fetch`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Total request timeout.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// User agent of the end user on whose behalf the page is fetched.
    /// Sent to sites that block crawlers.
    ///
    /// Default: `None` (a desktop Firefox string)
    pub client_user_agent: Option<String>,

    /// Reader locale, passed through to [`Options::locale`].
    ///
    /// Default: `None`
    pub locale: Option<String>,

    /// Measure candidate images over HTTP. When off, every probe reports an
    /// unknown size, so only declared `<img width>` values can qualify.
    ///
    /// Default: `true`
    pub probe_images: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client_user_agent: None,
            locale: None,
            probe_images: true,
        }
    }
}

/// A successfully downloaded page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Body decoded to UTF-8.
    pub html: String,
}

/// User agent to send for `url`.
///
/// ```rust
/// use og_card::fetch::{user_agent_for, FACEBOOK_USER_AGENT, GOOGLEBOT_USER_AGENT};
///
/// assert_eq!(user_agent_for("https://www.amazon.co.uk/dp/1", None), FACEBOOK_USER_AGENT);
/// assert_eq!(user_agent_for("https://example.com/", None), GOOGLEBOT_USER_AGENT);
/// assert_eq!(user_agent_for("https://www.Facebook.com/x", Some("Me/1.0")), "Me/1.0");
/// ```
#[must_use]
pub fn user_agent_for<'a>(url: &str, client_user_agent: Option<&'a str>) -> &'a str {
    let lower = url.to_lowercase();
    if lower.contains("facebook") || lower.contains("wish") {
        client_user_agent.unwrap_or(BROWSER_USER_AGENT)
    } else if ["amazon", "youtu", "missguided"].iter().any(|s| url.contains(s)) {
        FACEBOOK_USER_AGENT
    } else {
        GOOGLEBOT_USER_AGENT
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html, text/xml,application/xml,application/xhtml+xml,text/html;q=0.9,text/plain;q=0.8,image/png,*/*;q=0.5",
        ),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert("keep-alive", HeaderValue::from_static("300"));
    headers.insert(
        header::ACCEPT_CHARSET,
        HeaderValue::from_static("ISO-8859-1,utf-8;q=0.7,*;q=0.7"),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-us,en;q=0.5"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}

/// Blocking client configured for `url`: crawler user agent, browser-like
/// headers, cookie store and redirects.
pub fn client_for(url: &str, opts: &FetchOptions) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_for(url, opts.client_user_agent.as_deref()))
        .default_headers(default_headers())
        .cookie_store(true)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .timeout(opts.timeout)
        .build()
}

/// Download `url` with `client`.
///
/// Transport errors, non-success statuses and empty bodies all become a
/// [`FetchError`]; `http_code` is 0 when no response was received.
pub fn fetch_html(client: &Client, url: &str) -> std::result::Result<FetchedPage, FetchError> {
    let response = client
        .get(url)
        .send()
        .and_then(Response::error_for_status)
        .map_err(|e| {
            let code = e.status().map_or(0, |s| s.as_u16());
            let resolved = e.url().map_or_else(|| url.to_string(), ToString::to_string);
            warn!("fetch failed for {url}: {e}");
            FetchError::new(code, e, resolved)
        })?;

    let status = response.status().as_u16();
    let resolved = response.url().to_string();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response.bytes().map_err(|e| {
        warn!("reading body failed for {url}: {e}");
        FetchError::new(status, e, resolved.clone())
    })?;

    if body.is_empty() {
        warn!("empty response body from {resolved}");
        return Err(FetchError::new(status, "empty response body", resolved));
    }

    debug!("fetched {} bytes from {resolved} ({status})", body.len());
    Ok(FetchedPage {
        url: resolved,
        status,
        html: encoding::transcode_with_hint(&body, content_type.as_deref()),
    })
}

/// Fetch `url` and extract its card.
///
/// The requested URL (not the post-redirect one) is the resource URL for the
/// fallback rules. Image probes share the page client and its cookies.
///
/// ```no_run
/// use og_card::fetch::{fetch, FetchOptions};
///
/// let card = fetch("https://www.example.com/", &FetchOptions::default())?;
/// println!("{:?}", card.get("title"));
/// # Ok::<(), og_card::Error>(())
/// ```
pub fn fetch(url: &str, opts: &FetchOptions) -> Result<OpenGraph> {
    let client = client_for(url, opts).map_err(|e| {
        warn!("could not build HTTP client: {e}");
        FetchError::new(0, e, url)
    })?;
    let page = fetch_html(&client, url)?;

    let parse_opts = Options {
        url: Some(url.to_string()),
        locale: opts.locale.clone(),
        ..Options::default()
    };

    let http_probe;
    let probe: &dyn ImageProbe = if opts.probe_images {
        http_probe = HttpImageProbe::with_client(client);
        &http_probe
    } else {
        &NoProbe
    };

    crate::parse_with_probe(&page.html, &parse_opts, probe)
}
