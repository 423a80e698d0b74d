//! Configuration options for metadata extraction.
//!
//! Everything the fallback chain needs from the outside world (the page's
//! own URL, the reader's locale) is passed here instead of being read from
//! process-wide state.

/// Minimum pixel width an image needs to be used as the card image.
pub const DEFAULT_MIN_IMAGE_WIDTH: u32 = 300;

/// Image used when no usable image could be found on the page.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://dev.webbossuk.com/List-it/img/static.jpg";

/// Locale used for currency symbols when the caller gives none.
pub const DEFAULT_LOCALE: &str = "en-GB";

/// Configuration options for parsing.
///
/// # Example
///
/// ```rust
/// use og_card::Options;
///
/// let options = Options {
///     url: Some("https://www.example.com/article".to_string()),
///     locale: Some("en-US,en;q=0.8".to_string()),
///     ..Options::default()
/// };
/// assert_eq!(options.min_image_width, 300);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// URL the document was requested from.
    ///
    /// Drives the `site_name`, `url` and relative-image fallbacks. Without it
    /// those rules are skipped.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Reader locale, either a bare tag (`en-US`) or a raw `Accept-Language`
    /// header value. Only the first language tag is used.
    ///
    /// Default: `None` (treated as `en-GB`)
    pub locale: Option<String>,

    /// Images narrower than this are dropped from `image`.
    ///
    /// Default: `300`
    pub min_image_width: u32,

    /// Last-resort image URL.
    ///
    /// Default: [`DEFAULT_PLACEHOLDER_IMAGE`]
    pub placeholder_image: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: None,
            locale: None,
            min_image_width: DEFAULT_MIN_IMAGE_WIDTH,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl Options {
    /// Options for a document fetched from `url`.
    #[must_use]
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// The effective locale tag: first entry of the configured value with
    /// any quality parameter removed, or `en-GB`.
    #[must_use]
    pub fn locale_tag(&self) -> &str {
        self.locale
            .as_deref()
            .and_then(|raw| raw.split(',').next())
            .and_then(|tag| tag.split(';').next())
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .unwrap_or(DEFAULT_LOCALE)
    }
}
