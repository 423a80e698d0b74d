//! Error types for og-card.
//!
//! Parsing has exactly two fatal outcomes. Fetch failures are reported
//! through their own variant so callers can tell a dead URL from a page
//! without metadata.

use serde::Serialize;

/// Error type for parse and fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTML input was empty.
    #[error("HTML input is empty")]
    EmptyInput,

    /// No metadata fields could be populated from the document.
    #[error("No metadata found")]
    NoMetadataFound,

    /// Fetching the page failed before any parsing took place.
    #[error("{0}")]
    Fetch(FetchError),
}

/// Structured fetch failure.
///
/// Serializes to the `{status, httpCode, message, url}` shape preview
/// front-ends expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchError {
    /// Always `"error"`.
    pub status: &'static str,
    /// HTTP status code, `0` when no response was received.
    pub http_code: u16,
    /// Human readable reason, prefixed with `URL Fetch Error: `.
    pub message: String,
    /// The last URL the client reached (after redirects).
    pub url: String,
}

impl FetchError {
    pub(crate) fn new(http_code: u16, reason: impl std::fmt::Display, url: impl Into<String>) -> Self {
        Self {
            status: "error",
            http_code,
            message: format!("URL Fetch Error: {reason}"),
            url: url.into(),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HTTP {}, {})", self.message, self.http_code, self.url)
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

/// Result type alias for og-card operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_serializes_camel_case() {
        let err = FetchError::new(404, "status 404 (not found)", "https://example.com/gone");
        let json = serde_json::to_value(&err).unwrap_or_default();
        assert_eq!(json["status"], "error");
        assert_eq!(json["httpCode"], 404);
        assert_eq!(json["message"], "URL Fetch Error: status 404 (not found)");
        assert_eq!(json["url"], "https://example.com/gone");
    }

    #[test]
    fn fetch_error_converts_into_distinct_variant() {
        let err: Error = FetchError::new(0, "timed out", "https://example.com").into();
        assert!(matches!(err, Error::Fetch(ref f) if f.http_code == 0));
        assert!(err.to_string().contains("timed out"));
    }
}
