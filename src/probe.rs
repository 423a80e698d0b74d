//! Image dimension probing.
//!
//! The image rules need pixel sizes of remote images. The lookup is injected
//! through [`ImageProbe`] so extraction can run without network access; any
//! `Fn(&str) -> Option<ImageSize>` closure is a probe.

use serde::Serialize;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Looks up the dimensions of the image at an absolute URL.
///
/// `None` means the size is unknown (unreachable, not an image, timed out).
/// Callers treat an unknown size as too small.
pub trait ImageProbe {
    fn probe(&self, url: &str) -> Option<ImageSize>;
}

impl<F> ImageProbe for F
where
    F: Fn(&str) -> Option<ImageSize>,
{
    fn probe(&self, url: &str) -> Option<ImageSize> {
        self(url)
    }
}

/// Probe that never knows a size.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl ImageProbe for NoProbe {
    fn probe(&self, _url: &str) -> Option<ImageSize> {
        None
    }
}

#[cfg(feature = "fetch")]
pub use http::{dimensions_from_bytes, HttpImageProbe};

#[cfg(feature = "fetch")]
mod http {
    use super::{ImageProbe, ImageSize};
    use log::debug;
    use reqwest::blocking::Client;
    use std::io::{Cursor, Read};
    use std::time::Duration;

    const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Enough for the header of any realistic JPEG, PNG, GIF or WebP.
    const DEFAULT_MAX_BYTES: u64 = 4 * 1024 * 1024;

    /// Probe that downloads the image over HTTP and reads its header.
    #[derive(Debug, Clone)]
    pub struct HttpImageProbe {
        client: Client,
        max_bytes: u64,
    }

    impl HttpImageProbe {
        /// Probe with its own client and a 10 second timeout.
        pub fn new() -> Result<Self, reqwest::Error> {
            let client = Client::builder()
                .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
                .build()?;
            Ok(Self::with_client(client))
        }

        /// Probe sharing an existing client (and its cookies, user agent).
        #[must_use]
        pub fn with_client(client: Client) -> Self {
            Self {
                client,
                max_bytes: DEFAULT_MAX_BYTES,
            }
        }

        /// Cap on the number of bytes read per image.
        #[must_use]
        pub fn max_bytes(mut self, max_bytes: u64) -> Self {
            self.max_bytes = max_bytes;
            self
        }
    }

    impl ImageProbe for HttpImageProbe {
        fn probe(&self, url: &str) -> Option<ImageSize> {
            let response = match self
                .client
                .get(url)
                .send()
                .and_then(reqwest::blocking::Response::error_for_status)
            {
                Ok(response) => response,
                Err(e) => {
                    debug!("image probe request failed for {url}: {e}");
                    return None;
                }
            };

            let mut bytes = Vec::new();
            if let Err(e) = response.take(self.max_bytes).read_to_end(&mut bytes) {
                debug!("image probe read failed for {url}: {e}");
                return None;
            }

            let size = dimensions_from_bytes(&bytes);
            if size.is_none() {
                debug!("image probe could not decode {url} ({} bytes)", bytes.len());
            }
            size
        }
    }

    /// Dimensions from the encoded image header.
    #[must_use]
    pub fn dimensions_from_bytes(bytes: &[u8]) -> Option<ImageSize> {
        let (width, height) = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()?;
        Some(ImageSize { width, height })
    }
}
