//! Sample locators and the image source boundary.

use crate::pixels::Pixels;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("http status {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Where a sample or query image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleLocator {
    Url(String),
    Path(PathBuf),
}

impl SampleLocator {
    /// `http://` and `https://` prefixes select a remote fetch; anything
    /// else is treated as a filesystem path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for SampleLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Supplies decoded pixel buffers for locators.
///
/// Synchronous on purpose: callers that fan out run each fetch on a
/// blocking task.
pub trait ImageSource {
    fn fetch(&self, locator: &SampleLocator) -> Result<Pixels, MediaError>;
}

/// Image source backed by the filesystem and a blocking HTTP client.
pub struct FsHttpImageSource {
    client: reqwest::blocking::Client,
}

impl FsHttpImageSource {
    pub fn new(timeout: Duration) -> Result<Self, MediaError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    fn fetch_url(&self, url: &str) -> Result<Vec<u8>, MediaError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

impl ImageSource for FsHttpImageSource {
    fn fetch(&self, locator: &SampleLocator) -> Result<Pixels, MediaError> {
        let bytes = match locator {
            SampleLocator::Url(url) => {
                tracing::debug!(url, "fetching remote sample");
                self.fetch_url(url)?
            }
            SampleLocator::Path(path) => {
                tracing::debug!(path = %path.display(), "reading local sample");
                std::fs::read(path)?
            }
        };
        Pixels::decode(&bytes)
    }
}
