//! Target handling module for Restock-Watch
//!
//! This module provides the monitored product page type, the compiled-in
//! target list, and the share-friendly URL cleanup used in notifications.

mod short_url;

use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

pub use short_url::short_url;

/// Product pages checked on every run
pub const DEFAULT_TARGETS: &[&str] = &[
    "https://a.co/d/dLgkilE",
    "https://a.co/d/d6vEEXI",
    "https://a.co/d/7tC83zP",
    "https://a.co/d/5lRIZfk",
    "https://a.co/d/2o5KBYB",
    "https://a.co/d/1U0OQkb",
    "https://a.co/d/0NvP60s",
];

/// A single product page URL to monitor
///
/// The target keeps the URL exactly as supplied; it is only parsed to make
/// sure it is an absolute HTTP(S) URL before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    raw: String,
}

impl Target {
    /// Creates a target from a URL string
    ///
    /// # Arguments
    ///
    /// * `url_str` - The product page URL
    ///
    /// # Returns
    ///
    /// * `Ok(Target)` - The URL is an absolute HTTP(S) URL
    /// * `Err(UrlError)` - The URL is malformed or uses another scheme
    ///
    /// # Examples
    ///
    /// ```
    /// use restock_watch::target::Target;
    ///
    /// let target = Target::parse("https://a.co/d/dLgkilE").unwrap();
    /// assert_eq!(target.as_str(), "https://a.co/d/dLgkilE");
    /// assert!(Target::parse("ftp://a.co/d/dLgkilE").is_err());
    /// ```
    pub fn parse(url_str: &str) -> UrlResult<Self> {
        let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                url.scheme()
            )));
        }

        Ok(Self {
            raw: url_str.trim().to_string(),
        })
    }

    /// Returns the URL exactly as configured
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the cleaned-up URL used in notification messages
    pub fn short_url(&self) -> &str {
        short_url(&self.raw)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parses the compiled-in target list
pub fn default_targets() -> UrlResult<Vec<Target>> {
    DEFAULT_TARGETS.iter().map(|url| Target::parse(url)).collect()
}
