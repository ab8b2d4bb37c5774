//! HTTP fetcher implementation
//!
//! This module handles the single GET request made per target:
//! - Building an HTTP client that presents itself as a desktop browser
//! - Mapping non-200 responses to a negative verdict
//! - Classifying transport failures

use crate::config::HttpConfig;
use crate::monitor::verdict::Verdict;
use crate::target::Target;
use crate::{Result, WatchError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use reqwest::{Client, StatusCode};

/// Browser identification sent with every page request
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered 200 with a page body
    Page {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with any other status
    HttpStatus {
        /// The HTTP status code
        status_code: u16,
    },
}

impl FetchResult {
    /// Returns the verdict for a non-200 response without looking at any body
    pub fn status_verdict(&self) -> Option<Verdict> {
        match self {
            Self::Page { .. } => None,
            Self::HttpStatus { status_code } => Some(Verdict::http_status(*status_code)),
        }
    }
}

/// Builds an HTTP client with browser-like default headers
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(WatchError::ClientBuild)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use restock_watch::config::HttpConfig;
/// use restock_watch::monitor::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(WatchError::ClientBuild)
}

/// Fetches a product page
///
/// # Outcomes
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | `Ok(FetchResult::Page)` |
/// | Any other status | `Ok(FetchResult::HttpStatus)` |
/// | DNS, connect, timeout or body read failure | `Err(WatchError::Transport)` |
///
/// No retries are attempted.
pub async fn fetch_page(client: &Client, target: &Target) -> Result<FetchResult> {
    let transport = |source: reqwest::Error| WatchError::Transport {
        url: target.to_string(),
        source,
    };

    let response = client.get(target.as_str()).send().await.map_err(|e| {
        if e.is_timeout() {
            tracing::warn!("Request timeout for {}", target);
        } else if e.is_connect() {
            tracing::warn!("Connection failed for {}", target);
        }
        transport(e)
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Ok(FetchResult::HttpStatus {
            status_code: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(transport)?;

    Ok(FetchResult::Page {
        status_code: status.as_u16(),
        body,
    })
}
