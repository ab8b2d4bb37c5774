//! Restock-Watch: a product page availability monitor
//!
//! This crate fetches a fixed list of product pages, infers stock availability
//! from the returned markup, and posts a chat notification when an item is
//! available.

pub mod config;
pub mod monitor;
pub mod notify;
pub mod output;
pub mod target;

use thiserror::Error;

/// Main error type for Restock-Watch operations
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Restock-Watch operations
pub type Result<T> = std::result::Result<T, WatchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use monitor::{AvailabilityClassifier, Verdict, VerdictReason};
pub use target::{short_url, Target};
