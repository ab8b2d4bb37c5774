//! Configuration module for Restock-Watch
//!
//! This module reads the notification credentials from the environment and
//! optional tuning settings from a TOML file, then validates both.
//!
//! # Example
//!
//! ```no_run
//! use restock_watch::config::load_config;
//!
//! let config = load_config(None).unwrap();
//! println!("Checking {} targets", config.targets.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, Credentials, HttpConfig, NotifyConfig, ScheduleConfig, Settings, DEFAULT_API_BASE,
    DEFAULT_DELAY_SECS, DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{
    load_config, load_config_from, load_credentials, load_settings, CHANNEL_ENV, TOKEN_ENV,
};
pub use validation::validate;
