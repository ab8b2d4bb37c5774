use crate::target::Target;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Default pause between two targets (seconds)
pub const DEFAULT_DELAY_SECS: u64 = 10;

/// Default per-request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default Discord REST API base
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Main configuration structure for Restock-Watch
///
/// Built once at startup and passed by reference into the monitor.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub targets: Vec<Target>,
    pub settings: Settings,
}

/// Notification service credentials, read from the environment
#[derive(Clone)]
pub struct Credentials {
    /// Discord bot token
    pub bot_token: String,

    /// Destination channel ID
    pub channel_id: String,
}

// Keep the token out of debug logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

/// Tunable settings, optionally loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Pacing between consecutive targets
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Fixed pause after each target (seconds)
    #[serde(rename = "delay-secs", default = "default_delay_secs")]
    pub delay_secs: u64,

    /// Upper bound of random extra pause (milliseconds)
    #[serde(rename = "jitter-ms", default)]
    pub jitter_ms: u64,
}

impl ScheduleConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    pub fn jitter(&self) -> Duration {
        Duration::from_millis(self.jitter_ms)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            delay_secs: DEFAULT_DELAY_SECS,
            jitter_ms: 0,
        }
    }
}

/// Page fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Notification endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Discord REST API base URL
    #[serde(rename = "api-base", default = "default_api_base")]
    pub api_base: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

fn default_delay_secs() -> u64 {
    DEFAULT_DELAY_SECS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}
