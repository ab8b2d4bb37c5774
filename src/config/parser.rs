use crate::config::types::{Config, Credentials, Settings};
use crate::config::validation::validate;
use crate::target::default_targets;
use crate::{ConfigError, ConfigResult};
use std::path::Path;

/// Environment variable holding the Discord bot token
pub const TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";

/// Environment variable holding the destination channel ID
pub const CHANNEL_ENV: &str = "DISCORD_CHANNEL_ID";

/// Loads the full configuration from the process environment
///
/// # Arguments
///
/// * `settings_path` - Optional path to a TOML settings file
///
/// # Returns
///
/// * `Ok(Config)` - Credentials present, settings valid
/// * `Err(ConfigError)` - A credential is missing or a setting is invalid
pub fn load_config(settings_path: Option<&Path>) -> ConfigResult<Config> {
    load_config_from(settings_path, |key| std::env::var(key).ok())
}

/// Loads the configuration using `lookup` to resolve environment variables
pub fn load_config_from<F>(settings_path: Option<&Path>, lookup: F) -> ConfigResult<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let credentials = load_credentials(lookup)?;

    let settings = match settings_path {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };

    let targets = default_targets().map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

    let config = Config {
        credentials,
        targets,
        settings,
    };

    validate(&config)?;

    Ok(config)
}

/// Reads both required credentials, failing on the first absent one
///
/// Empty and whitespace-only values count as absent.
pub fn load_credentials<F>(lookup: F) -> ConfigResult<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &'static str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingEnv(key))
    };

    Ok(Credentials {
        bot_token: required(TOKEN_ENV)?,
        channel_id: required(CHANNEL_ENV)?,
    })
}

/// Loads and parses a TOML settings file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use restock_watch::config::load_settings;
///
/// let settings = load_settings(Path::new("restock.toml")).unwrap();
/// println!("Delay: {}s", settings.schedule.delay_secs);
/// ```
pub fn load_settings(path: &Path) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}
