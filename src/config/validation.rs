use crate::config::types::{Config, Credentials, HttpConfig, NotifyConfig, ScheduleConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Upper bound for the per-request timeout (seconds)
const MAX_TIMEOUT_SECS: u64 = 300;

/// Upper bound for the pause between targets (seconds)
const MAX_DELAY_SECS: u64 = 3600;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_credentials(&config.credentials)?;
    validate_schedule_config(&config.settings.schedule)?;
    validate_http_config(&config.settings.http)?;
    validate_notify_config(&config.settings.notify)?;

    if config.targets.is_empty() {
        return Err(ConfigError::Validation(
            "at least one target is required".to_string(),
        ));
    }

    Ok(())
}

/// Validates the notification credentials
fn validate_credentials(credentials: &Credentials) -> ConfigResult<()> {
    if credentials.bot_token.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(
            "bot token must not contain whitespace".to_string(),
        ));
    }

    // Discord channel IDs are numeric snowflakes
    if !credentials.channel_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::Validation(format!(
            "channel id must be numeric, got '{}'",
            credentials.channel_id
        )));
    }

    Ok(())
}

/// Validates pacing configuration
fn validate_schedule_config(config: &ScheduleConfig) -> ConfigResult<()> {
    if config.delay_secs > MAX_DELAY_SECS {
        return Err(ConfigError::Validation(format!(
            "delay-secs must be <= {}, got {}",
            MAX_DELAY_SECS, config.delay_secs
        )));
    }

    if config.jitter_ms > MAX_DELAY_SECS * 1000 {
        return Err(ConfigError::Validation(format!(
            "jitter-ms must be <= {}, got {}",
            MAX_DELAY_SECS * 1000,
            config.jitter_ms
        )));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_http_config(config: &HttpConfig) -> ConfigResult<()> {
    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates the notification endpoint
fn validate_notify_config(config: &NotifyConfig) -> ConfigResult<()> {
    let url = Url::parse(&config.api_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api-base: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "api-base '{}' must use HTTP or HTTPS",
            config.api_base
        )));
    }

    Ok(())
}
