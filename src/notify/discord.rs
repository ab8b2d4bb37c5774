//! Discord channel notifier
//!
//! Posts plain-text messages through the Discord REST API using a bot token.

use crate::config::{Credentials, NotifyConfig};
use crate::notify::traits::Notifier;
use crate::{Result, WatchError};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Message creation payload
#[derive(Debug, Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

/// Sends messages to one Discord channel
pub struct DiscordNotifier {
    client: Client,
    endpoint: String,
    authorization: String,
}

impl DiscordNotifier {
    /// Creates a notifier for the configured channel
    ///
    /// # Arguments
    ///
    /// * `credentials` - Bot token and channel ID
    /// * `config` - API base URL
    pub fn new(credentials: &Credentials, config: &NotifyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(WatchError::ClientBuild)?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/channels/{}/messages",
                config.api_base.trim_end_matches('/'),
                credentials.channel_id
            ),
            authorization: format!("Bot {}", credentials.bot_token),
        })
    }

    /// The URL messages are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.authorization)
            .json(&CreateMessage { content: message })
            .send()
            .await
            .map_err(|e| WatchError::Notify(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WatchError::Notify(format!(
                "Discord returned HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        tracing::debug!("Message delivered to {}", self.endpoint);
        Ok(())
    }
}
