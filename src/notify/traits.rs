//! Notifier trait and message formatting
//!
//! This module defines the interface used by the monitor to announce
//! available items, independent of the chat service behind it.

use crate::{Result, WatchError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Builds the message posted when an item becomes available
///
/// # Example
///
/// ```
/// use restock_watch::notify::availability_message;
///
/// assert_eq!(
///     availability_message("https://a.co/d/XYZ"),
///     "🎉 This item is now available! Check it out: https://a.co/d/XYZ"
/// );
/// ```
pub fn availability_message(short_url: &str) -> String {
    format!("🎉 This item is now available! Check it out: {}", short_url)
}

/// Delivers a text message to the configured destination
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `message`, failing with `WatchError::Notify` on any delivery problem
    async fn send(&self, message: &str) -> Result<()>;
}

/// Collects messages in memory instead of sending them
///
/// Test double for the notifier seam; public so the integration tests can
/// inspect what a run would have posted.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        self.messages
            .lock()
            .map_err(|_| WatchError::Notify("message buffer poisoned".to_string()))?
            .push(message.to_string());
        Ok(())
    }
}
