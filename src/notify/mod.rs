//! Notification module for Restock-Watch
//!
//! This module delivers the "item available" message to a chat channel.
//! Delivery failures are reported to the caller, which logs and ignores them.

mod discord;
mod traits;

pub use discord::DiscordNotifier;
pub use traits::{availability_message, MemoryNotifier, Notifier};
