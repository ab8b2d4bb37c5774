//! Availability verdict definitions
//!
//! A verdict is produced once per target per run and consumed immediately by
//! the notifier.

use std::fmt;

pub const STATUS_UNAVAILABLE: &str = "Currently unavailable";
pub const STATUS_AVAILABLE: &str = "Available";
pub const STATUS_UNCLEAR: &str = "Status unclear - possibly unavailable";

/// The signal that decided a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictReason {
    /// The server answered with a non-200 status
    HttpStatus(u16),

    /// The availability section contained an unavailability phrase
    UnavailablePhrase,

    /// The availability section contained an in-stock phrase
    InStockPhrase,

    /// A buy button and a price were both present
    BuyButtonWithPrice,

    /// No signal was conclusive
    Unclear,
}

/// Outcome of checking one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub available: bool,
    pub status: String,
    pub reason: VerdictReason,
}

impl Verdict {
    /// Verdict for a non-200 HTTP response
    pub fn http_status(status_code: u16) -> Self {
        Self {
            available: false,
            status: format!("HTTP Status: {}", status_code),
            reason: VerdictReason::HttpStatus(status_code),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            status: STATUS_UNAVAILABLE.to_string(),
            reason: VerdictReason::UnavailablePhrase,
        }
    }

    /// Verdict for an available item, with the price when one was found
    pub fn available(reason: VerdictReason, price: &str) -> Self {
        let status = if price.is_empty() {
            STATUS_AVAILABLE.to_string()
        } else {
            format!("{} - Price: {}", STATUS_AVAILABLE, price)
        };

        Self {
            available: true,
            status,
            reason,
        }
    }

    pub fn unclear() -> Self {
        Self {
            available: false,
            status: STATUS_UNCLEAR.to_string(),
            reason: VerdictReason::Unclear,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Available={}, Status={}", self.available, self.status)
    }
}
