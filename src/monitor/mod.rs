//! Monitor module for product page checks
//!
//! This module contains the core checking logic, including:
//! - HTTP fetching with browser-like headers
//! - The availability classifier and its signal tables
//! - Pacing between targets
//! - Overall run coordination

mod classifier;
mod coordinator;
mod fetcher;
mod scheduler;
pub mod signals;
mod verdict;

pub use classifier::{AvailabilityClassifier, PageSignals};
pub use coordinator::{check_target, run_monitor, Coordinator};
pub use fetcher::{
    build_http_client, fetch_page, FetchResult, ACCEPT_LANGUAGE_VALUE, ACCEPT_VALUE,
    BROWSER_USER_AGENT,
};
pub use scheduler::{NoPause, PacingPolicy, Pause, RecordingPause, TokioPause};
pub use verdict::{Verdict, VerdictReason, STATUS_AVAILABLE, STATUS_UNAVAILABLE, STATUS_UNCLEAR};
