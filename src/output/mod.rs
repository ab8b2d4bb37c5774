//! Output module for run summaries
//!
//! This module collects the per-target outcome of one monitoring pass and
//! reports aggregate counts once the pass is over.

mod stats;

pub use stats::{print_summary, CheckOutcome, CheckRecord, NotifyStatus, RunSummary};
