//! Run statistics for one pass over the target list

use crate::monitor::Verdict;
use crate::target::Target;
use chrono::{DateTime, Utc};

/// What happened when a target was checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The page was fetched and a verdict reached
    Verdict(Verdict),

    /// The check failed before a verdict could be reached
    Error(String),
}

/// Whether an availability notification was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStatus {
    /// The verdict did not call for a notification
    NotRequired,
    Sent,
    Failed,
}

/// Record of checking one target
#[derive(Debug, Clone)]
pub struct CheckRecord {
    pub target: Target,
    pub outcome: CheckOutcome,
    pub notify: NotifyStatus,
    pub checked_at: DateTime<Utc>,
}

impl CheckRecord {
    pub fn is_available(&self) -> bool {
        matches!(&self.outcome, CheckOutcome::Verdict(verdict) if verdict.available)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Error(_))
    }
}

/// Summary of one monitoring pass
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub records: Vec<CheckRecord>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, record: CheckRecord) {
        self.records.push(record);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn checked(&self) -> usize {
        self.records.len()
    }

    pub fn available(&self) -> usize {
        self.records.iter().filter(|r| r.is_available()).count()
    }

    pub fn unavailable(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !r.is_available() && !r.is_error())
            .count()
    }

    pub fn errors(&self) -> usize {
        self.records.iter().filter(|r| r.is_error()).count()
    }

    pub fn notifications_sent(&self) -> usize {
        self.count_notify(NotifyStatus::Sent)
    }

    pub fn notifications_failed(&self) -> usize {
        self.count_notify(NotifyStatus::Failed)
    }

    /// Wall-clock duration of the pass, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    fn count_notify(&self, status: NotifyStatus) -> usize {
        self.records.iter().filter(|r| r.notify == status).count()
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Restock-Watch Run ===\n");

    println!("Overview:");
    println!("  Targets checked: {}", summary.checked());
    println!("  Available: {}", summary.available());
    println!("  Unavailable: {}", summary.unavailable());
    println!("  Errors: {}", summary.errors());
    println!(
        "  Notifications: {} sent, {} failed",
        summary.notifications_sent(),
        summary.notifications_failed()
    );
    if let Some(seconds) = summary.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Targets:");
    for record in &summary.records {
        match &record.outcome {
            CheckOutcome::Verdict(verdict) => println!("  {} -> {}", record.target, verdict.status),
            CheckOutcome::Error(message) => println!("  {} -> error: {}", record.target, message),
        }
    }
}
