//! Monitor coordinator - main check loop
//!
//! This module walks the target list once, in order:
//! - Fetching and classifying each target
//! - Notifying when a target is available
//! - Recording the outcome in the run summary
//! - Pausing before moving on

use crate::config::Config;
use crate::monitor::classifier::AvailabilityClassifier;
use crate::monitor::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::monitor::scheduler::{PacingPolicy, Pause};
use crate::monitor::verdict::Verdict;
use crate::notify::{availability_message, Notifier};
use crate::output::{CheckOutcome, CheckRecord, NotifyStatus, RunSummary};
use crate::target::Target;
use crate::{Result, WatchError};
use chrono::Utc;
use reqwest::Client;

/// Fetches and classifies a single target
///
/// Non-200 responses short-circuit to an HTTP status verdict; the classifier
/// only sees successful page bodies.
pub async fn check_target(
    client: &Client,
    classifier: &AvailabilityClassifier,
    target: &Target,
) -> Result<Verdict> {
    match fetch_page(client, target).await? {
        FetchResult::HttpStatus { status_code } => Ok(Verdict::http_status(status_code)),
        FetchResult::Page { body, .. } => classifier.classify(&body),
    }
}

/// Main monitor coordinator structure
pub struct Coordinator<'a> {
    targets: &'a [Target],
    client: Client,
    classifier: AvailabilityClassifier,
    pacing: PacingPolicy,
    notifier: &'a dyn Notifier,
    pause: &'a dyn Pause,
}

impl<'a> Coordinator<'a> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The monitor configuration
    /// * `notifier` - Where availability messages are sent
    /// * `pause` - How the delay between targets is waited out
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(WatchError)` - Failed to build the HTTP client or classifier
    pub fn new(
        config: &'a Config,
        notifier: &'a dyn Notifier,
        pause: &'a dyn Pause,
    ) -> Result<Self> {
        Ok(Self {
            targets: &config.targets,
            client: build_http_client(&config.settings.http)?,
            classifier: AvailabilityClassifier::new()?,
            pacing: PacingPolicy::from(&config.settings.schedule),
            notifier,
            pause,
        })
    }

    /// Overrides the pacing policy taken from the configuration
    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    /// Runs one pass over every target
    ///
    /// Per-target failures are logged and recorded; they never abort the
    /// pass. The pacing delay follows every target, whatever its outcome.
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::new();

        for target in self.targets {
            let record = self.process_target(target).await;
            summary.record(record);

            let delay = self.pacing.next_delay();
            tracing::debug!("Waiting {:?} before next target", delay);
            self.pause.pause(delay).await;
        }

        summary.finish();
        tracing::info!(
            "Run complete: {} checked, {} available, {} unavailable, {} errors, {} notifications sent",
            summary.checked(),
            summary.available(),
            summary.unavailable(),
            summary.errors(),
            summary.notifications_sent()
        );

        summary
    }

    /// Checks one target and notifies if it is available
    async fn process_target(&self, target: &Target) -> CheckRecord {
        tracing::info!("Checking URL: {}", target);

        let (outcome, notify) = match check_target(&self.client, &self.classifier, target).await {
            Ok(verdict) => {
                tracing::info!("Result for {}: {}", target, verdict);

                let notify = if verdict.available {
                    self.notify_available(target).await
                } else {
                    NotifyStatus::NotRequired
                };

                (CheckOutcome::Verdict(verdict), notify)
            }
            Err(e) => {
                tracing::error!("Error checking {}: {}", target, e);
                (CheckOutcome::Error(e.to_string()), NotifyStatus::NotRequired)
            }
        };

        CheckRecord {
            target: target.clone(),
            outcome,
            notify,
            checked_at: Utc::now(),
        }
    }

    async fn notify_available(&self, target: &Target) -> NotifyStatus {
        let message = availability_message(target.short_url());

        match self.notifier.send(&message).await {
            Ok(()) => {
                tracing::info!("Sent availability message for {}", target.short_url());
                NotifyStatus::Sent
            }
            Err(e) => {
                tracing::error!("Error sending availability message: {}", e);
                NotifyStatus::Failed
            }
        }
    }
}

/// Runs a complete monitoring pass with the given collaborators
pub async fn run_monitor(
    config: &Config,
    notifier: &dyn Notifier,
    pause: &dyn Pause,
) -> Result<RunSummary> {
    let coordinator = Coordinator::new(config, notifier, pause)?;
    Ok(coordinator.run().await)
}
