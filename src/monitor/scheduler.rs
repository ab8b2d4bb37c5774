//! Pacing between consecutive targets
//!
//! This module handles:
//! - The fixed delay inserted after every target
//! - Optional random jitter on top of the delay
//! - The `Pause` seam so tests can skip real sleeping

use crate::config::ScheduleConfig;
use async_trait::async_trait;
use rand::Rng;
use std::sync::Mutex;
use std::time::Duration;

/// Something that can wait for a given duration
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

#[async_trait]
impl Pause for NoPause {
    async fn pause(&self, _duration: Duration) {}
}

/// Records requested pauses without sleeping
///
/// Test double for runs that need to assert on pacing; public so the
/// integration tests can inject it.
#[derive(Debug, Default)]
pub struct RecordingPause {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every duration requested so far
    pub fn recorded(&self) -> Vec<Duration> {
        self.pauses
            .lock()
            .map(|pauses| pauses.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Pause for RecordingPause {
    async fn pause(&self, duration: Duration) {
        if let Ok(mut pauses) = self.pauses.lock() {
            pauses.push(duration);
        }
    }
}

/// Delay policy applied after each target, regardless of its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Fixed delay
    pub delay: Duration,

    /// Maximum random extra delay
    pub jitter: Duration,
}

impl PacingPolicy {
    pub fn new(delay: Duration, jitter: Duration) -> Self {
        Self { delay, jitter }
    }

    /// A policy that never waits
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Computes the next pause: `delay` plus a uniform draw in `[0, jitter]`
    pub fn next_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.delay;
        }

        let max_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        let extra = rand::rng().random_range(0..=max_ms);
        self.delay + Duration::from_millis(extra)
    }
}

impl From<&ScheduleConfig> for PacingPolicy {
    fn from(config: &ScheduleConfig) -> Self {
        Self::new(config.delay(), config.jitter())
    }
}
