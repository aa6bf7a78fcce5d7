//! Retry and timeout orchestration.
//!
//! Every remote operation runs through this module: each attempt is raced
//! against a wall-clock deadline, failures wait out a fixed backoff before
//! the next attempt, and the last failure is wrapped for the caller once
//! attempts run out.

mod race;
mod run;

pub use race::with_deadline;
pub use run::{run_with_retry, OnRetry};

use crate::error::StoreError;
use std::time::Duration;

/// Retry parameters for one logical call. Backoff is a fixed interval, not a
/// curve: callers configure a delay, matching the exposed options surface.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first. Must be >= 1.
    pub max_attempts: u32,
    /// Fixed delay between a failed attempt and the next.
    pub backoff: Duration,
    /// Wall-clock budget for a single attempt; `None` waits unbounded.
    pub max_attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(500),
            max_attempt_timeout: Some(Duration::from_millis(90_000)),
        }
    }
}

impl RetryPolicy {
    /// Reject unusable policies before any attempt is made.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.max_attempts == 0 {
            return Err(StoreError::InvalidConfiguration(
                "retry policy needs at least one attempt".into(),
            ));
        }
        Ok(())
    }
}
