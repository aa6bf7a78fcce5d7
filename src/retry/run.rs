//! Retry loop: run an attempt until success or attempts run out.

use super::{with_deadline, RetryPolicy};
use crate::error::{AttemptError, StoreError};
use std::future::Future;
use tracing::{debug, warn};

/// Per-call cleanup hook, invoked once per failed attempt before the next
/// attempt is scheduled. Must be idempotent and safe to call for attempts
/// that never reached the pipe stage.
pub type OnRetry<'a> = dyn FnMut(&AttemptError) + Send + 'a;

/// Runs `op` until it succeeds or `policy.max_attempts` attempts have
/// failed, then returns `RetryExhausted` wrapping the last error.
///
/// Each invocation of `op` must build its attempt from scratch (fresh source
/// stream, fresh sink); artifacts from a failed attempt are never reused.
/// Attempts are strictly sequential: the next one starts only after the
/// previous failure is observed and the cleanup hook has returned.
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
    mut on_retry: Option<&mut OnRetry<'_>>,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    policy.validate()?;
    let mut attempt = 1u32;
    loop {
        debug!("{}: attempt {}/{}", label, attempt, policy.max_attempts);
        match with_deadline(policy.max_attempt_timeout, op()).await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt >= policy.max_attempts {
                    warn!("{}: giving up after {} attempts: {}", label, attempt, error);
                    return Err(StoreError::RetryExhausted {
                        attempts: attempt,
                        last: error,
                    });
                }
                if let Some(hook) = on_retry.as_mut() {
                    hook(&error);
                }
                warn!(
                    "{}: attempt {} failed: {}; retrying in {:?}",
                    label, attempt, error, policy.backoff
                );
                tokio::time::sleep(policy.backoff).await;
                attempt += 1;
            }
        }
    }
}
