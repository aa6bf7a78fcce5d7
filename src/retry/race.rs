//! Deadline race for a single attempt.

use crate::error::AttemptError;
use std::future::Future;
use std::time::Duration;

/// Race `fut` against a wall-clock deadline. If the deadline fires first the
/// attempt future is dropped, which cancels its pending I/O and releases its
/// transfer handle; the caller sees a timeout failure. The timer never
/// outlives the race. With no deadline the future is awaited unbounded.
pub async fn with_deadline<T, Fut>(
    deadline: Option<Duration>,
    fut: Fut,
) -> Result<T, AttemptError>
where
    Fut: Future<Output = Result<T, AttemptError>>,
{
    match deadline {
        None => fut.await,
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(AttemptError::Timeout(limit)),
        },
    }
}
