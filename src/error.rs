//! Error taxonomy: construction failures, attempt-scoped failures, and the
//! terminal errors a caller can actually observe.
//!
//! Attempt-scoped errors (`TransferError`, `AttemptError`) never escape an
//! attempt directly; the retry loop either retries them or wraps the last one
//! in `StoreError::RetryExhausted`.

use std::time::Duration;
use thiserror::Error;

/// Failure reported by the storage provider. Carries the provider's own
/// error so the original cause message survives retry wrapping.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Failure of a single source-to-sink transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Opening a fresh source stream for the attempt failed.
    #[error("source open failed")]
    Open(#[source] std::io::Error),
    /// The source-to-sink copy broke (either half may have raised it).
    #[error("pipe failed")]
    Pipe(#[source] std::io::Error),
    /// All bytes were written but the sink refused to complete.
    #[error("sink failed to complete")]
    Complete(#[source] std::io::Error),
}

/// Error from one attempt of a retried operation.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// The attempt lost the race against its wall-clock deadline.
    #[error("operation did not reach a final state within {0:?}")]
    Timeout(Duration),
}

/// Errors observable by the top-level caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Construction-time failure; nothing was attempted.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The upload input could not become a byte stream. Raised before any
    /// network activity.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
    /// A downloaded buffer could not be decoded into the requested shape.
    #[error("object decode failed: {0}")]
    Decode(String),
    /// Streaming into a caller-supplied sink failed after the download
    /// itself succeeded.
    #[error("local transfer failed")]
    Transfer(#[from] TransferError),
    /// Every attempt failed; `last` is the final attempt's error.
    #[error("operation failed after {attempts} attempts: {last}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        last: AttemptError,
    },
}
