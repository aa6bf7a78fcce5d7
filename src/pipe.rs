//! Pipe one source stream into a provider sink for a single attempt.

use crate::error::TransferError;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

/// Reader half of a transfer. Boxed: sources are files, in-memory buffers,
/// or caller-supplied streams.
pub type SourceReader = Box<dyn AsyncRead + Send + Unpin>;

/// Writer half of a transfer, produced by the provider per attempt.
pub type SinkWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Source/sink pairing for exactly one attempt. Never reused: a partially
/// consumed source must not feed a second attempt.
pub struct TransferHandle {
    source: SourceReader,
    sink: SinkWriter,
}

impl TransferHandle {
    pub fn new(source: SourceReader, sink: SinkWriter) -> Self {
        Self { source, sink }
    }

    /// Copy the source into the sink until EOF, then complete the sink.
    /// Resolves only once the sink has accepted everything; on any stream
    /// failure the sink is aborted before the error is returned, so a failed
    /// attempt never leaves a half-open pipe behind.
    pub async fn run(mut self) -> Result<u64, TransferError> {
        match tokio::io::copy(&mut self.source, &mut self.sink).await {
            Ok(bytes) => {
                self.sink
                    .shutdown()
                    .await
                    .map_err(TransferError::Complete)?;
                Ok(bytes)
            }
            Err(cause) => {
                abort(&mut self.sink).await;
                Err(TransferError::Pipe(cause))
            }
        }
    }
}

/// Force-close a sink. Best effort and idempotent; shutdown failures are
/// swallowed because the attempt has already failed.
pub async fn abort(sink: &mut SinkWriter) {
    let _ = sink.shutdown().await;
}
