//! Download paths: buffer, JSON value, or streaming into a caller sink.

use super::Store;
use crate::entry;
use crate::error::{StoreError, TransferError};
use crate::retry::run_with_retry;
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Options for the read operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Decompress the downloaded buffer before returning or decoding it.
    /// Caller-selected; the format is never sniffed.
    pub decompress: bool,
}

impl Store {
    /// Download `path` and stream the bytes into `sink`. The download is
    /// retried; the single write into the caller's sink is not, because a
    /// partially written sink cannot be rewound.
    pub async fn read<W>(&self, path: &str, sink: &mut W) -> Result<(), StoreError>
    where
        W: AsyncWrite + Send + Unpin,
    {
        let buffer = self.read_as_buffer(path, ReadOptions::default()).await?;
        sink.write_all(&buffer)
            .await
            .map_err(TransferError::Pipe)?;
        sink.flush().await.map_err(TransferError::Complete)?;
        Ok(())
    }

    /// Download `path` into memory. Each attempt drains a fresh provider
    /// source; optional decompression runs once on the final buffer.
    pub async fn read_as_buffer(
        &self,
        path: &str,
        options: ReadOptions,
    ) -> Result<Vec<u8>, StoreError> {
        let buffer = run_with_retry(
            &self.policy,
            "read",
            move || async move {
                let mut source = self.provider.download(&self.bucket, path).await?;
                let mut buffer = Vec::new();
                tokio::io::copy(&mut source, &mut buffer)
                    .await
                    .map_err(TransferError::Pipe)?;
                Ok(buffer)
            },
            None,
        )
        .await?;
        if options.decompress {
            entry::decompress(&buffer)
        } else {
            Ok(buffer)
        }
    }

    /// Download `path` and decode it as a JSON value.
    pub async fn read_as_object(
        &self,
        path: &str,
        options: ReadOptions,
    ) -> Result<Value, StoreError> {
        let buffer = self.read_as_buffer(path, options).await?;
        entry::parse_object(&buffer)
    }
}
