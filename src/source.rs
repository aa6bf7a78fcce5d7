//! Upload input adaptation: every accepted input becomes a byte stream.
//!
//! The caller names the input shape explicitly; nothing is sniffed at
//! runtime. Preparation runs once per logical call, before any network
//! activity, and leaves a source that can open a fresh stream per attempt.

use crate::error::{StoreError, TransferError};
use crate::pipe::SourceReader;
use serde::Serialize;
use serde_json::Value;
use std::io::Cursor;
use std::path::PathBuf;

/// Tagged upload input.
pub enum ByteSource {
    /// Raw bytes already in memory.
    Bytes(Vec<u8>),
    /// Structured value, serialized to compact JSON before upload.
    Value(Value),
    /// File on the local filesystem, opened fresh for every attempt.
    File(PathBuf),
    /// Caller-supplied stream. Drained to memory before the first attempt so
    /// a retry never sees a partially consumed reader.
    Reader(SourceReader),
}

impl ByteSource {
    /// Build a `Value` source from any serializable type. Serialization
    /// failures surface here, before the store is ever touched.
    pub fn from_value<T: Serialize>(value: &T) -> Result<Self, StoreError> {
        let value = serde_json::to_value(value)
            .map_err(|e| StoreError::UnsupportedInput(format!("value is not serializable: {e}")))?;
        Ok(ByteSource::Value(value))
    }

    /// Serialize or drain whatever cannot be re-read, leaving a source that
    /// opens a fresh stream for every attempt.
    pub async fn prepare(self) -> Result<PreparedSource, StoreError> {
        match self {
            ByteSource::Bytes(bytes) => Ok(PreparedSource::Bytes(bytes)),
            ByteSource::Value(value) => {
                let json = serde_json::to_vec(&value).map_err(|e| {
                    StoreError::UnsupportedInput(format!("value is not serializable: {e}"))
                })?;
                Ok(PreparedSource::Bytes(json))
            }
            ByteSource::File(path) => Ok(PreparedSource::File(path)),
            ByteSource::Reader(mut reader) => {
                let mut buffer = Vec::new();
                tokio::io::copy(&mut reader, &mut buffer).await.map_err(|e| {
                    StoreError::UnsupportedInput(format!("input stream failed before upload: {e}"))
                })?;
                Ok(PreparedSource::Bytes(buffer))
            }
        }
    }
}

/// Re-openable upload source: yields a fresh reader per attempt.
pub enum PreparedSource {
    Bytes(Vec<u8>),
    File(PathBuf),
}

impl PreparedSource {
    /// Open a fresh reader. Called once per attempt; file handles are closed
    /// by stream termination when the transfer ends.
    pub async fn open(&self) -> Result<SourceReader, TransferError> {
        match self {
            PreparedSource::Bytes(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            PreparedSource::File(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(TransferError::Open)?;
                Ok(Box::new(file))
            }
        }
    }
}
