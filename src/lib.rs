//! durastore: resilient access to remote object storage.
//!
//! Wraps an abstract storage provider with bounded-attempt retry, per-attempt
//! wall-clock deadlines, and stream-safe upload handling. The provider itself
//! (authentication, bucket lifecycle, wire protocol) is supplied by the
//! caller as a [`Provider`] implementation; this crate orchestrates calls
//! against it and normalizes the results.

pub mod config;
pub mod logging;

pub mod entry;
pub mod error;
pub mod pipe;
pub mod provider;
pub mod retry;
pub mod source;
pub mod store;

pub use config::{load_config, Credentials, KeyPair, StoreConfig, StoreOptions};
pub use entry::RemoteEntry;
pub use error::{AttemptError, ProviderError, StoreError, TransferError};
pub use pipe::{SinkWriter, SourceReader, TransferHandle};
pub use provider::{ListQuery, Provider, RawEntry, UploadOptions};
pub use retry::RetryPolicy;
pub use source::ByteSource;
pub use store::{ReadOptions, SaveOptions, Store};
