//! Upload path: adapt the input, pipe it to a provider sink, retry on
//! failure with a fresh pipe per attempt.

use super::Store;
use crate::error::{AttemptError, StoreError};
use crate::pipe::TransferHandle;
use crate::provider::UploadOptions;
use crate::retry::run_with_retry;
use crate::source::ByteSource;
use std::collections::BTreeMap;
use tracing::warn;

/// Content type recorded on saved objects when the caller does not set one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Options for `Store::save`.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Ask the provider to compress the object at rest.
    pub compress: bool,
    /// Content type; `application/json` when unset.
    pub content_type: Option<String>,
    /// User metadata attached to the object.
    pub metadata: BTreeMap<String, String>,
    /// Return the object's public URL instead of a bare success.
    pub get_url: bool,
}

impl Store {
    /// Upload `source` to `path`.
    ///
    /// The input is prepared once, before any network activity; every
    /// attempt then opens a fresh source stream and a fresh provider sink,
    /// and a failed attempt's pipe is unwound before the next one starts.
    /// Returns `Some(url)` when `get_url` is set.
    pub async fn save(
        &self,
        path: &str,
        source: ByteSource,
        options: SaveOptions,
    ) -> Result<Option<String>, StoreError> {
        let upload = UploadOptions {
            compress: options.compress,
            content_type: options
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            metadata: options.metadata,
            public: true,
        };
        let url = options
            .get_url
            .then(|| self.provider.object_url(&self.bucket, path));
        let prepared = source.prepare().await?;

        let prepared = &prepared;
        let upload = &upload;
        let mut unwound = move |error: &AttemptError| {
            warn!("save {}: unwound failed attempt: {}", path, error);
        };
        run_with_retry(
            &self.policy,
            "save",
            move || async move {
                let reader = prepared.open().await?;
                let sink = self.provider.upload(&self.bucket, path, upload).await?;
                TransferHandle::new(reader, sink).run().await?;
                Ok(())
            },
            Some(&mut unwound),
        )
        .await?;
        Ok(url)
    }
}
