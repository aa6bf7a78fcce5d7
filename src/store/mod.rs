//! High-level store operations: save/read/list/delete, each wrapped by the
//! retry orchestrator.

mod read;
mod save;

pub use read::ReadOptions;
pub use save::{SaveOptions, DEFAULT_CONTENT_TYPE};

use crate::config::StoreConfig;
use crate::entry::{self, RemoteEntry};
use crate::error::StoreError;
use crate::provider::{ListQuery, Provider};
use crate::retry::{run_with_retry, RetryPolicy};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Resilient client over a storage provider. Cheap to clone; concurrent
/// calls share only the provider handle and immutable configuration.
#[derive(Clone)]
pub struct Store {
    provider: Arc<dyn Provider>,
    bucket: String,
    policy: RetryPolicy,
}

impl Store {
    /// Build a store over a provider. Fails fast when the configuration is
    /// unusable; nothing here touches the network.
    pub fn new(config: StoreConfig, provider: Arc<dyn Provider>) -> Result<Self, StoreError> {
        let config = config.validated()?;
        Ok(Self {
            bucket: config.options.bucket.clone(),
            policy: config.options.retry_policy(),
            provider,
        })
    }

    /// Bucket this store addresses.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Retry policy applied to every operation.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// List objects under `prefix`. `extra` is merged verbatim into the
    /// provider query as an escape hatch for provider-specific parameters.
    pub async fn list(
        &self,
        prefix: &str,
        extra: Option<Map<String, Value>>,
    ) -> Result<Vec<RemoteEntry>, StoreError> {
        let query = ListQuery {
            prefix: prefix.to_string(),
            extra: extra.unwrap_or_default(),
        };
        let query = &query;
        let raw = run_with_retry(
            &self.policy,
            "list",
            move || async move { Ok(self.provider.list(&self.bucket, query).await?) },
            None,
        )
        .await?;
        Ok(raw.into_iter().map(entry::normalize).collect())
    }

    /// Delete an object. Returns `false`, not an error, for a missing path.
    pub async fn delete(&self, path: &str) -> Result<bool, StoreError> {
        run_with_retry(
            &self.policy,
            "delete",
            move || async move { Ok(self.provider.delete(&self.bucket, path).await?) },
            None,
        )
        .await
    }
}
