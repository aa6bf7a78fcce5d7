//! Storage provider contract: the external collaborator.
//!
//! Implementations own authentication, bucket lifecycle, and the wire
//! protocol. This crate only orchestrates calls against the trait.

use crate::error::ProviderError;
use crate::pipe::{SinkWriter, SourceReader};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Options forwarded to the provider when opening an upload sink.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Ask the provider to compress the object at rest.
    pub compress: bool,
    /// Content type recorded on the object.
    pub content_type: String,
    /// User metadata attached to the object.
    pub metadata: BTreeMap<String, String>,
    /// Saved objects are publicly readable.
    pub public: bool,
}

/// Listing query: prefix plus a verbatim passthrough for provider-specific
/// parameters.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub prefix: String,
    pub extra: Map<String, Value>,
}

/// Raw listing entry as the provider reports it, before normalization.
#[derive(Debug, Clone)]
pub struct RawEntry {
    /// Full object path.
    pub name: String,
    /// Provider metadata envelope; user metadata nests under `"metadata"`.
    pub properties: Value,
}

/// The underlying storage service.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Open a write sink for one upload attempt. Callers request a fresh
    /// sink per attempt and never reuse one.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        options: &UploadOptions,
    ) -> Result<SinkWriter, ProviderError>;

    /// Open a read source for an object.
    async fn download(&self, bucket: &str, path: &str) -> Result<SourceReader, ProviderError>;

    /// List raw entries matching the query.
    async fn list(&self, bucket: &str, query: &ListQuery) -> Result<Vec<RawEntry>, ProviderError>;

    /// Delete an object. `Ok(false)` when it did not exist.
    async fn delete(&self, bucket: &str, path: &str) -> Result<bool, ProviderError>;

    /// Public URL for an object in this provider's address scheme.
    fn object_url(&self, bucket: &str, path: &str) -> String;
}
