//! Store configuration: provider credentials plus retry/timeout options.
//!
//! Configuration is validated once, when the `Store` is built, and is
//! immutable afterwards. There is no process-wide mutable state.

use crate::error::StoreError;
use crate::retry::RetryPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Inline service-account credential pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPair {
    pub client_email: String,
    pub private_key: String,
}

impl KeyPair {
    /// Load an inline pair from a provider key file (JSON with
    /// `client_email` and `private_key` fields).
    pub fn from_key_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read key file: {}", path.display()))?;
        let pair: KeyPair = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse key file: {}", path.display()))?;
        Ok(pair)
    }
}

/// Provider credential descriptor: a project plus either a key file on disk
/// or an inline credential pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub project_id: String,
    #[serde(default)]
    pub key_file: Option<PathBuf>,
    #[serde(default)]
    pub key_pair: Option<KeyPair>,
}

impl Credentials {
    /// Validate and normalize. Inline private keys often arrive with literal
    /// `\n` sequences (env vars, JSON config); those become real newlines.
    pub fn normalized(mut self) -> Result<Self, StoreError> {
        if self.project_id.is_empty() {
            return Err(StoreError::InvalidConfiguration(
                "credentials need a `project_id`".into(),
            ));
        }
        match (&self.key_file, &mut self.key_pair) {
            (None, None) => {
                return Err(StoreError::InvalidConfiguration(
                    "credentials need a `key_file` or an inline `key_pair`".into(),
                ));
            }
            (_, Some(pair)) => {
                if pair.client_email.is_empty() || pair.private_key.is_empty() {
                    return Err(StoreError::InvalidConfiguration(
                        "inline `key_pair` needs `client_email` and `private_key`".into(),
                    ));
                }
                pair.private_key = pair.private_key.replace("\\n", "\n");
            }
            (Some(_), None) => {}
        }
        Ok(self)
    }
}

fn default_retries_count() -> u32 {
    3
}

fn default_retry_interval_ms() -> u64 {
    500
}

fn default_max_retry_timeout_ms() -> u64 {
    90_000
}

/// Per-store options: target bucket plus the retry surface exposed to users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreOptions {
    pub bucket: String,
    /// Maximum attempts per operation, including the first.
    #[serde(default = "default_retries_count")]
    pub retries_count: u32,
    /// Fixed delay between a failed attempt and the next, in milliseconds.
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    /// Wall-clock budget for a single attempt, in milliseconds.
    #[serde(default = "default_max_retry_timeout_ms")]
    pub max_retry_timeout_ms: u64,
}

impl StoreOptions {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            retries_count: default_retries_count(),
            retry_interval_ms: default_retry_interval_ms(),
            max_retry_timeout_ms: default_max_retry_timeout_ms(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retries_count,
            backoff: Duration::from_millis(self.retry_interval_ms),
            max_attempt_timeout: Some(Duration::from_millis(self.max_retry_timeout_ms)),
        }
    }
}

/// Full store configuration as loaded from a file or built in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub credentials: Credentials,
    pub options: StoreOptions,
}

impl StoreConfig {
    /// Validate everything a `Store` needs before any attempt is made.
    pub fn validated(mut self) -> Result<Self, StoreError> {
        self.credentials = self.credentials.normalized()?;
        if self.options.bucket.is_empty() {
            return Err(StoreError::InvalidConfiguration(
                "options need a `bucket`".into(),
            ));
        }
        self.options.retry_policy().validate()?;
        Ok(self)
    }
}

/// Load store configuration from a TOML file. Validation still happens in
/// `Store::new`.
pub fn load_config(path: &Path) -> Result<StoreConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: StoreConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    Ok(cfg)
}
