//! Result normalization and read-side decoding.

use crate::error::StoreError;
use crate::provider::RawEntry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;

/// Normalized listing record. Constructed once per raw entry, immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Full object path.
    pub full_path: String,
    /// Provider-supplied metadata envelope.
    pub properties: Map<String, Value>,
    /// User metadata nested inside the envelope.
    pub metadata: Map<String, Value>,
}

/// Shape a raw provider entry into the stable output form. A missing
/// envelope or missing user metadata normalizes to an empty map.
pub fn normalize(entry: RawEntry) -> RemoteEntry {
    let properties = match entry.properties {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let metadata = match properties.get("metadata") {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    RemoteEntry {
        full_path: entry.name,
        properties,
        metadata,
    }
}

/// Decode a downloaded buffer as a UTF-8 JSON value.
pub fn parse_object(buffer: &[u8]) -> Result<Value, StoreError> {
    let text = std::str::from_utf8(buffer)
        .map_err(|e| StoreError::Decode(format!("object is not valid UTF-8: {e}")))?;
    serde_json::from_str(text)
        .map_err(|e| StoreError::Decode(format!("object is not valid JSON: {e}")))
}

/// Decompress a downloaded buffer. Runs only when the caller asked for it;
/// the format is never sniffed.
pub fn decompress(buffer: &[u8]) -> Result<Vec<u8>, StoreError> {
    let mut out = Vec::new();
    let mut decompressor = brotli::Decompressor::new(buffer, 4096);
    decompressor
        .read_to_end(&mut out)
        .map_err(|e| StoreError::Decode(format!("decompression failed: {e}")))?;
    Ok(out)
}
