//! In-memory provider double with fault injection.
//!
//! Uploads commit on sink completion; failures and download stalls are
//! injectable so tests can drive the retry orchestrator.

use async_trait::async_trait;
use durastore::{
    ListQuery, Provider, ProviderError, RawEntry, SinkWriter, SourceReader, UploadOptions,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::io::{self, Cursor, Write};
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::AsyncWrite;

#[derive(Clone)]
struct StoredObject {
    data: Vec<u8>,
    properties: Value,
}

type ObjectMap = Arc<Mutex<BTreeMap<String, StoredObject>>>;

/// Map-backed provider. `fail_next_uploads`/`fail_next_downloads` make the
/// next N calls fail with a connection error; `stall_downloads` makes every
/// download hang long enough to trip an attempt deadline.
#[derive(Default)]
pub struct MemoryProvider {
    objects: ObjectMap,
    upload_failures: AtomicU32,
    download_failures: AtomicU32,
    upload_calls: AtomicUsize,
    download_delay: Mutex<Option<Duration>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_uploads(&self, n: u32) {
        self.upload_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_downloads(&self, n: u32) {
        self.download_failures.store(n, Ordering::SeqCst);
    }

    pub fn stall_downloads(&self, delay: Duration) {
        *self.download_delay.lock().unwrap() = Some(delay);
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    fn key(bucket: &str, path: &str) -> String {
        format!("{bucket}/{path}")
    }
}

fn take_failure(counter: &AtomicU32) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

fn compress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut w = brotli::CompressorWriter::new(&mut out, 4096, 5, 22);
        w.write_all(data).expect("in-memory compression");
    }
    out
}

/// Sink that buffers writes and commits the object on completion, the way a
/// real provider finalizes an upload on its finish signal.
struct MemorySink {
    buffer: Vec<u8>,
    committed: bool,
    objects: ObjectMap,
    key: String,
    properties: Value,
    compress: bool,
}

impl AsyncWrite for MemorySink {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.get_mut().buffer.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if !this.committed {
            this.committed = true;
            let data = if this.compress {
                compress(&this.buffer)
            } else {
                this.buffer.clone()
            };
            this.objects.lock().unwrap().insert(
                this.key.clone(),
                StoredObject {
                    data,
                    properties: this.properties.clone(),
                },
            );
        }
        Poll::Ready(Ok(()))
    }
}

#[async_trait]
impl Provider for MemoryProvider {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        options: &UploadOptions,
    ) -> Result<SinkWriter, ProviderError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.upload_failures) {
            return Err(ProviderError::new("No internet connection."));
        }
        let metadata: serde_json::Map<String, Value> = options
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let properties = json!({
            "contentType": options.content_type,
            "public": options.public,
            "metadata": metadata,
        });
        Ok(Box::new(MemorySink {
            buffer: Vec::new(),
            committed: false,
            objects: Arc::clone(&self.objects),
            key: Self::key(bucket, path),
            properties,
            compress: options.compress,
        }))
    }

    async fn download(&self, bucket: &str, path: &str) -> Result<SourceReader, ProviderError> {
        let delay = *self.download_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if take_failure(&self.download_failures) {
            return Err(ProviderError::new("No internet connection."));
        }
        let objects = self.objects.lock().unwrap();
        match objects.get(&Self::key(bucket, path)) {
            Some(object) => Ok(Box::new(Cursor::new(object.data.clone())) as SourceReader),
            None => Err(ProviderError::new(format!("object not found: {path}"))),
        }
    }

    async fn list(&self, bucket: &str, query: &ListQuery) -> Result<Vec<RawEntry>, ProviderError> {
        let bucket_prefix = format!("{bucket}/");
        let objects = self.objects.lock().unwrap();
        Ok(objects
            .iter()
            .filter_map(|(key, object)| {
                let path = key.strip_prefix(&bucket_prefix)?;
                path.starts_with(&query.prefix).then(|| RawEntry {
                    name: path.to_string(),
                    properties: object.properties.clone(),
                })
            })
            .collect())
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<bool, ProviderError> {
        let mut objects = self.objects.lock().unwrap();
        Ok(objects.remove(&Self::key(bucket, path)).is_some())
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("https://{bucket}.storage.example.com/{path}")
    }
}
