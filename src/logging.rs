//! Logging init: structured logs to stderr, controlled by the env filter.

use tracing_subscriber::EnvFilter;

/// Initialize tracing output to stderr. Call once from the embedding
/// application; library code only emits events. The subscriber serializes
/// interleaved writes from concurrent store calls.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,durastore=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
