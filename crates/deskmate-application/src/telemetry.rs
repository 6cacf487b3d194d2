//! Tracing initialization.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Filter defaults to `info` and is overridden by `RUST_LOG`. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
