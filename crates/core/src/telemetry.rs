use tracing_subscriber::{EnvFilter, fmt};

/// Initialise the global tracing subscriber for a binary.
///
/// Respects `RUST_LOG`; defaults to `info`. Safe to call once per process.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
