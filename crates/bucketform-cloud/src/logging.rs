//! Logging setup for provider processes
//!
//! A provider's stdout belongs to the host handshake, so logs always go to
//! stderr.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber, filtered by `RUST_LOG` (default `info`)
///
/// Panics if a global subscriber is already installed; use
/// [`try_init_logging`] when that can happen.
pub fn init_logging() {
    if let Err(e) = try_init_logging() {
        panic!("failed to install tracing subscriber: {}", e);
    }
}

/// Install the global subscriber unless one is already set
pub fn try_init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .try_init()
}
