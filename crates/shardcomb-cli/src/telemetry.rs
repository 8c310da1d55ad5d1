//! Logging setup for the `shardcomb` binary.
//!
//! Logs go to stderr so that stdout only carries command output. Filtering
//! follows `RUST_LOG` and defaults to `info`; `RUST_LOG=shardcomb=debug` also
//! shows per-worker progress from the library.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
