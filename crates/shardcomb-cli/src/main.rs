//! # `shardcomb` driver
//!
//! Command-line front end for the [`shardcomb`] library.
//!
//! ## Usage
//!
//! ```bash
//! shardcomb count 24 12
//! shardcomb unrank 5 2 7
//! shardcomb rank 5 2 3
//! shardcomb --threads 3 run 10 5 --print
//! shardcomb --threads 3 verify 10 5
//! shardcomb bench 24 12 --up-to 4
//! ```
//!
//! Thread settings may also be given through `SHARDCOMB_THREADS` and
//! `SHARDCOMB_MAX_WORKERS`, including from a `.env` file.

mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, Config};
use telemetry::init_tracing;

// Collecting and printing sinks allocate per combination from every worker.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_tracing()?;
    log_startup_info(&config);

    commands::execute(&config)
}

fn log_startup_info(config: &Config) {
    if cfg!(debug_assertions) {
        tracing::debug!("Starting with full config: {:#?}", config);
    } else {
        tracing::debug!(
            "Starting with {} threads (cap {})",
            config.threads,
            config.max_workers
        );
    }
}
