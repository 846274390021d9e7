//! Talon Engine
//!
//! A poller that continuously discovers shift openings at a remote hiring
//! gateway and claims them as they appear.
//!
//! Architecture:
//! - Configuration: Load settings from a JSON file or the environment
//! - Repository: HTTP communication with the hiring gateway
//! - Engine: snapshot builder, delta detector, bounded dispatcher, aggregator
//! - Scheduler: the poll loop and its cooperative cancellation
//! - Services: booking persistence for accepted claims
//!
//! The engine polls the gateway for postings and their shift slots, diffs
//! the result against the previous cycle, and fans claim attempts out under
//! a concurrency ceiling.

mod config;
mod delta;
mod dispatch;
mod report;
mod repository;
mod scheduler;
mod service;
mod snapshot;
#[cfg(test)]
mod testutil;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ClaimMode, Config};
use crate::repository::HttpShiftGateway;
use crate::scheduler::ClaimPoller;
use crate::service::JsonlBookingLog;
use talon_client::HiringClient;

#[derive(Parser)]
#[command(name = "talon")]
#[command(about = "Shift discovery and claim engine", long_about = None)]
struct Cli {
    /// Path to a JSON configuration file; falls back to environment
    /// variables when absent
    #[arg(long, env = "TALON_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured claim mode
    #[arg(long, value_enum)]
    claim_mode: Option<ClaimMode>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talon_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talon engine");

    let cli = Cli::parse();

    // Load configuration; faults here are fatal, never clamped
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(mode) = cli.claim_mode {
        config.claim_mode = mode;
    }
    config.validate()?;

    info!(
        "Loaded configuration: gateway_url={}, poll_interval={:?}, mode={:?}",
        config.gateway_url, config.poll_interval, config.claim_mode
    );

    // Initialize the gateway client
    let client =
        HiringClient::new(config.gateway_url.clone()).request_timeout(config.claim_timeout);
    let gateway = Arc::new(HttpShiftGateway::new(client, config.claimant_id.clone()));

    info!("Gateway client initialized");

    let booking_log = Arc::new(JsonlBookingLog::new(config.booking_log_path.clone()));

    // Cooperative shutdown: first Ctrl-C cancels, the loop drains and exits
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested, draining in-flight work");
                cancel.cancel();
            }
        }
    });

    let poller = ClaimPoller::new(config, gateway, booking_log, cancel);

    info!("Engine initialized, starting poll loop");
    if let Err(e) = poller.run().await {
        error!("Poller error: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Loads configuration from the given file, or from environment variables
/// with fallback to defaults
fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match Config::from_env() {
        Ok(config) => Ok(config),
        Err(_) => {
            info!("No config in environment, using defaults");
            Ok(Config::default())
        }
    }
}
