//! # Granny House
//!
//! Headless host for the Granny House simulation.
//!
//! This binary ties together:
//! - Configuration loading (`granny.toml`, or the path given as first argument;
//!   `--init [path]` writes the defaults)
//! - Frame timing with optional wall-clock pacing
//! - The autopilot input driver and the log-backed renderer
//! - The end-of-run summary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod autopilot;
mod config;
mod summary;
mod timing;
mod trace_renderer;

use anyhow::Result;
use config::{EngineConfig, CONFIG_FILE};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Writes a default config file instead of running.
const INIT_FLAG: &str = "--init";

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("granny=info".parse()?)
                .add_directive("granny_gameplay=info".parse()?),
        )
        .init();

    info!("Granny House starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let first = args.next();
    if first.as_deref() == Some(INIT_FLAG) {
        let path = args.next().map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
        EngineConfig::default().save_to(&path)?;
        return Ok(());
    }

    let path = first.map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let mut config = EngineConfig::load_from(&path);
    config.validate();

    let summary = app::run(&config)?;
    summary.log();
    if config.json_summary {
        println!("{}", summary.to_json()?);
    }

    info!("Granny House shutdown complete");
    Ok(())
}
