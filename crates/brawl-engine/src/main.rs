//! # Brawl
//!
//! Headless runner for the Brawl combat core.
//!
//! Loads a match configuration (first argument, or `brawl.toml`), plays the
//! scripted match to a knockout or the tick limit, and prints the summary as
//! JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use brawl_engine::{run_match, MatchConfig, CONFIG_FILE};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("brawl=info".parse()?))
        .init();

    info!("Brawl starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    let mut config = MatchConfig::load_from(&path);
    config.validate();

    let summary = run_match(&config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    info!("Brawl shutdown complete");
    Ok(())
}
