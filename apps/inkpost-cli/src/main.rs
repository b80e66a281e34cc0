#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::commands::{App, Command};
use crate::config::AppConfig;

/// Inkpost - talk to a blogging site from the terminal
#[derive(Parser, Debug)]
#[command(name = "inkpost")]
#[command(version, about)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// API root, overrides the configuration
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML -> 3) env (INKPOST__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.base_url.as_deref());

    logging::init(&config.logging, cli.verbose);
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");

    let app = App::new(&config)?;
    app.start().await;
    let outcome = app.run(cli.command).await;
    app.save_session();
    outcome
}
