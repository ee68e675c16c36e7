//! Poker board composer binary.
//!
//! Loads configuration from the environment (and `.env`), then composes,
//! previews or uploads a board as requested on the command line. Logs go to
//! stderr; stdout carries only artifact paths or URLs.

mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    tracing::debug!(?config, "Configuration loaded");

    cli.run(config).await
}
