//! Repodash CLI
//!
//! Terminal dashboard for the repositories served by the repodash backend.
//!
//! Architecture:
//! - Configuration: API base resolved once from flags/environment
//! - Store: dashboard state kept in sync with the backend
//! - Filter: debounced search and language selection
//! - View: pure renderers from state to terminal text

mod commands;
mod config;
mod filter;
mod store;
#[cfg(test)]
mod testing;
mod view;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, DEFAULT_DEBOUNCE_MS, Mode};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repodash")]
#[command(about = "Repository dashboard", long_about = None)]
struct Cli {
    /// Backend URL; `/api` is appended
    #[arg(long, env = "REPODASH_API_URL")]
    api_url: Option<String>,

    /// Deployment mode, used when no backend URL is given
    #[arg(long, env = "REPODASH_ENV", value_enum, default_value_t = Mode::Development)]
    mode: Mode,

    /// Origin the dashboard is served from (production mode)
    #[arg(long, env = "REPODASH_ORIGIN")]
    origin: Option<String>,

    /// Quiet period in milliseconds before a typed search fires
    #[arg(long, env = "REPODASH_DEBOUNCE_MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the rendered dashboard owns stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repodash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::resolve(
        cli.api_url.as_deref(),
        cli.mode,
        cli.origin.as_deref(),
        Duration::from_millis(cli.debounce_ms),
    )?;
    debug!("Using API base {} ({:?})", config.api_base, config.mode);

    handle_command(cli.command, &config).await
}
