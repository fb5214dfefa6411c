//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod repos;
mod watch;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List repositories, optionally filtered
    List {
        /// Free-text search over name and description
        #[arg(short, long)]
        search: Option<String>,

        /// Only show repositories in this language
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Show aggregate repository statistics
    Stats,
    /// List the languages used across repositories
    Languages,
    /// Re-sync the backend from the hosting provider
    Refresh,
    /// Interactive dashboard with debounced search
    ///
    /// Reads one input per line until `:quit` or end of input. At end of
    /// input, pending fetches finish and the final dashboard is printed.
    Watch,
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The resolved configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List { search, language } => {
            repos::list_repositories(config, search, language).await
        }
        Commands::Stats => repos::show_stats(config).await,
        Commands::Languages => repos::list_languages(config).await,
        Commands::Refresh => repos::refresh(config).await,
        Commands::Watch => watch::run(config).await,
    }
}
