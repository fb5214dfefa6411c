//! One-shot repository commands
//!
//! Each command issues its request, prints the result and exits.

use anyhow::{Context, Result};
use colored::*;
use repodash_client::DashboardClient;
use repodash_core::dto::query::RepositoryQuery;

use crate::config::Config;
use crate::view::{render_grid, render_stats};

/// List repositories matching the filters
pub async fn list_repositories(
    config: &Config,
    search: Option<String>,
    language: Option<String>,
) -> Result<()> {
    let client = DashboardClient::new(&config.api_base);
    let query = RepositoryQuery::new(search.unwrap_or_default(), language.unwrap_or_default());

    let repos = client
        .list_repositories(&query)
        .await
        .context("Failed to fetch repositories")?;

    println!("{}", render_grid(&repos, false, query.is_filtered()));
    Ok(())
}

/// Print the stat tiles
pub async fn show_stats(config: &Config) -> Result<()> {
    let client = DashboardClient::new(&config.api_base);
    let stats = client
        .get_stats()
        .await
        .context("Failed to fetch repository stats")?;

    println!("{}", render_stats(Some(&stats), false));
    Ok(())
}

/// Print the known languages
pub async fn list_languages(config: &Config) -> Result<()> {
    let client = DashboardClient::new(&config.api_base);
    let languages = client
        .get_languages()
        .await
        .context("Failed to fetch languages")?;

    if languages.is_empty() {
        println!("{}", "No languages found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} language(s):", languages.len()).bold()
        );
        for language in languages {
            println!("  {} {}", "▸".cyan(), language);
        }
    }

    Ok(())
}

/// Re-sync the backend, then print the refreshed stats and repositories
pub async fn refresh(config: &Config) -> Result<()> {
    let client = DashboardClient::new(&config.api_base);

    println!("{}", "Refreshing repositories...".dimmed());
    let repos = client
        .refresh()
        .await
        .context("Failed to refresh repositories")?;

    match client.get_stats().await {
        Ok(stats) => println!("{}\n", render_stats(Some(&stats), false)),
        Err(e) => tracing::warn!("Failed to fetch stats after refresh: {}", e),
    }

    println!("{}", render_grid(&repos, false, false));
    Ok(())
}
