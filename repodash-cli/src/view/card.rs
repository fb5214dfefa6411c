//! Repository cards and the card grid

use colored::*;
use repodash_core::domain::repository::Repository;

use super::SKELETON_COUNT;
use super::format::{format_date, format_number};

/// Render one repository as a card
pub fn render_card(repo: &Repository) -> String {
    let mut lines = Vec::new();

    let mut title = format!("  {} {}", "▸".cyan(), repo.name.bold());
    if repo.is_private {
        title.push_str(&format!(" {}", "[Private]".yellow()));
    }
    if repo.is_fork {
        title.push_str(&format!(" {}", "[Fork]".blue()));
    }
    lines.push(title);
    lines.push(format!("    {}", repo.full_name.dimmed()));

    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("    {}", description));
    }

    let mut meta = Vec::new();
    if let Some(language) = &repo.language {
        meta.push(format!("{} {}", "●".green(), language));
    }
    meta.push(format!("★ {}", format_number(repo.stargazers_count)));
    meta.push(format!("⑂ {}", format_number(repo.forks_count)));
    lines.push(format!("    {}", meta.join("   ")));

    lines.push(format!(
        "    {}   {} {}",
        format!("Updated {}", format_date(&repo.updated_at)).dimmed(),
        "↗".cyan(),
        repo.html_url.underline()
    ));

    lines.join("\n")
}

/// Render the repository grid
///
/// # Arguments
/// * `repos` - Repositories to show
/// * `loading` - Whether a fetch is in flight
/// * `filtered` - Whether search or language filters are active
pub fn render_grid(repos: &[Repository], loading: bool, filtered: bool) -> String {
    if loading && repos.is_empty() {
        return (0..SKELETON_COUNT)
            .map(|_| format!("  {}\n    {}", "░".repeat(24), "░".repeat(40)).dimmed().to_string())
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    if repos.is_empty() {
        let hint = if filtered {
            "Try adjusting your search criteria or filters."
        } else {
            "No repositories available. Make sure your GitHub token is configured properly."
        };
        return format!("{}\n{}", "No repositories found".bold(), hint.dimmed());
    }

    let mut header = format!("Showing {} repositories", repos.len());
    if filtered {
        header.push_str(" (filtered)");
    }

    let cards: Vec<String> = repos.iter().map(render_card).collect();
    format!("{}\n\n{}", header.dimmed(), cards.join("\n\n"))
}
