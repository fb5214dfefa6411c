//! Statistics tiles

use colored::*;
use repodash_core::domain::stats::RepositoryStats;

use super::SKELETON_COUNT;
use super::format::format_number;

/// Render the six stat tiles
///
/// Draws placeholder tiles while loading and nothing at all when stats are
/// unavailable.
pub fn render_stats(stats: Option<&RepositoryStats>, loading: bool) -> String {
    if loading {
        return (0..SKELETON_COUNT)
            .map(|_| format!("  {}  {}", "░".repeat(20), "░".repeat(6)).dimmed().to_string())
            .collect::<Vec<_>>()
            .join("\n");
    }

    let Some(stats) = stats else {
        return String::new();
    };

    let tiles = [
        ("Total Repositories", stats.total_repositories, "All repositories"),
        ("Public Repositories", stats.public_repositories, "Publicly accessible"),
        ("Private Repositories", stats.private_repositories, "Private access only"),
        ("Total Stars", stats.total_stars, "Stars received"),
        ("Total Forks", stats.total_forks, "Times forked"),
        ("Forked Repositories", stats.forked_repositories, "Repositories forked by you"),
    ];

    tiles
        .iter()
        .map(|(title, value, description)| {
            format!(
                "  {:<22}{:>8}  {}",
                title,
                format_number(*value).bold(),
                description.dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
