//! Full dashboard screen

use colored::*;

use super::card::render_grid;
use super::filters::render_filters;
use super::stats::render_stats;
use crate::filter::ActiveFilters;
use crate::store::DashboardState;

/// Render the full-page error shown when the repository listing fails
pub fn render_error(message: &str) -> String {
    [
        format!("{} {}", "✗".red(), "Error Loading Repositories".bold()),
        String::new(),
        format!("  {}", message.red()),
        String::new(),
        "  Make sure your GitHub Personal Access Token is configured in the backend."
            .dimmed()
            .to_string(),
        format!("  Type {} to try again.", ":retry".cyan()),
    ]
    .join("\n")
}

/// Render the whole dashboard for the given state
///
/// The error page replaces everything else while an error is set.
pub fn render_dashboard(state: &DashboardState, filters: &ActiveFilters) -> String {
    if let Some(error) = &state.error {
        return render_error(error);
    }

    let mut sections = vec![format!(
        "{}\n{}",
        "GitHub Repository Dashboard".bold(),
        "Centralized view of all your repositories".dimmed()
    )];

    let stats = render_stats(state.stats.as_ref(), state.loading);
    if !stats.is_empty() {
        sections.push(stats);
    }

    sections.push(render_filters(filters, &state.languages, state.loading));
    sections.push(render_grid(
        &state.repositories,
        state.loading,
        filters.is_active(),
    ));
    sections.push(
        "type to search · :submit · :lang <name|all> · :clear · :refresh · :quit"
            .dimmed()
            .to_string(),
    );

    sections.join("\n\n")
}
