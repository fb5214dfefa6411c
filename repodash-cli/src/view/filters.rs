//! Search and filter bar

use colored::*;

use crate::filter::ActiveFilters;

/// Render the search box, language selector, refresh control and active filters
pub fn render_filters(filters: &ActiveFilters, languages: &[String], loading: bool) -> String {
    let mut lines = Vec::new();

    let search = if filters.search.is_empty() {
        "Search repositories by name or description...".dimmed().to_string()
    } else {
        filters.search.clone()
    };
    lines.push(format!("  {} {}", "Search:".bold(), search));

    let selected = if filters.language.is_empty() {
        "All Languages".to_string()
    } else {
        filters.language.clone()
    };
    let mut language_line = format!("  {} {}", "Language:".bold(), selected.cyan());
    if !languages.is_empty() {
        language_line.push_str(&format!("  {}", format!("({})", languages.join(", ")).dimmed()));
    }
    lines.push(language_line);

    let refresh = if loading {
        "[Refreshing…]".dimmed()
    } else {
        "[Refresh]".green()
    };
    lines.push(format!("  {}", refresh));

    if filters.is_active() {
        let mut active = vec!["Active filters:".dimmed().to_string()];
        if !filters.search.trim().is_empty() {
            active.push(format!("Search: \"{}\"", filters.search).blue().to_string());
        }
        if !filters.language.is_empty() {
            active.push(format!("Language: {}", filters.language).green().to_string());
        }
        active.push("(:clear to reset)".dimmed().to_string());
        lines.push(format!("  {}", active.join("  ")));
    }

    lines.join("\n")
}
