//! Repository query DTO
//!
//! Filters for the repository listing endpoint.

use serde::{Deserialize, Serialize};

/// Filters applied to `GET /api/repos`
///
/// Both dimensions are optional. Empty or whitespace-only values are treated
/// as absent and never reach the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryQuery {
    /// Free-text search over name and description
    pub search: Option<String>,

    /// Primary language to match
    pub language: Option<String>,
}

impl RepositoryQuery {
    /// Create a query from raw input values
    pub fn new(search: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            search: non_empty(search.into()),
            language: non_empty(language.into()),
        }
    }

    /// Query with no filters
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// Whether any filter is set
    pub fn is_filtered(&self) -> bool {
        self.to_params().next().is_some()
    }

    /// Query string pairs, skipping empty filters
    pub fn to_params(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("search", &self.search), ("language", &self.language)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (key, v))
            })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
