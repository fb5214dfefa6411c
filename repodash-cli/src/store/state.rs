//! Dashboard state snapshot

use repodash_core::domain::repository::Repository;
use repodash_core::domain::stats::RepositoryStats;

/// Client-visible dashboard state
///
/// Collections are replaced wholesale on each successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    /// Repositories from the most recent applied listing
    pub repositories: Vec<Repository>,

    /// Aggregate statistics, if they loaded
    pub stats: Option<RepositoryStats>,

    /// Known languages for the filter control
    pub languages: Vec<String>,

    /// Whether a repository-replacing request is in flight
    pub loading: bool,

    /// User-visible error from the repository listing
    pub error: Option<String>,
}

impl Default for DashboardState {
    /// Starts in the loading state; the initial load is expected to follow
    fn default() -> Self {
        Self {
            repositories: Vec::new(),
            stats: None,
            languages: Vec::new(),
            loading: true,
            error: None,
        }
    }
}
