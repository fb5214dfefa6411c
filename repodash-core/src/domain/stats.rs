//! Repository statistics
//!
//! Aggregate counters computed server-side across all repositories.

use serde::{Deserialize, Serialize};

/// Aggregate repository counters
///
/// The backend guarantees `public_repositories + private_repositories ==
/// total_repositories`; the client treats the values as opaque.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    pub total_repositories: u64,
    pub public_repositories: u64,
    pub private_repositories: u64,
    pub forked_repositories: u64,
    pub total_stars: u64,
    pub total_forks: u64,
}
