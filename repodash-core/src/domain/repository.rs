//! Repository domain model
//!
//! A single source-control project as exposed by the dashboard backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// A repository record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Identifier assigned by the hosting provider
    pub id: u64,

    /// Short name (e.g., "repodash")
    pub name: String,

    /// Owner-qualified name (e.g., "octocat/repodash")
    pub full_name: String,

    /// Free-form description, if the owner set one
    #[serde(default)]
    pub description: Option<String>,

    /// Link to the repository on the hosting provider
    pub html_url: String,

    /// Number of stars
    pub stargazers_count: u64,

    /// Number of forks
    pub forks_count: u64,

    /// Primary language, if detected
    #[serde(default)]
    pub language: Option<String>,

    /// When the repository was created
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    /// When the repository was last updated
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,

    /// Whether the repository is private
    pub is_private: bool,

    /// Whether the repository is a fork
    pub is_fork: bool,
}
