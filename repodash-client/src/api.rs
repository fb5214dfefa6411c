//! Repository API abstraction
//!
//! The dashboard store talks to the backend through this trait so it can be
//! driven by an in-memory fake in tests.

use async_trait::async_trait;
use repodash_core::domain::repository::Repository;
use repodash_core::domain::stats::RepositoryStats;
use repodash_core::dto::query::RepositoryQuery;

use crate::DashboardClient;
use crate::error::Result;

/// The four backend operations the dashboard depends on
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// List repositories matching the query
    async fn list_repositories(&self, query: &RepositoryQuery) -> Result<Vec<Repository>>;

    /// Fetch aggregate statistics
    async fn get_stats(&self) -> Result<RepositoryStats>;

    /// Fetch the distinct languages across all repositories
    async fn get_languages(&self) -> Result<Vec<String>>;

    /// Ask the backend to re-sync from the hosting provider
    async fn refresh(&self) -> Result<Vec<Repository>>;
}

#[async_trait]
impl RepositoryApi for DashboardClient {
    async fn list_repositories(&self, query: &RepositoryQuery) -> Result<Vec<Repository>> {
        DashboardClient::list_repositories(self, query).await
    }

    async fn get_stats(&self) -> Result<RepositoryStats> {
        DashboardClient::get_stats(self).await
    }

    async fn get_languages(&self) -> Result<Vec<String>> {
        DashboardClient::get_languages(self).await
    }

    async fn refresh(&self) -> Result<Vec<Repository>> {
        DashboardClient::refresh(self).await
    }
}
