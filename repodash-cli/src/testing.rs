//! In-memory backend for store and controller tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use repodash_client::{ClientError, RepositoryApi, Result};
use repodash_core::domain::repository::Repository;
use repodash_core::domain::stats::RepositoryStats;
use repodash_core::dto::query::RepositoryQuery;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;

use crate::store::DashboardState;

/// A backend call as seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(RepositoryQuery),
    Stats,
    Languages,
    Refresh,
}

/// Fake backend that filters an in-memory collection the way the server does
#[derive(Default)]
pub struct FakeApi {
    repositories: Mutex<Vec<Repository>>,
    refreshed: Mutex<Option<Vec<Repository>>>,
    stats: Mutex<Option<RepositoryStats>>,
    languages: Mutex<Option<Vec<String>>>,
    list_failure: Mutex<Option<u16>>,
    refresh_failure: Mutex<Option<u16>>,
    list_delays: Mutex<HashMap<String, Duration>>,
    call_delay: Mutex<Duration>,
    calls: Mutex<Vec<Call>>,
    probe: Mutex<Option<watch::Receiver<DashboardState>>>,
    loading_seen: Mutex<Vec<bool>>,
}

impl FakeApi {
    pub fn with_repositories(repositories: Vec<Repository>) -> Self {
        let fake = Self::default();
        *fake.stats.lock().unwrap() = Some(stats_for(&repositories));
        *fake.languages.lock().unwrap() = Some(languages_for(&repositories));
        *fake.repositories.lock().unwrap() = repositories;
        fake
    }

    /// Collection returned by the next refresh (and by listings afterwards)
    pub fn set_refreshed(&self, repositories: Vec<Repository>) {
        *self.refreshed.lock().unwrap() = Some(repositories);
    }

    pub fn fail_list(&self, status: u16) {
        *self.list_failure.lock().unwrap() = Some(status);
    }

    pub fn fail_refresh(&self, status: u16) {
        *self.refresh_failure.lock().unwrap() = Some(status);
    }

    pub fn clear_failures(&self) {
        *self.list_failure.lock().unwrap() = None;
        *self.refresh_failure.lock().unwrap() = None;
    }

    pub fn fail_stats(&self) {
        *self.stats.lock().unwrap() = None;
    }

    pub fn fail_languages(&self) {
        *self.languages.lock().unwrap() = None;
    }

    /// Delay listings whose search text equals `search`
    pub fn delay_search(&self, search: &str, delay: Duration) {
        self.list_delays
            .lock()
            .unwrap()
            .insert(search.to_string(), delay);
    }

    /// Delay every call by `delay`
    pub fn delay_all(&self, delay: Duration) {
        *self.call_delay.lock().unwrap() = delay;
    }

    /// Record the store's loading flag at the start of each call
    pub fn watch_loading(&self, receiver: watch::Receiver<DashboardState>) {
        *self.probe.lock().unwrap() = Some(receiver);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.loading_seen.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) {
        let extra = match &call {
            Call::List(query) => query
                .search
                .as_ref()
                .and_then(|s| self.list_delays.lock().unwrap().get(s).copied()),
            _ => None,
        };
        if let Some(probe) = self.probe.lock().unwrap().as_ref() {
            self.loading_seen.lock().unwrap().push(probe.borrow().loading);
        }
        self.calls.lock().unwrap().push(call);

        let delay = extra.unwrap_or(*self.call_delay.lock().unwrap());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RepositoryApi for FakeApi {
    async fn list_repositories(&self, query: &RepositoryQuery) -> Result<Vec<Repository>> {
        self.record(Call::List(query.clone())).await;

        if let Some(status) = *self.list_failure.lock().unwrap() {
            return Err(ClientError::transport(status, "list failed"));
        }

        let repositories = self.repositories.lock().unwrap();
        Ok(repositories
            .iter()
            .filter(|repo| matches_query(repo, query))
            .cloned()
            .collect())
    }

    async fn get_stats(&self) -> Result<RepositoryStats> {
        self.record(Call::Stats).await;
        self.stats
            .lock()
            .unwrap()
            .ok_or_else(|| ClientError::transport(500, "stats failed"))
    }

    async fn get_languages(&self) -> Result<Vec<String>> {
        self.record(Call::Languages).await;
        self.languages
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::Parse("languages failed".to_string()))
    }

    async fn refresh(&self) -> Result<Vec<Repository>> {
        self.record(Call::Refresh).await;

        if let Some(status) = *self.refresh_failure.lock().unwrap() {
            return Err(ClientError::transport(status, "refresh failed"));
        }

        if let Some(refreshed) = self.refreshed.lock().unwrap().take() {
            let mut stats = self.stats.lock().unwrap();
            if stats.is_some() {
                *stats = Some(stats_for(&refreshed));
            }
            let mut languages = self.languages.lock().unwrap();
            if languages.is_some() {
                *languages = Some(languages_for(&refreshed));
            }
            *self.repositories.lock().unwrap() = refreshed;
        }

        Ok(self.repositories.lock().unwrap().clone())
    }
}

fn matches_query(repo: &Repository, query: &RepositoryQuery) -> bool {
    let search_ok = query.search.as_ref().is_none_or(|search| {
        let needle = search.to_lowercase();
        repo.name.to_lowercase().contains(&needle)
            || repo
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    });
    let language_ok = query
        .language
        .as_ref()
        .is_none_or(|language| repo.language.as_ref() == Some(language));

    search_ok && language_ok
}

fn stats_for(repositories: &[Repository]) -> RepositoryStats {
    let private = repositories.iter().filter(|r| r.is_private).count() as u64;
    RepositoryStats {
        total_repositories: repositories.len() as u64,
        public_repositories: repositories.len() as u64 - private,
        private_repositories: private,
        forked_repositories: repositories.iter().filter(|r| r.is_fork).count() as u64,
        total_stars: repositories.iter().map(|r| r.stargazers_count).sum(),
        total_forks: repositories.iter().map(|r| r.forks_count).sum(),
    }
}

fn languages_for(repositories: &[Repository]) -> Vec<String> {
    let mut languages: Vec<String> = repositories
        .iter()
        .filter_map(|r| r.language.clone())
        .collect();
    languages.sort();
    languages.dedup();
    languages
}

/// Builds a repository record with sensible defaults
pub fn repo(id: u64, name: &str, language: Option<&str>, stars: u64) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        full_name: format!("octocat/{}", name),
        description: None,
        html_url: format!("https://github.com/octocat/{}", name),
        stargazers_count: stars,
        forks_count: 0,
        language: language.map(str::to_string),
        created_at: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
        is_private: false,
        is_fork: false,
    }
}

/// A small mixed collection used across tests
pub fn sample_repositories() -> Vec<Repository> {
    vec![
        repo(1, "rivet-cli", Some("Rust"), 12),
        repo(2, "gofetch", Some("Go"), 5),
        repo(3, "notes", None, 0),
        repo(4, "cli-tools", Some("Go"), 3),
    ]
}
