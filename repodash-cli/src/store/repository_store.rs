//! Repository store implementation
//!
//! Every repository-replacing request (initial load, filtered fetch, refresh)
//! takes a sequence number. A response is applied only while its number is
//! still the latest issued, so a slow stale response can never overwrite a
//! fresher one. The loading flag is owned by the latest request and cleared
//! when its guard drops, which covers success, failure and cancellation.
//! While a refresh is in flight the flag stays set until the refresh ends.

use repodash_client::{ClientError, RepositoryApi};
use repodash_core::domain::repository::Repository;
use repodash_core::dto::query::RepositoryQuery;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::state::DashboardState;

/// Result of a store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the state
    Applied,
    /// The request failed and the error was recorded
    Failed,
    /// A newer request was issued before this one resolved; nothing applied
    Superseded,
    /// A refresh was already in flight; nothing was sent
    AlreadyRunning,
}

struct Inner {
    api: Arc<dyn RepositoryApi>,
    state: watch::Sender<DashboardState>,
    sequence: AtomicU64,
    /// Sequence number of the latest request whose guard has dropped
    settled: AtomicU64,
    refreshing: AtomicBool,
}

/// Shared handle to the dashboard state
///
/// Cheap to clone; all clones observe and mutate the same state.
#[derive(Clone)]
pub struct RepositoryStore {
    inner: Arc<Inner>,
}

impl RepositoryStore {
    /// Creates a store backed by the given API
    pub fn new(api: Arc<dyn RepositoryApi>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            inner: Arc::new(Inner {
                api,
                state,
                sequence: AtomicU64::new(0),
                settled: AtomicU64::new(0),
                refreshing: AtomicBool::new(false),
            }),
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    /// Loads repositories, stats and languages concurrently
    ///
    /// Only a listing failure becomes the user-visible error; stats and
    /// language failures are logged and leave those sections empty.
    pub async fn load_initial(&self) -> FetchOutcome {
        info!("Loading dashboard");

        let guard = self.begin_request();
        let api = &self.inner.api;
        let unfiltered = RepositoryQuery::unfiltered();

        let (repos, stats, languages) = tokio::join!(
            api.list_repositories(&unfiltered),
            api.get_stats(),
            api.get_languages()
        );

        match stats {
            Ok(stats) => self.inner.state.send_modify(|s| s.stats = Some(stats)),
            Err(e) => warn!("Failed to fetch stats: {}", e),
        }
        match languages {
            Ok(languages) => self.inner.state.send_modify(|s| s.languages = languages),
            Err(e) => warn!("Failed to fetch languages: {}", e),
        }

        guard.finish(repos)
    }

    /// Fetches the repository list for the given filters
    pub async fn fetch_repositories(&self, query: RepositoryQuery) -> FetchOutcome {
        let guard = self.begin_request();
        debug!("Fetching repositories #{} with {:?}", guard.seq, query);

        let result = self.inner.api.list_repositories(&query).await;
        guard.finish(result)
    }

    /// Re-syncs the backend, then reloads stats and languages
    ///
    /// Stats and languages are fetched in that order after the refreshed
    /// repositories arrive. A refresh issued while another is in flight is
    /// ignored.
    pub async fn refresh(&self) -> FetchOutcome {
        if self.inner.refreshing.swap(true, Ordering::SeqCst) {
            info!("Refresh already in progress, ignoring");
            return FetchOutcome::AlreadyRunning;
        }
        let _refreshing = RefreshFlag(&self.inner);

        let guard = self.begin_request();
        info!("Refreshing repositories #{}", guard.seq);

        let api = &self.inner.api;
        let result = api.refresh().await;
        let failed = result.is_err();
        let outcome = guard.apply_result(result);
        if failed {
            return outcome;
        }

        match api.get_stats().await {
            Ok(stats) => self.inner.state.send_modify(|s| s.stats = Some(stats)),
            Err(e) => warn!("Failed to fetch stats after refresh: {}", e),
        }
        match api.get_languages().await {
            Ok(languages) => self.inner.state.send_modify(|s| s.languages = languages),
            Err(e) => warn!("Failed to fetch languages after refresh: {}", e),
        }

        outcome
    }

    /// Starts a repository-replacing request
    fn begin_request(&self) -> LoadingGuard {
        let seq = self.inner.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        LoadingGuard {
            inner: Arc::clone(&self.inner),
            seq,
        }
    }
}

/// Clears the refresh flag when the refresh ends, however it ends
///
/// Also releases `loading` if the latest request already settled while the
/// refresh was still running.
struct RefreshFlag<'a>(&'a Inner);

impl Drop for RefreshFlag<'_> {
    fn drop(&mut self) {
        let inner = self.0;
        inner.refreshing.store(false, Ordering::SeqCst);
        inner.state.send_if_modified(|state| {
            let settled = inner.settled.load(Ordering::SeqCst);
            if settled != inner.sequence.load(Ordering::SeqCst) || !state.loading {
                return false;
            }
            state.loading = false;
            true
        });
    }
}

/// Scope of one sequenced request
///
/// Dropping the guard clears `loading` if this is still the latest request
/// and no refresh is running.
struct LoadingGuard {
    inner: Arc<Inner>,
    seq: u64,
}

impl LoadingGuard {
    fn is_latest(&self) -> bool {
        self.inner.sequence.load(Ordering::SeqCst) == self.seq
    }

    /// Applies a listing result and releases the guard
    fn finish(self, result: Result<Vec<Repository>, ClientError>) -> FetchOutcome {
        self.apply_result(result)
    }

    fn apply_result(&self, result: Result<Vec<Repository>, ClientError>) -> FetchOutcome {
        match result {
            Ok(repositories) => {
                let count = repositories.len();
                if self.apply(|s| s.repositories = repositories) {
                    debug!("Applied {} repositories from #{}", count, self.seq);
                    FetchOutcome::Applied
                } else {
                    FetchOutcome::Superseded
                }
            }
            Err(e) => {
                error!("Failed to fetch repositories: {}", e);
                let message = e.to_string();
                if self.apply(|s| s.error = Some(message)) {
                    FetchOutcome::Failed
                } else {
                    FetchOutcome::Superseded
                }
            }
        }
    }

    /// Mutates the state only if this request is still the latest
    ///
    /// The check runs under the channel's write lock so a request that begins
    /// concurrently is ordered strictly before or after it.
    fn apply(&self, update: impl FnOnce(&mut DashboardState)) -> bool {
        let applied = self.inner.state.send_if_modified(|state| {
            if !self.is_latest() {
                return false;
            }
            update(state);
            true
        });

        if !applied {
            debug!("Dropping stale response #{}", self.seq);
        }
        applied
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let seq = self.seq;
        let inner = &self.inner;
        inner.state.send_if_modified(|state| {
            if inner.sequence.load(Ordering::SeqCst) != seq {
                return false;
            }
            inner.settled.store(seq, Ordering::SeqCst);
            if inner.refreshing.load(Ordering::SeqCst) || !state.loading {
                return false;
            }
            state.loading = false;
            true
        });
    }
}
