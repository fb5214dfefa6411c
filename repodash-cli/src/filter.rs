//! Filter controller
//!
//! Turns search-box and language-selector input into store fetches. Typing
//! is debounced: each keystroke aborts the pending timer and schedules a new
//! one, so a burst of input produces a single fetch with the final text.

use repodash_core::dto::query::RepositoryQuery;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::store::{FetchOutcome, RepositoryStore};

/// Selector value meaning "no language filter"
pub const ALL_LANGUAGES: &str = "all";

/// Current filter inputs as shown in the filter bar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilters {
    pub search: String,
    pub language: String,
}

impl ActiveFilters {
    pub fn is_active(&self) -> bool {
        self.query().is_filtered()
    }

    pub fn query(&self) -> RepositoryQuery {
        RepositoryQuery::new(self.search.clone(), self.language.clone())
    }
}

#[derive(Default)]
struct FilterState {
    filters: ActiveFilters,
    pending: Option<JoinHandle<()>>,
    /// Set once the pending task has claimed its fetch
    fired: bool,
    /// Bumped on every input; a debounce task only fires if it still matches
    generation: u64,
}

impl FilterState {
    fn cancel_pending(&mut self) {
        self.generation += 1;
        // A fired task is detached instead: later input never aborts an in-flight fetch
        match self.pending.take() {
            Some(handle) if !self.fired => {
                handle.abort();
                debug!("Cancelled pending search");
            }
            _ => {}
        }
        self.fired = false;
    }
}

/// Mediates between filter controls and the repository store
#[derive(Clone)]
pub struct FilterController {
    store: RepositoryStore,
    state: Arc<Mutex<FilterState>>,
    quiet_period: Duration,
}

impl FilterController {
    /// Creates a controller that waits `quiet_period` after the last keystroke
    pub fn new(store: RepositoryStore, quiet_period: Duration) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(FilterState::default())),
            quiet_period,
        }
    }

    /// Snapshot of the current filter inputs
    pub fn active_filters(&self) -> ActiveFilters {
        self.lock().filters.clone()
    }

    /// Records new search text and schedules a debounced fetch
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_search_input(&self, text: impl Into<String>) {
        let mut state = self.lock();
        state.cancel_pending();
        state.filters.search = text.into();

        let generation = state.generation;
        let controller = self.clone();
        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(controller.quiet_period).await;
            if let Some(query) = controller.take_if_current(generation) {
                debug!("Debounced search fired with {:?}", query);
                controller.store.fetch_repositories(query).await;
            }
        }));
    }

    /// Fetches immediately with the current search text
    pub async fn submit_search(&self) -> FetchOutcome {
        let query = self.update(|_| {});
        self.store.fetch_repositories(query).await
    }

    /// Applies a new language selection and fetches immediately
    ///
    /// [`ALL_LANGUAGES`] or an empty string clears the language filter.
    pub async fn on_language_change(&self, language: &str) -> FetchOutcome {
        let language = if language.eq_ignore_ascii_case(ALL_LANGUAGES) {
            String::new()
        } else {
            language.trim().to_string()
        };

        let query = self.update(|filters| filters.language = language);
        self.store.fetch_repositories(query).await
    }

    /// Resets both filters and fetches the unfiltered list
    pub async fn clear_filters(&self) -> FetchOutcome {
        let query = self.update(|filters| *filters = ActiveFilters::default());
        self.store.fetch_repositories(query).await
    }

    /// Refreshes the backend, then resets the filters
    ///
    /// The refreshed collection is already unfiltered, so no extra fetch is
    /// issued after the reset. Filters are kept when the refresh did not
    /// apply or when filter input arrived while it was running.
    pub async fn refresh(&self) -> FetchOutcome {
        let generation = {
            let mut state = self.lock();
            state.cancel_pending();
            state.generation
        };

        let outcome = self.store.refresh().await;

        let mut state = self.lock();
        if outcome == FetchOutcome::Applied && state.generation == generation {
            state.filters = ActiveFilters::default();
        } else {
            debug!("Keeping filters after refresh ({:?})", outcome);
        }
        outcome
    }

    /// Waits for the last scheduled search to fire and finish
    ///
    /// Returns at once when no search is pending.
    pub async fn settle(&self) {
        let pending = self.lock().pending.take();
        let Some(handle) = pending else {
            return;
        };
        if let Err(e) = handle.await {
            debug!("Pending search ended early: {}", e);
        }
    }

    /// Re-runs the initial load after a failure
    pub async fn retry(&self) -> FetchOutcome {
        self.update(|filters| *filters = ActiveFilters::default());
        self.store.load_initial().await
    }

    /// Cancels any pending debounce, applies `change` and returns the query
    fn update(&self, change: impl FnOnce(&mut ActiveFilters)) -> RepositoryQuery {
        let mut state = self.lock();
        state.cancel_pending();
        change(&mut state.filters);
        state.filters.query()
    }

    /// Claims the pending slot for a debounce task that is still current
    fn take_if_current(&self, generation: u64) -> Option<RepositoryQuery> {
        let mut state = self.lock();
        if state.generation != generation {
            return None;
        }
        state.fired = true;
        Some(state.filters.query())
    }

    fn lock(&self) -> MutexGuard<'_, FilterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
