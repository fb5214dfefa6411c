//! Repository store
//!
//! Owns the dashboard state and keeps it in sync with the backend.
//! Renderers subscribe to state changes; controls call the store's
//! operations to trigger fetches.

mod repository_store;
mod state;

pub use repository_store::{FetchOutcome, RepositoryStore};
pub use state::DashboardState;
