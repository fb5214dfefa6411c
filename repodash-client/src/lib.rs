//! Repodash HTTP Client
//!
//! A small, type-safe client for the repository dashboard backend.
//!
//! The backend exposes four endpoints under its `/api` prefix:
//! - `GET /repos` with optional `search` and `language` filters
//! - `GET /repos/stats`
//! - `GET /repos/languages`
//! - `POST /repos/refresh`
//!
//! # Example
//!
//! ```no_run
//! use repodash_client::DashboardClient;
//! use repodash_core::dto::query::RepositoryQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), repodash_client::ClientError> {
//!     let client = DashboardClient::new("http://localhost:8080/api");
//!
//!     let repos = client
//!         .list_repositories(&RepositoryQuery::new("cli", "Rust"))
//!         .await?;
//!
//!     println!("Found {} repositories", repos.len());
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod repos;

pub use api::RepositoryApi;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the dashboard backend
///
/// No retries and no timeouts beyond the reqwest defaults; pass a configured
/// `reqwest::Client` to [`DashboardClient::with_client`] to change that.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    /// Base URL including the `/api` segment (e.g., "http://localhost:8080/api")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl DashboardClient {
    /// Create a new dashboard client
    ///
    /// # Arguments
    /// * `base_url` - The API base URL, including the `/api` segment
    ///
    /// # Example
    /// ```
    /// use repodash_client::DashboardClient;
    ///
    /// let client = DashboardClient::new("http://localhost:8080/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new dashboard client with a custom HTTP client
    ///
    /// # Arguments
    /// * `base_url` - The API base URL
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    ///
    /// Any non-2xx status is a failure, whatever the body says.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::transport(status.as_u16(), error_text));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| ClientError::Parse(format!("Failed to parse JSON response: {}", e)))
    }
}
