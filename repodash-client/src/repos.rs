//! Repository-related API endpoints

use repodash_core::domain::repository::Repository;
use repodash_core::domain::stats::RepositoryStats;
use repodash_core::dto::query::RepositoryQuery;
use tracing::debug;

use crate::DashboardClient;
use crate::error::Result;

impl DashboardClient {
    // =============================================================================
    // Repository Listing
    // =============================================================================

    /// List repositories, optionally filtered
    ///
    /// Empty filters are left off the query string entirely.
    ///
    /// # Arguments
    /// * `query` - Search text and language filters
    ///
    /// # Example
    /// ```no_run
    /// # use repodash_client::DashboardClient;
    /// # use repodash_core::dto::query::RepositoryQuery;
    /// # async fn example() -> repodash_client::Result<()> {
    /// let client = DashboardClient::new("http://localhost:8080/api");
    /// let repos = client.list_repositories(&RepositoryQuery::new("", "Go")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_repositories(&self, query: &RepositoryQuery) -> Result<Vec<Repository>> {
        let url = format!("{}/repos", self.base_url);
        let params: Vec<(&str, &str)> = query.to_params().collect();

        debug!("GET {} {:?}", url, params);

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(&params);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Fetch aggregate repository statistics
    pub async fn get_stats(&self) -> Result<RepositoryStats> {
        let url = format!("{}/repos/stats", self.base_url);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Fetch the distinct languages used across all repositories
    pub async fn get_languages(&self) -> Result<Vec<String>> {
        let url = format!("{}/repos/languages", self.base_url);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Refresh
    // =============================================================================

    /// Force the backend to re-sync from the hosting provider
    ///
    /// # Returns
    /// The refreshed, unfiltered repository collection
    pub async fn refresh(&self) -> Result<Vec<Repository>> {
        let url = format!("{}/repos/refresh", self.base_url);
        debug!("POST {}", url);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use mockito::Matcher;

    const REPOS_JSON: &str = r#"[{
        "id": 1,
        "name": "x",
        "fullName": "octocat/x",
        "description": "a tool",
        "htmlUrl": "https://github.com/octocat/x",
        "stargazersCount": 5,
        "forksCount": 1,
        "language": "Go",
        "createdAt": "2023-06-01T00:00:00Z",
        "updatedAt": "2024-01-05T10:00:00Z",
        "isPrivate": false,
        "isFork": false
    }]"#;

    fn client_for(server: &mockito::ServerGuard) -> DashboardClient {
        DashboardClient::new(format!("{}/api", server.url()))
    }

    #[tokio::test]
    async fn test_list_repositories_without_filters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/repos")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(REPOS_JSON)
            .create_async()
            .await;

        let repos = client_for(&server)
            .list_repositories(&RepositoryQuery::unfiltered())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "x");
        assert_eq!(repos[0].language.as_deref(), Some("Go"));
    }

    #[tokio::test]
    async fn test_list_repositories_with_both_filters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/repos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("search".into(), "cli".into()),
                Matcher::UrlEncoded("language".into(), "Rust".into()),
            ]))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let repos = client_for(&server)
            .list_repositories(&RepositoryQuery::new("cli", "Rust"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_list_repositories_omits_empty_search() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/repos")
            .match_query(Matcher::Exact("language=Go".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        client_for(&server)
            .list_repositories(&RepositoryQuery::new("", "Go"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        // A JSON body on an error status must not be treated as data
        let _mock = server
            .mock("GET", "/api/repos")
            .with_status(500)
            .with_body("[]")
            .create_async()
            .await;

        let err = client_for(&server)
            .list_repositories(&RepositoryQuery::unfiltered())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport { status: 500, .. }));
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/repos/stats")
            .with_status(200)
            .with_body("{\"totalRepositories\": \"many\"")
            .create_async()
            .await;

        let err = client_for(&server).get_stats().await.unwrap_err();

        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[tokio::test]
    async fn test_get_stats() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/repos/stats")
            .with_status(200)
            .with_body(
                r#"{"totalRepositories":3,"publicRepositories":2,"privateRepositories":1,
                    "forkedRepositories":1,"totalStars":42,"totalForks":7}"#,
            )
            .create_async()
            .await;

        let stats = client_for(&server).get_stats().await.unwrap();

        mock.assert_async().await;
        assert_eq!(stats.total_repositories, 3);
        assert_eq!(stats.total_stars, 42);
    }

    #[tokio::test]
    async fn test_get_languages() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/repos/languages")
            .with_status(200)
            .with_body(r#"["Go","Rust","TypeScript"]"#)
            .create_async()
            .await;

        let languages = client_for(&server).get_languages().await.unwrap();

        mock.assert_async().await;
        assert_eq!(languages, vec!["Go", "Rust", "TypeScript"]);
    }

    #[tokio::test]
    async fn test_refresh_posts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/repos/refresh")
            .with_status(200)
            .with_body(REPOS_JSON)
            .create_async()
            .await;

        let repos = client_for(&server).refresh().await.unwrap();

        mock.assert_async().await;
        assert_eq!(repos[0].id, 1);
    }

    #[tokio::test]
    async fn test_refresh_forbidden() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/repos/refresh")
            .with_status(403)
            .with_body("bad token")
            .create_async()
            .await;

        let err = client_for(&server).refresh().await.unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert!(err.is_client_error());
    }
}
