use crate::config::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;
use tracing::{debug, warn};

/// A single movie as returned by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Envelope shared by the popular and search endpoints.
#[derive(Debug, Deserialize)]
struct MoviePage {
    #[serde(default)]
    results: Option<Vec<Movie>>,
}

/// Failure talking to the remote catalog. Status and transport failures are
/// the same kind of error; the variants only differ in what they report.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CatalogError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Status { status: 401 } => {
                "The movie database rejected the API key (401)".to_string()
            }
            CatalogError::Status { status } => {
                format!("The movie database returned HTTP {}", status)
            }
            CatalogError::Transport(e) if e.is_decode() => {
                format!("Unexpected response from the movie database: {}", e)
            }
            CatalogError::Transport(e) => format!("Network error: {}", e),
        }
    }
}

/// Read access to a movie catalog.
pub trait Catalog: Send + Sync + 'static {
    /// Movies currently listed as popular.
    fn fetch_popular(&self) -> impl Future<Output = Result<Vec<Movie>, CatalogError>> + Send;

    /// Movies whose title matches `query`. Blank queries yield no movies.
    fn fetch_by_query(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Movie>, CatalogError>> + Send;
}

/// HTTP client for the TMDb v3 API.
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    async fn get_movies(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Movie>, CatalogError> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!(%endpoint, "requesting movies");

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let page: MoviePage = response.json().await?;
        let movies = page.results.unwrap_or_default();
        debug!(%endpoint, count = movies.len(), "received movies");
        Ok(movies)
    }
}

impl Catalog for CatalogClient {
    async fn fetch_popular(&self) -> Result<Vec<Movie>, CatalogError> {
        self.get_movies("/movie/popular", &[]).await.inspect_err(|e| {
            warn!(error = %e, "error fetching popular movies");
        })
    }

    async fn fetch_by_query(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.get_movies("/search/movie", &[("query", query)])
            .await
            .inspect_err(|e| {
                warn!(error = %e, %query, "error searching movies");
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> CatalogClient {
        let config = CatalogConfig {
            api_key: "test-key".to_string(),
            base_url: server.base_url(),
            ..CatalogConfig::default()
        };
        CatalogClient::new(config).expect("client builds")
    }

    #[tokio::test]
    async fn test_fetch_popular_parses_results() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/movie/popular")
                    .query_param("api_key", "test-key");
                then.status(200).json_body(json!({
                    "page": 1,
                    "results": [{
                        "id": 1,
                        "title": "A",
                        "release_date": "1999-03-01",
                        "vote_average": 7.8,
                        "poster_path": "/x.jpg",
                        "overview": "ignored"
                    }]
                }));
            })
            .await;

        let movies = client_for(&server).fetch_popular().await.expect("popular loads");
        mock.assert_async().await;
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 1);
        assert_eq!(movies[0].title, "A");
        assert_eq!(movies[0].release_date.as_deref(), Some("1999-03-01"));
        assert_eq!(movies[0].vote_average, 7.8);
        assert_eq!(movies[0].poster_path.as_deref(), Some("/x.jpg"));
    }

    #[tokio::test]
    async fn test_fetch_popular_missing_results_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/movie/popular");
                then.status(200).json_body(json!({ "page": 1 }));
            })
            .await;

        let movies = client_for(&server).fetch_popular().await.expect("popular loads");
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_popular_maps_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/movie/popular");
                then.status(401).body("invalid api key");
            })
            .await;

        let err = client_for(&server)
            .fetch_popular()
            .await
            .expect_err("expected status error");
        match err {
            CatalogError::Status { status } => assert_eq!(status, 401),
            other => panic!("unexpected error variant {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_by_query_sends_encoded_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search/movie")
                    .query_param("api_key", "test-key")
                    .query_param("query", "star wars & co");
                then.status(200).json_body(json!({
                    "results": [
                        { "id": 11, "title": "Star Wars", "vote_average": 8.2 },
                        { "id": 12, "title": "The Empire Strikes Back", "vote_average": 8.4 }
                    ]
                }));
            })
            .await;

        let movies = client_for(&server)
            .fetch_by_query("star wars & co")
            .await
            .expect("search succeeds");
        mock.assert_async().await;
        let ids: Vec<u64> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![11, 12]);
        assert_eq!(movies[0].release_date, None);
        assert_eq!(movies[0].poster_path, None);
    }

    #[tokio::test]
    async fn test_fetch_by_query_blank_skips_network() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/search/movie");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;

        let client = client_for(&server);
        assert!(client.fetch_by_query("").await.expect("empty query").is_empty());
        assert!(client.fetch_by_query("   ").await.expect("blank query").is_empty());
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_fetch_by_query_maps_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search/movie");
                then.status(503);
            })
            .await;

        let err = client_for(&server)
            .fetch_by_query("alien")
            .await
            .expect_err("expected status error");
        assert!(matches!(err, CatalogError::Status { status: 503 }));
        assert!(err.user_message().contains("503"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_catalog_error() {
        let config = CatalogConfig {
            api_key: "k".to_string(),
            // Port 9 (discard) on loopback is expected to refuse connections.
            base_url: "http://127.0.0.1:9".to_string(),
            ..CatalogConfig::default()
        };
        let err = CatalogClient::new(config)
            .expect("client builds")
            .fetch_popular()
            .await
            .expect_err("expected transport error");
        assert!(matches!(err, CatalogError::Transport(_)));
    }
}
