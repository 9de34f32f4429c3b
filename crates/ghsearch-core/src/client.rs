//! GitHub user-search client.
//!
//! `UserSearch` is the seam between the search controller and the network:
//! the controller only needs "query in, users out", so tests swap in scripted
//! implementations while the app uses `GithubClient`.

use std::fmt;

use anyhow::{Context, Result};
use futures_util::future::BoxFuture;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::users::{SearchResponse, UserRecord};

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

/// Error category for a failed (not canceled) search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorKind {
    /// Connection failure or other transport error
    Network,
    /// Request exceeded the configured timeout
    Timeout,
    /// Non-success HTTP status (rate limit, validation failure, 5xx)
    HttpStatus,
    /// Response body was not the expected JSON shape
    Decode,
}

impl fmt::Display for SearchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchErrorKind::Network => write!(f, "network"),
            SearchErrorKind::Timeout => write!(f, "timeout"),
            SearchErrorKind::HttpStatus => write!(f, "http_status"),
            SearchErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// Structured error from a search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub kind: SearchErrorKind,
    /// One-line summary suitable for logs
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl SearchError {
    pub fn new(kind: SearchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error, preferring GitHub's `message` field over the raw body.
    pub fn http_status(status: u16, body: &str) -> Self {
        if let Ok(json) = serde_json::from_str::<Value>(body)
            && let Some(msg) = json.get("message").and_then(|v| v.as_str())
        {
            return Self {
                kind: SearchErrorKind::HttpStatus,
                message: format!("HTTP {status}: {msg}"),
                details: Some(body.to_string()),
            };
        }
        Self {
            kind: SearchErrorKind::HttpStatus,
            message: format!("HTTP {status}"),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::new(SearchErrorKind::Timeout, format!("Request timed out: {e}"))
        } else if e.is_decode() {
            Self::new(SearchErrorKind::Decode, format!("Invalid response: {e}"))
        } else if e.is_connect() {
            Self::new(SearchErrorKind::Network, format!("Connection failed: {e}"))
        } else {
            Self::new(SearchErrorKind::Network, format!("Network error: {e}"))
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SearchError {}

/// Result type for search requests.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Something that can look up users by a query string.
pub trait UserSearch: Send + Sync {
    /// Issues one search request and returns the raw (unfiltered) items.
    fn search_users<'a>(&'a self, query: &'a str) -> BoxFuture<'a, SearchResult<Vec<UserRecord>>>;
}

/// Client for `GET /search/users` on the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    /// Creates a client from configuration (base URL, user agent, timeout).
    pub fn new(config: &Config) -> Result<Self> {
        Url::parse(&config.api_url)
            .with_context(|| format!("Invalid api_url: {}", config.api_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user_agent value")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the search URL with the query percent-encoded as `q`.
    pub fn search_url(&self, query: &str) -> SearchResult<Url> {
        let endpoint = format!("{}/search/users", self.base_url);
        Url::parse_with_params(&endpoint, &[("q", query)])
            .map_err(|e| SearchError::new(SearchErrorKind::Network, format!("Invalid URL: {e}")))
    }

    async fn fetch(&self, query: &str) -> SearchResult<Vec<UserRecord>> {
        let url = self.search_url(query)?;
        tracing::debug!(%url, "searching users");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::http_status(status.as_u16(), &body));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::from_reqwest(&e))?;

        tracing::debug!(count = search.items.len(), "search response received");
        Ok(search.items)
    }
}

impl UserSearch for GithubClient {
    fn search_users<'a>(&'a self, query: &'a str) -> BoxFuture<'a, SearchResult<Vec<UserRecord>>> {
        Box::pin(self.fetch(query))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn can_bind_localhost() -> bool {
        std::net::TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(server: &MockServer) -> GithubClient {
        let config = Config {
            api_url: server.uri(),
            ..Default::default()
        };
        GithubClient::new(&config).unwrap()
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = GithubClient::new(&Config::default()).unwrap();
        let url = client.search_url("rust lang&co").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/search/users?q=rust+lang%26co"
        );
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        let config = Config {
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        let err = GithubClient::new(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid api_url"));
    }

    #[test]
    fn test_http_status_prefers_github_message() {
        let err = SearchError::http_status(403, r#"{"message":"API rate limit exceeded"}"#);
        assert_eq!(err.kind, SearchErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 403: API rate limit exceeded");

        let err = SearchError::http_status(502, "");
        assert_eq!(err.message, "HTTP 502");
        assert_eq!(err.details, None);
    }

    #[tokio::test]
    async fn test_search_users_parses_items() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .and(query_param("q", "abc"))
            .and(header("user-agent", "ghsearch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 2,
                "items": [
                    {"id": 1, "login": "abc", "followers": 10},
                    {"id": 2, "login": "abcd", "followers": 50}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let users = client_for(&server).search_users("abc").await.unwrap();
        assert_eq!(
            users,
            vec![UserRecord::new(1, "abc", 10), UserRecord::new(2, "abcd", 50)]
        );
    }

    #[tokio::test]
    async fn test_search_users_maps_status_errors() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string(r#"{"message":"Validation Failed"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).search_users("x").await.unwrap_err();
        assert_eq!(err.kind, SearchErrorKind::HttpStatus);
        assert!(err.message.contains("Validation Failed"));
    }

    #[tokio::test]
    async fn test_search_users_maps_bad_json_to_decode() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"items\": 5}"))
            .mount(&server)
            .await;

        let err = client_for(&server).search_users("x").await.unwrap_err();
        assert_eq!(err.kind, SearchErrorKind::Decode);
    }
}
