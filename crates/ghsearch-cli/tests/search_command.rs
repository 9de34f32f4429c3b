//! Integration tests for `ghsearch search`.
//!
//! Each test points the binary at a wiremock server through `GHSEARCH_API_URL`.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Creates a temp GHSEARCH_HOME directory for test isolation.
fn temp_home() -> TempDir {
    TempDir::new().expect("create temp ghsearch home")
}

fn search_body() -> Value {
    json!({
        "total_count": 3,
        "incomplete_results": false,
        "items": [
            { "id": 1, "login": "abc", "followers": 10, "html_url": "https://github.com/abc" },
            { "id": 2, "login": "abcd", "followers": 50 },
            { "id": 3, "login": "xyz", "followers": 5 }
        ]
    })
}

#[tokio::test]
async fn test_search_json_filters_and_sorts() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("q", "abc"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = cargo_bin_cmd!("ghsearch")
        .env("GHSEARCH_HOME", home.path())
        .env("GHSEARCH_API_URL", mock_server.uri())
        .args(["search", "abc", "--json", "--debounce-ms", "0"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let users: Value = serde_json::from_slice(&output).unwrap();
    let ids: Vec<u64> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_search_prints_table() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("ghsearch")
        .env("GHSEARCH_HOME", home.path())
        .env("GHSEARCH_API_URL", mock_server.uri())
        .args(["search", "abc", "--debounce-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Username"))
        .stdout(predicate::str::contains("Followers"))
        .stdout(predicate::str::contains("abcd"))
        .stdout(predicate::str::contains("xyz").not());
}

#[tokio::test]
async fn test_api_url_flag_overrides_config() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("ghsearch")
        .env("GHSEARCH_HOME", home.path())
        .args(["search", "nobody", "--debounce-ms", "0"])
        .args(["--api-url", &mock_server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data"));
}

#[tokio::test]
async fn test_http_error_fails_with_api_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&mock_server)
        .await;

    let output = cargo_bin_cmd!("ghsearch")
        .env("GHSEARCH_HOME", home.path())
        .env("GHSEARCH_API_URL", mock_server.uri())
        .env_remove("GHSEARCH_LOG")
        .args(["search", "abc", "--debounce-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("search for 'abc' failed"))
        .get_output()
        .stderr
        .clone();

    // Reported once, by the error chain, not again by the log subscriber.
    let stderr = String::from_utf8(output).unwrap();
    assert_eq!(stderr.matches("API rate limit exceeded").count(), 1, "{stderr}");
}

#[test]
fn test_blank_query_makes_no_request() {
    let home = temp_home();

    // Unroutable URL: any request would fail the command.
    cargo_bin_cmd!("ghsearch")
        .env("GHSEARCH_HOME", home.path())
        .env("GHSEARCH_API_URL", "http://127.0.0.1:9")
        .args(["search", "   ", "--debounce-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data"));
}
