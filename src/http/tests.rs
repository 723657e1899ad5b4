//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("careerscan/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .no_rate_limit()
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert!(config.rate_limit.is_none());
}

#[test]
fn test_http_client_default_has_rate_limiter() {
    let client = HttpClient::default();
    assert!(client.has_rate_limiter());
}

#[tokio::test]
async fn test_get_text_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<dataSearch></dataSearch>"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build());
    let body = client
        .get_text(&format!("{}/getOpenApi", mock_server.uri()), &[])
        .await
        .unwrap();

    assert_eq!(body, "<dataSearch></dataSearch>");
}

#[tokio::test]
async fn test_get_text_sends_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("currentPage", "3"))
        .and(query_param("perPage", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build());
    let query = vec![
        ("currentPage".to_string(), "3".to_string()),
        ("perPage".to_string(), "100".to_string()),
    ];
    let body = client
        .get_text(&format!("{}/getOpenApi", mock_server.uri()), &query)
        .await
        .unwrap();

    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_get_text_sends_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("X-Trace", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .header("X-Trace", "abc123")
            .no_rate_limit()
            .build(),
    );
    let body = client
        .get_text(&format!("{}/secure", mock_server.uri()), &[])
        .await
        .unwrap();

    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_get_text_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build());
    let err = client
        .get_text(&format!("{}/flaky", mock_server.uri()), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_get_text_client_error_not_retryable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build());
    let err = client
        .get_text(&format!("{}/missing", mock_server.uri()), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_get_text_no_internal_retry() {
    let mock_server = MockServer::start().await;

    // Exactly one request must reach the server even on failure.
    Mock::given(method("GET"))
        .and(path("/once"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build());
    let result = client
        .get_text(&format!("{}/once", mock_server.uri()), &[])
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_get_text_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/paced"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .rate_limit(RateLimiterConfig::new(100, 10))
            .build(),
    );

    for _ in 0..3 {
        let body = client
            .get_text(&format!("{}/paced", mock_server.uri()), &[])
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }
}
