//! End-to-end tests: real HTTP client against a mock CareerNet endpoint

use careerscan::http::HttpClientConfig;
use careerscan::{ApiConfig, FetchPolicy, HttpClient, PagedFetcher, SessionContext};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_with_majors(majors: &[&str]) -> String {
    let mut xml = String::from("<dataSearch>");
    for (i, major) in majors.iter().enumerate() {
        xml.push_str(&format!(
            "<content><schoolName>school-{i}</schoolName><region>서울</region><major>{major}</major></content>"
        ));
    }
    xml.push_str("</dataSearch>");
    xml
}

fn empty_page() -> String {
    "<dataSearch></dataSearch>".to_string()
}

fn twelve_majors() -> Vec<&'static str> {
    vec![
        "소프트웨어개발과",
        "시각디자인과",
        "기계과",
        "전자과",
        "조리과",
        "보건간호과",
        "관광경영과",
        "미용과",
        "자동차과",
        "항공정비과",
        "정보통신과",
        "실용음악과",
    ]
}

fn test_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/getOpenApi", server.uri()),
        page_size: 12,
        ..ApiConfig::default()
    }
    .with_api_key("test-key")
}

fn test_client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build())
}

#[tokio::test]
async fn fetches_search_ready_directory_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("svcCode", "SCHOOL"))
        .and(query_param("currentPage", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_with_majors(&twelve_majors())))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("currentPage", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .mount(&server)
        .await;

    let fetcher = PagedFetcher::careernet(
        test_config(&server),
        FetchPolicy::immediate(),
        test_client(),
    )
    .unwrap();
    let mut session = SessionContext::default();

    let records = session.load_schools(None, &fetcher).await.unwrap();
    assert_eq!(records.len(), 12);

    let hits = session.search(&records, "디자인");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].major.as_deref(), Some("시각디자인과"));
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn transient_server_error_is_masked_by_retry() {
    let server = MockServer::start().await;

    // First attempt at page 1 fails with 500, second succeeds.
    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("currentPage", "1"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("currentPage", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_with_majors(&twelve_majors())))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("currentPage", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .mount(&server)
        .await;

    let fetcher = PagedFetcher::careernet(
        test_config(&server),
        FetchPolicy::immediate(),
        test_client(),
    )
    .unwrap();

    let records = fetcher.fetch_all().await.unwrap();
    assert_eq!(records.len(), 12);
}

#[tokio::test]
async fn persistent_failure_returns_error_not_partial_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("currentPage", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_with_majors(&twelve_majors())))
        .mount(&server)
        .await;

    // Page 2 never recovers.
    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("currentPage", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = PagedFetcher::careernet(
        test_config(&server),
        FetchPolicy::immediate(),
        test_client(),
    )
    .unwrap();

    let err = fetcher.fetch_all().await.unwrap_err();
    assert!(matches!(err, careerscan::Error::PageExhausted { page: 2, .. }));
}

#[tokio::test]
async fn cached_result_is_served_without_a_second_remote_call() {
    let server = MockServer::start().await;

    // The whole test may contact the server at most once per page.
    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("currentPage", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_with_majors(&twelve_majors())))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("currentPage", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PagedFetcher::careernet(
        test_config(&server),
        FetchPolicy::immediate(),
        test_client(),
    )
    .unwrap();
    let mut session = SessionContext::default();

    let first = session.load_schools(None, &fetcher).await.unwrap();
    let second = session.load_schools(None, &fetcher).await.unwrap();

    assert_eq!(first.len(), 12);
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn region_filter_is_forwarded_to_the_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getOpenApi"))
        .and(query_param("region", "서울"))
        .and(query_param("currentPage", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .mount(&server)
        .await;

    let config = test_config(&server).with_region("서울");
    let fetcher =
        PagedFetcher::careernet(config, FetchPolicy::immediate(), test_client()).unwrap();

    // Zero records with no errors is a legitimate empty result.
    let records = fetcher.fetch_all().await.unwrap();
    assert!(records.is_empty());
}
