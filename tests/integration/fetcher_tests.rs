use profile_enricher::config::FetcherConfig;
use profile_enricher::scraper::{FetchError, Fetcher};
use wiremock::matchers::{method, path};
use std::time::Duration;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_fetcher() -> Fetcher {
    let config = FetcherConfig {
        request_timeout: 5,
        max_retries: 2,
        backoff_factor: 0.0,
        ..FetcherConfig::default()
    };
    Fetcher::new(&config).expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_success_returns_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/u/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fast_fetcher()
        .fetch(&format!("{}/u/alice", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fast_fetcher().fetch(&mock_server.uri()).await;
    assert_eq!(result, Err(FetchError::NotFound));
}

#[tokio::test]
async fn test_forbidden_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fast_fetcher().fetch(&mock_server.uri()).await;
    assert_eq!(result, Err(FetchError::Forbidden));
}

#[tokio::test]
async fn test_rate_limited_exhausts_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&mock_server)
        .await;

    let result = fast_fetcher().fetch(&mock_server.uri()).await;
    assert_eq!(result, Err(FetchError::RateLimited));
}

#[tokio::test]
async fn test_recovers_after_transient_rate_limit() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("second try"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fast_fetcher().fetch(&mock_server.uri()).await.unwrap();
    assert_eq!(body, "second try");
}

#[tokio::test]
async fn test_server_error_reports_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fast_fetcher().fetch(&mock_server.uri()).await;
    assert_eq!(result, Err(FetchError::Status(503)));
}

#[tokio::test]
async fn test_connection_refused_is_retried_then_reported() {
    // Bind and drop a listener to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let result = fast_fetcher()
        .fetch(&format!("http://127.0.0.1:{}/", port))
        .await;
    assert_eq!(result, Err(FetchError::Connection));
}

#[tokio::test]
async fn test_fetch_bytes_returns_raw_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 159, 146, 150]))
        .mount(&mock_server)
        .await;

    let bytes = fast_fetcher()
        .fetch_bytes(&format!("{}/img", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(bytes, vec![0u8, 159, 146, 150]);
}

#[tokio::test]
async fn test_timeout_is_retried_then_fails() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>late</html>")
                .set_delay(Duration::from_secs(3)),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = FetcherConfig {
        request_timeout: 1,
        max_retries: 2,
        backoff_factor: 0.0,
        ..FetcherConfig::default()
    };
    let fetcher = Fetcher::new(&config).unwrap();

    let result = fetcher.fetch(&mock_server.uri()).await;
    assert_eq!(result, Err(FetchError::Timeout));
    assert_eq!(FetchError::Timeout.to_string(), "request timeout");
}
