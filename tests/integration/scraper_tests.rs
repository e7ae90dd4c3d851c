use crate::{png_bytes, test_config};
use profile_enricher::platform::Platform;
use profile_enricher::scraper::{Metric, ScraperSet};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn scrapers(server: &MockServer, dir: &std::path::Path) -> ScraperSet {
    ScraperSet::build(&test_config(server, dir))
        .await
        .expect("Failed to build scrapers")
}

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).unwrap()
}

#[tokio::test]
async fn test_leetcode_rank_from_profile() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/u/alice/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><script>{"userContestRanking":{"ranking":4521}}</script></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let result = scrapers(&mock_server, dir.path())
        .await
        .scrape(Platform::LeetCode, &url(&mock_server, "/u/alice/"), "A1")
        .await;
    assert_eq!(result.value(), Some(&Metric::ContestRank(4521)));
}

#[tokio::test]
async fn test_codeforces_missing_profile() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = scrapers(&mock_server, dir.path())
        .await
        .scrape(Platform::Codeforces, &url(&mock_server, "/profile/ghost"), "A1")
        .await;
    assert!(!result.is_success());
    assert_eq!(result.error(), Some("profile not found (404)"));
}

#[tokio::test]
async fn test_codeforces_page_without_rating() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><p>Unrated</p></html>"))
        .mount(&mock_server)
        .await;

    let result = scrapers(&mock_server, dir.path())
        .await
        .scrape(Platform::Codeforces, &url(&mock_server, "/profile/new"), "A1")
        .await;
    assert_eq!(result.error(), Some("rating not found on profile"));
}

#[tokio::test]
async fn test_github_profile_with_both_metrics_skips_contributions_page() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
            <a href="/octocat?tab=repositories">Repositories <span class="Counter">8</span></a>
            <h2 class="f4 text-normal mb-2">1,024 contributions in the last year</h2>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/contributions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = scrapers(&mock_server, dir.path())
        .await
        .scrape(
            Platform::GitHub,
            &url(&mock_server, "/octocat/hello-world"),
            "A1",
        )
        .await;
    assert_eq!(
        result.value(),
        Some(&Metric::Contributions {
            commits_12mo: Some(1024),
            public_repos: Some(8),
        })
    );
}

#[tokio::test]
async fn test_github_commits_from_contributions_page() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
            <a href="/octocat?tab=repositories">Repositories <span class="Counter">3</span></a>
            <include-fragment src="/users/octocat/contributions"></include-fragment>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/contributions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="js-yearly-contributions"><h2>256 contributions in the last year</h2></div>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = scrapers(&mock_server, dir.path())
        .await
        .scrape(Platform::GitHub, &url(&mock_server, "/octocat"), "A1")
        .await;
    assert_eq!(
        result.value(),
        Some(&Metric::Contributions {
            commits_12mo: Some(256),
            public_repos: Some(3),
        })
    );
}

#[tokio::test]
async fn test_github_without_metrics_fails() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/nobody"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><p>hi</p></html>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/nobody/contributions"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = scrapers(&mock_server, dir.path())
        .await
        .scrape(Platform::GitHub, &url(&mock_server, "/nobody"), "A1")
        .await;
    assert_eq!(result.error(), Some("could not extract GitHub metrics"));
}

#[tokio::test]
async fn test_linkedin_photo_is_saved_as_jpeg() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/in/jane"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><meta property="og:image" content="/media/jane.png"></head></html>"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/jane.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = scrapers(&mock_server, dir.path())
        .await
        .scrape(Platform::LinkedIn, &url(&mock_server, "/in/jane"), "21CS001")
        .await;

    let Some(Metric::PhotoPath(photo)) = result.value() else {
        panic!("expected a photo path, got {:?}", result);
    };
    assert!(photo.ends_with("21CS001.jpg"));

    let bytes = std::fs::read(photo).unwrap();
    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Jpeg
    );
}

#[tokio::test]
async fn test_linkedin_login_wall() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><h1>Join to view</h1></html>"),
        )
        .mount(&mock_server)
        .await;

    let result = scrapers(&mock_server, dir.path())
        .await
        .scrape(Platform::LinkedIn, &url(&mock_server, "/in/jane"), "A1")
        .await;
    assert_eq!(
        result.error(),
        Some("profile photo not found (may require authentication)")
    );
    assert!(!dir.path().join("photos").exists());
}
