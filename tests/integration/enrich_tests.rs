use crate::{png_bytes, test_config};
use profile_enricher::config::Config;
use profile_enricher::enrich::{AnalyzeRequest, Enricher};
use profile_enricher::output::{load_summary, write_outputs, LogStatus, Sheet};
use profile_enricher::platform::Platform;
use profile_enricher::scraper::Metric;
use profile_enricher::EnrichError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sheet(headers: &[&str], rows: &[&[&str]]) -> Sheet {
    Sheet::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

async fn mount_page(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_new_rejects_invalid_config() {
    let mut config = Config::default();
    config.platforms.codeforces.burst = Some(0.5);
    let result = Enricher::new(config).await;
    assert!(matches!(result, Err(EnrichError::Config(_))));

    let mut config = Config::default();
    config.platforms.github.rate_limit = 0.0;
    assert!(Enricher::new(config).await.is_err());
}

#[tokio::test]
async fn test_rows_without_dispatchable_urls() {
    let enricher = Enricher::new(Config::default()).await.unwrap();
    let input = sheet(
        &["RollNo", "GitHubURL"],
        &[
            &["A1", "https://gitlab.com/someone"],
            &["A2", ""],
            &["A3", "N/A"],
        ],
    );

    let enrichment = enricher.enrich(&input).await.unwrap();

    assert_eq!(enrichment.summary.total_rows, 3);
    for platform in Platform::ALL {
        let stats = enrichment.summary.platform(platform).unwrap();
        assert_eq!(stats.success_count, 0);
        assert_eq!(stats.error_count, 0);
        assert_eq!(stats.success_rate, 0.0);
    }
    assert!(enrichment.log.is_empty());

    assert_eq!(enrichment.sheet.headers.len(), 7);
    for row in &enrichment.sheet.rows {
        assert!(row[2..].iter().all(|cell| cell == "N/A"));
    }
    assert_eq!(enrichment.sheet.rows[0][1], "https://gitlab.com/someone");
}

#[tokio::test]
async fn test_missing_columns_fails_before_scraping() {
    let enricher = Enricher::new(Config::default()).await.unwrap();
    let input = sheet(&["Name", "Email"], &[&["Ann", "ann@example.com"]]);

    let result = enricher.enrich(&input).await;
    assert!(matches!(result, Err(EnrichError::MissingColumns { .. })));
}

#[tokio::test]
async fn test_batch_fills_columns_logs_and_stats() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/u/alice",
        200,
        r#"<script>{"ranking": 1500}</script>"#,
    )
    .await;
    mount_page(&mock_server, "/profile/ghost", 404, "").await;
    mount_page(
        &mock_server,
        "/profile/tourist",
        200,
        "<div class=\"info\"><li>Contest rating: 3500</li></div>",
    )
    .await;
    mount_page(
        &mock_server,
        "/alice",
        200,
        r#"<a href="/alice?tab=repositories">Repositories <span class="Counter">5</span></a>
           <h2 class="f4 text-normal mb-2">42 contributions in the last year</h2>"#,
    )
    .await;

    let input = sheet(
        &["Roll No", "LeetCode_URL", "Codeforces URL", "githuburl"],
        &[
            &[
                "A1",
                &format!("{}/u/alice", base),
                &format!("{}/profile/ghost", base),
                &format!("{}/alice", base),
            ],
            &["A2", "", &format!("{}/profile/tourist", base), "n/a"],
        ],
    );

    let enricher = Enricher::new(test_config(&mock_server, dir.path()))
        .await
        .unwrap();
    let enrichment = enricher.enrich(&input).await.unwrap();

    let rows = &enrichment.sheet.rows;
    // LC_Global_Contest_Rank, CF_Rating, Photos_Path, GH_Commits_12mo, GH_Public_Repos
    assert_eq!(rows[0][4..], ["1500", "N/A", "N/A", "42", "5"]);
    assert_eq!(rows[1][4..], ["N/A", "3500", "N/A", "N/A", "N/A"]);

    assert_eq!(enrichment.log.len(), 4);
    let first = &enrichment.log[0];
    assert_eq!(first.row_id, "2");
    assert_eq!(first.platform, "LeetCode");
    assert_eq!(first.status, LogStatus::Success);
    assert_eq!(first.message, "Rank: 1500");

    let cf_failure = &enrichment.log[1];
    assert_eq!(cf_failure.platform, "Codeforces");
    assert_eq!(cf_failure.status, LogStatus::Error);
    assert_eq!(cf_failure.message, "profile not found (404)");

    let summary = &enrichment.summary;
    assert_eq!(summary.total_rows, 2);
    let codeforces = summary.platform(Platform::Codeforces).unwrap();
    assert_eq!(codeforces.success_count, 1);
    assert_eq!(codeforces.error_count, 1);
    assert_eq!(codeforces.success_rate, 50.0);
    assert_eq!(codeforces.sample_errors.len(), 1);
    assert_eq!(codeforces.sample_errors[0].row_id, "2");
    assert_eq!(summary.platform(Platform::GitHub).unwrap().success_rate, 100.0);
    assert_eq!(summary.platform(Platform::LinkedIn).unwrap().success_count, 0);

    let files = write_outputs(
        &dir.path().join("output"),
        "students",
        &enrichment.sheet,
        &enrichment.log,
        &enrichment.summary,
    )
    .unwrap();
    let log_path = files.log.expect("log should be written");
    let log_csv = std::fs::read_to_string(log_path).unwrap();
    assert!(log_csv.starts_with("timestamp,row_id,platform,url,status,message"));
    assert_eq!(
        load_summary(&dir.path().join("output")).unwrap().as_ref(),
        Some(summary)
    );
}

#[tokio::test]
async fn test_photo_named_after_row_number_without_identity() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/pub/jane",
        200,
        r#"<meta property="og:image" content="/media/p.png">"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/media/p.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .mount(&mock_server)
        .await;

    let input = sheet(
        &["RollNo", "LinkedInURL"],
        &[&["", &format!("{}/pub/jane", base)]],
    );

    let enricher = Enricher::new(test_config(&mock_server, dir.path()))
        .await
        .unwrap();
    let enrichment = enricher.enrich(&input).await.unwrap();

    let photo = &enrichment.sheet.rows[0][4];
    assert!(photo.ends_with("row_2.jpg"), "unexpected photo path {}", photo);
    assert!(std::path::Path::new(photo).exists());
    assert_eq!(enrichment.log[0].message, format!("Photo: {}", photo));
}

#[tokio::test]
async fn test_concurrent_rows_keep_their_order() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let base = mock_server.uri();

    for rating in [1200, 1300, 1400, 1500, 1600, 1700] {
        mount_page(
            &mock_server,
            &format!("/profile/u{}", rating),
            200,
            &format!("<p>Rating: {}</p>", rating),
        )
        .await;
    }

    let urls: Vec<String> = [1200, 1300, 1400, 1500, 1600, 1700]
        .iter()
        .map(|r| format!("{}/profile/u{}", base, r))
        .collect();
    let rows: Vec<Vec<String>> = urls
        .iter()
        .enumerate()
        .map(|(i, u)| vec![format!("R{}", i), u.clone()])
        .collect();
    let input = Sheet::new(vec!["RollNo".to_string(), "CodeforcesURL".to_string()], rows);

    let mut config = test_config(&mock_server, dir.path());
    config.batch.max_concurrent_rows = 4;
    let enricher = Enricher::new(config).await.unwrap();
    let enrichment = enricher.enrich(&input).await.unwrap();

    let ratings: Vec<&str> = enrichment
        .sheet
        .rows
        .iter()
        .map(|row| row[3].as_str())
        .collect();
    assert_eq!(ratings, ["1200", "1300", "1400", "1500", "1600", "1700"]);

    let codeforces = enrichment.summary.platform(Platform::Codeforces).unwrap();
    assert_eq!(codeforces.success_count, 6);
    assert_eq!(enrichment.log.len(), 6);
}

#[tokio::test]
async fn test_analyze_requires_a_url() {
    let enricher = Enricher::new(Config::default()).await.unwrap();
    let result = enricher.analyze(&AnalyzeRequest::default()).await;
    assert!(matches!(result, Err(EnrichError::NoUrls)));
}

#[tokio::test]
async fn test_analyze_reports_each_platform() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/profile/tourist",
        200,
        "<p>Current rating: 3800</p>",
    )
    .await;

    let mut config = test_config(&mock_server, dir.path());
    config.platforms.github.domains = vec!["github.com".to_string()];
    let enricher = Enricher::new(config).await.unwrap();

    let request = AnalyzeRequest {
        leetcode: None,
        codeforces: Some(format!("{}/profile/tourist", mock_server.uri())),
        github: Some("https://gitlab.com/octocat".to_string()),
    };
    let report = enricher.analyze(&request).await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(
        report[&Platform::Codeforces].value(),
        Some(&Metric::Rating(3800))
    );
    assert_eq!(report[&Platform::GitHub].error(), Some("invalid GitHub URL"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["codeforces"]["value"], 3800);
    assert_eq!(json["github"]["success"], false);
}
