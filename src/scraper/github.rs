//! GitHub commit activity and public repository count
//!
//! The profile page carries both metrics. When the contribution calendar
//! is loaded lazily, the commits count is looked up once more on the
//! contributions fragment the profile page would have included.

use crate::platform::Platform;
use crate::scraper::parser::{
    capture_count, element_text, first_match, own_text, parent_element, parse_count, select_all,
    select_within, visible_text, Strategy,
};
use crate::scraper::{ExtractionResult, Fetcher, Metric, ScrapeError};
use crate::url::extract_username;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use url::Url;

static LAST_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+contributions?\s+in\s+(?:the\s+)?last\s+year").expect("valid regex")
});
static CONTRIBUTIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\s+contributions?").expect("valid regex"));
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d[\d,.]*[kK]?)").expect("valid regex"));

/// Commit count strategies tried in order
pub const COMMIT_STRATEGIES: &[Strategy<u64>] = &[
    commits_from_summary_heading,
    commits_from_yearly_block,
    commits_from_calendar,
    commits_from_page_text,
];

/// Repository count strategies tried in order
pub const REPO_STRATEGIES: &[Strategy<u64>] = &[
    repos_from_tab_counter,
    repos_from_labelled_counter,
    repos_from_nav_text,
];

/// Extracts contributions in the last year
pub fn extract_commits(html: &str) -> Option<u64> {
    let document = Html::parse_document(html);
    first_match(&document, COMMIT_STRATEGIES)
}

/// Extracts the public repository count
pub fn extract_public_repos(html: &str) -> Option<u64> {
    let document = Html::parse_document(html);
    first_match(&document, REPO_STRATEGIES)
}

fn commits_from_summary_heading(document: &Html) -> Option<u64> {
    select_all(document, "h2.f4.text-normal.mb-2")
        .into_iter()
        .find_map(|h2| capture_count(&LAST_YEAR_RE, &element_text(h2)))
}

fn commits_from_yearly_block(document: &Html) -> Option<u64> {
    let block = select_all(document, "div[class*='js-yearly-contributions']")
        .into_iter()
        .next()?;
    let heading = select_within(block, "h2").into_iter().next()?;
    capture_count(&CONTRIBUTIONS_RE, &element_text(heading))
}

/// Sum of the per-day counts drawn in the calendar
fn commits_from_calendar(document: &Html) -> Option<u64> {
    let svg = select_all(document, "svg[class*='js-calendar-graph-svg']")
        .into_iter()
        .next()?;
    let days = select_within(svg, "rect[data-count]");
    if days.is_empty() {
        return None;
    }

    Some(
        days.iter()
            .filter_map(|rect| rect.value().attr("data-count"))
            .filter_map(parse_count)
            .sum(),
    )
}

fn commits_from_page_text(document: &Html) -> Option<u64> {
    capture_count(&LAST_YEAR_RE, &visible_text(document))
}

/// Exact count from a Counter's title, else its displayed text
fn counter_value(counter: ElementRef<'_>) -> Option<u64> {
    counter
        .value()
        .attr("title")
        .and_then(parse_count)
        .or_else(|| capture_count(&NUMBER_RE, &element_text(counter)))
}

fn repos_from_tab_counter(document: &Html) -> Option<u64> {
    select_all(document, "a[href*='tab=repositories']")
        .into_iter()
        .flat_map(|link| select_within(link, ".Counter"))
        .find_map(counter_value)
}

fn repos_from_labelled_counter(document: &Html) -> Option<u64> {
    select_all(document, ".Counter")
        .into_iter()
        .filter(|counter| {
            parent_element(*counter)
                .is_some_and(|p| element_text(p).to_lowercase().contains("repositor"))
        })
        .find_map(counter_value)
}

fn repos_from_nav_text(document: &Html) -> Option<u64> {
    select_all(document, "a, span")
        .into_iter()
        .map(own_text)
        .filter(|text| text.to_lowercase().contains("repositor"))
        .find_map(|text| capture_count(&NUMBER_RE, &text))
}

/// Reduces any GitHub URL to `origin/{username}`
fn profile_root(url: &Url) -> Option<(Url, String)> {
    let username = extract_username(url, Platform::GitHub)?;
    let mut root = url.clone();
    root.set_path(&format!("/{}", username));
    root.set_query(None);
    root.set_fragment(None);
    Some((root, username))
}

/// Scraper for GitHub profiles
#[derive(Debug, Clone)]
pub struct GitHubScraper {
    fetcher: Fetcher,
}

impl GitHubScraper {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Fetches the profile and extracts commits and repositories
    pub async fn scrape(&self, url: &Url) -> ExtractionResult {
        self.collect(url).await.into()
    }

    async fn collect(&self, url: &Url) -> Result<Metric, ScrapeError> {
        let (profile_url, username) =
            profile_root(url).ok_or_else(|| ScrapeError::InvalidUrl(url.to_string()))?;

        let html = self.fetcher.fetch(profile_url.as_str()).await?;
        let mut commits_12mo = extract_commits(&html);
        let public_repos = extract_public_repos(&html);

        if commits_12mo.is_none() {
            commits_12mo = self.fetch_contributions(&profile_url, &username).await;
        }

        if commits_12mo.is_none() && public_repos.is_none() {
            return Err(ScrapeError::NoMetrics("GitHub"));
        }

        Ok(Metric::Contributions {
            commits_12mo,
            public_repos,
        })
    }

    /// Commit count from the standalone contributions fragment
    async fn fetch_contributions(&self, profile_url: &Url, username: &str) -> Option<u64> {
        let contributions_url = profile_url
            .join(&format!("/users/{}/contributions", username))
            .ok()?;

        match self.fetcher.fetch(contributions_url.as_str()).await {
            Ok(html) => extract_commits(&html),
            Err(e) => {
                tracing::debug!(url = %contributions_url, "Contributions fetch failed: {}", e);
                None
            }
        }
    }
}
