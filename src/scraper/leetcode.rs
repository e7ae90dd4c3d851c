//! LeetCode global contest rank

use crate::scraper::parser::{
    capture_count, element_text, first_match, own_text, parent_element, script_texts, select_all,
    visible_text, Strategy,
};
use crate::scraper::{ExtractionResult, Fetcher, Metric, ScrapeError};
use regex::Regex;
use scraper::Html;
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use url::Url;

/// Plausible global ranks
const RANK_RANGE: RangeInclusive<u64> = 1..=10_000_000;

static RANKING_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""ranking"\s*:\s*(\d+)"#).expect("valid regex"));
static CONTEST_RANKING_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""contestRanking"\s*:\s*(\d+)"#).expect("valid regex"));
static LABELLED_RANK_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)Contest\s+Rating[:\s]+(\d[\d,]*)").expect("valid regex"),
        Regex::new(r"(?i)Global\s+Ranking[:\s]+(\d[\d,]*)").expect("valid regex"),
        Regex::new(r"(?i)Ranking[:\s]+(\d[\d,]*)").expect("valid regex"),
    ]
});
static MENTIONS_RANK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ranking|rating").expect("valid regex"));
static SHORT_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,7})\b").expect("valid regex"));

/// Strategies tried in order
pub const STRATEGIES: &[Strategy<u64>] =
    &[from_script_payload, from_labelled_text, from_ranking_elements];

/// Extracts the global contest rank from a profile page
pub fn extract_contest_rank(html: &str) -> Option<u64> {
    let document = Html::parse_document(html);
    first_match(&document, STRATEGIES)
}

/// `"ranking":N` or `"contestRanking":N` inside an embedded payload
fn from_script_payload(document: &Html) -> Option<u64> {
    script_texts(document)
        .iter()
        .filter(|script| script.to_lowercase().contains("ranking"))
        .find_map(|script| {
            [&*RANKING_JSON_RE, &*CONTEST_RANKING_JSON_RE]
                .into_iter()
                .filter_map(|re| capture_count(re, script))
                .find(|rank| RANK_RANGE.contains(rank))
        })
}

/// Labelled numbers in the rendered text
fn from_labelled_text(document: &Html) -> Option<u64> {
    let text = visible_text(document);
    LABELLED_RANK_RES
        .iter()
        .filter_map(|re| capture_count(re, &text))
        .find(|rank| RANK_RANGE.contains(rank))
}

/// A short integer next to an element labelled ranking/rating
fn from_ranking_elements(document: &Html) -> Option<u64> {
    select_all(document, "div, span")
        .into_iter()
        .filter(|el| MENTIONS_RANK_RE.is_match(&own_text(*el)))
        .filter_map(parent_element)
        .find_map(|parent| {
            capture_count(&SHORT_INT_RE, &element_text(parent))
                .filter(|rank| RANK_RANGE.contains(rank))
        })
}

/// Scraper for LeetCode profiles
#[derive(Debug, Clone)]
pub struct LeetCodeScraper {
    fetcher: Fetcher,
}

impl LeetCodeScraper {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Fetches the profile and extracts the contest rank
    pub async fn scrape(&self, url: &Url) -> ExtractionResult {
        self.collect(url).await.into()
    }

    async fn collect(&self, url: &Url) -> Result<Metric, ScrapeError> {
        let html = self.fetcher.fetch(url.as_str()).await?;
        extract_contest_rank(&html)
            .map(Metric::ContestRank)
            .ok_or(ScrapeError::MetricNotFound {
                metric: "contest rank",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_from_script_payload() {
        let html = r#"<html><body><script>
            window.__DATA__ = {"userContestRanking":{"rating":1850.3,"ranking":12345}};
        </script></body></html>"#;
        assert_eq!(extract_contest_rank(html), Some(12345));
    }

    #[test]
    fn test_rank_from_contest_ranking_key() {
        let html = r#"<script>{"ranking": 0, "contestRanking": 777}</script>"#;
        assert_eq!(extract_contest_rank(html), Some(777));
    }

    #[test]
    fn test_rank_from_labelled_text() {
        let html = "<html><body><div>Global Ranking: 23,456</div></body></html>";
        assert_eq!(extract_contest_rank(html), Some(23456));
    }

    #[test]
    fn test_labelled_text_ignores_script_content() {
        let html = r#"<html><body>
            <script>var label = "Global Ranking: 99";</script>
            <p>Global Ranking: 4321</p>
        </body></html>"#;
        // The script mentions ranking but carries no JSON key, so the text wins
        assert_eq!(extract_contest_rank(html), Some(4321));
    }

    #[test]
    fn test_rank_from_nearby_element() {
        let html = r#"<html><body>
            <div class="card"><span>Ranking</span><span>#</span><b>98765</b></div>
        </body></html>"#;
        assert_eq!(extract_contest_rank(html), Some(98765));
    }

    #[test]
    fn test_out_of_range_payload_is_skipped() {
        let html = r#"<script>{"ranking": 0}</script><p>nothing here</p>"#;
        assert_eq!(extract_contest_rank(html), None);
    }

    #[test]
    fn test_no_rank_on_page() {
        let html = "<html><body><h1>Problems solved: 12</h1></body></html>";
        assert_eq!(extract_contest_rank(html), None);
    }
}
