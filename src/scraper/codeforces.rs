//! Codeforces current rating

use crate::scraper::parser::{
    capture_count, element_text, first_match, parent_element, select_all, select_within,
    visible_text, Strategy,
};
use crate::scraper::{ExtractionResult, Fetcher, Metric, ScrapeError};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use url::Url;

/// Highest rating ever plausible
const MAX_RATING: u64 = 4000;

/// Rank color classes Codeforces puts on user handles
const RANK_COLOR_CLASSES: [&str; 8] = [
    "user-red",
    "user-orange",
    "user-violet",
    "user-blue",
    "user-cyan",
    "user-green",
    "user-gray",
    "user-legendary",
];

static RATING_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{3,4})\b").expect("valid regex"));
static LABELLED_RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rating[:\s]+(\d{3,4})").expect("valid regex"));
static PAGE_RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:current\s+)?rating[:\s]+(\d{3,4})").expect("valid regex"));

/// Strategies tried in order
pub const STRATEGIES: &[Strategy<u32>] = &[
    from_user_rank,
    from_info_block,
    from_user_info_items,
    from_colored_handle,
    from_page_text,
];

/// Extracts the current rating from a profile page
pub fn extract_rating(html: &str) -> Option<u32> {
    let document = Html::parse_document(html);
    first_match(&document, STRATEGIES)
}

/// Keeps a rating only inside the plausible range
fn plausible(rating: u64) -> Option<u32> {
    if rating <= MAX_RATING {
        u32::try_from(rating).ok()
    } else {
        None
    }
}

fn rating_digits(text: &str) -> Option<u32> {
    capture_count(&RATING_DIGITS_RE, text).and_then(plausible)
}

/// `span.user-rank` sits next to the rating number
fn from_user_rank(document: &Html) -> Option<u32> {
    let rank = select_all(document, "span.user-rank").into_iter().next()?;
    let parent = parent_element(rank)?;
    rating_digits(&element_text(parent))
}

/// `div.info` blocks with "Contest rating: N"
fn from_info_block(document: &Html) -> Option<u32> {
    select_all(document, "div.info").into_iter().find_map(|div| {
        capture_count(&LABELLED_RATING_RE, &element_text(div)).and_then(plausible)
    })
}

/// Items inside the user-info section that mention a rating
fn from_user_info_items(document: &Html) -> Option<u32> {
    let section = select_all(document, "div.user-info")
        .into_iter()
        .next()
        .or_else(|| select_all(document, "div.main-info").into_iter().next())?;

    select_within(section, "span, div, li")
        .into_iter()
        .map(element_text)
        .filter(|text| text.to_lowercase().contains("rating"))
        .find_map(|text| rating_digits(&text))
}

/// Rank-colored handle spans, then their parent
fn from_colored_handle(document: &Html) -> Option<u32> {
    let handle = select_all(document, "span[class*='user-']")
        .into_iter()
        .find(|span| is_rank_colored(*span))?;

    rating_digits(&element_text(handle))
        .or_else(|| parent_element(handle).and_then(|p| rating_digits(&element_text(p))))
}

fn is_rank_colored(element: ElementRef<'_>) -> bool {
    element
        .value()
        .classes()
        .any(|class| RANK_COLOR_CLASSES.contains(&class))
}

/// "Rating: N" anywhere on the page
fn from_page_text(document: &Html) -> Option<u32> {
    capture_count(&PAGE_RATING_RE, &visible_text(document)).and_then(plausible)
}

/// Scraper for Codeforces profiles
#[derive(Debug, Clone)]
pub struct CodeforcesScraper {
    fetcher: Fetcher,
}

impl CodeforcesScraper {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Fetches the profile and extracts the rating
    pub async fn scrape(&self, url: &Url) -> ExtractionResult {
        self.collect(url).await.into()
    }

    async fn collect(&self, url: &Url) -> Result<Metric, ScrapeError> {
        let html = self.fetcher.fetch(url.as_str()).await?;
        extract_rating(&html)
            .map(Metric::Rating)
            .ok_or(ScrapeError::MetricNotFound { metric: "rating" })
    }
}
