//! Scraper module for fetching profile pages and extracting metrics
//!
//! This module contains the shared fetcher, the HTML helpers and one
//! scraper per platform. Every scraper turns its outcome into an
//! [`ExtractionResult`]; per-cell errors never propagate further.

#[cfg(feature = "browser")]
mod browser;
mod codeforces;
mod error;
mod fetcher;
mod github;
mod leetcode;
mod linkedin;
pub mod parser;
mod photo;
mod result;
mod source;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;
pub use codeforces::{extract_rating, CodeforcesScraper};
pub use error::{FetchError, ScrapeError};
pub use fetcher::{build_http_client, Fetcher};
pub use github::{extract_commits, extract_public_repos, GitHubScraper};
pub use leetcode::{extract_contest_rank, LeetCodeScraper};
pub use linkedin::{find_photo_url, LinkedInScraper};
pub use photo::{encode_jpeg, safe_file_stem, PhotoStore};
pub use result::{display_or_na, ExtractionResult, Metric, NOT_AVAILABLE};
pub use source::PageSource;

use crate::config::Config;
use crate::platform::Platform;
use crate::EnrichError;
use url::Url;

/// One scraper per platform, sharing a single HTTP client
#[derive(Debug, Clone)]
pub struct ScraperSet {
    leetcode: LeetCodeScraper,
    codeforces: CodeforcesScraper,
    github: GitHubScraper,
    linkedin: LinkedInScraper,
}

impl ScraperSet {
    /// Builds every scraper from the configuration
    ///
    /// Launches the browser when `photos.engine = "browser"`.
    pub async fn build(config: &Config) -> Result<Self, EnrichError> {
        let fetcher = Fetcher::new(&config.fetcher)?;
        let source = PageSource::from_config(config, &fetcher)
            .await
            .map_err(|e| EnrichError::Browser(e.to_string()))?;
        let photos = PhotoStore::new(&config.photos.directory, config.photos.quality);

        Ok(Self {
            leetcode: LeetCodeScraper::new(fetcher.clone()),
            codeforces: CodeforcesScraper::new(fetcher.clone()),
            github: GitHubScraper::new(fetcher.clone()),
            linkedin: LinkedInScraper::new(source, fetcher, photos),
        })
    }

    /// Runs the scraper of `platform`
    ///
    /// `identity` names the photo file and is only used for LinkedIn.
    pub async fn scrape(&self, platform: Platform, url: &Url, identity: &str) -> ExtractionResult {
        match platform {
            Platform::LeetCode => self.leetcode.scrape(url).await,
            Platform::Codeforces => self.codeforces.scrape(url).await,
            Platform::GitHub => self.github.scrape(url).await,
            Platform::LinkedIn => self.linkedin.scrape(url, identity).await,
        }
    }
}
