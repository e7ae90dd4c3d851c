//! Single-shot analysis of a few profile URLs

use crate::enrich::Enricher;
use crate::platform::Platform;
use crate::scraper::ExtractionResult;
use crate::url::ProfileReference;
use crate::EnrichError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Per-platform results of one analysis, in platform order
pub type AnalysisReport = BTreeMap<Platform, ExtractionResult>;

/// Profile URLs to analyze; any subset may be given
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalyzeRequest {
    pub leetcode: Option<String>,
    pub codeforces: Option<String>,
    pub github: Option<String>,
}

impl AnalyzeRequest {
    /// Provided, non-blank URLs in platform order
    pub fn urls(&self) -> Vec<(Platform, &str)> {
        [
            (Platform::LeetCode, &self.leetcode),
            (Platform::Codeforces, &self.codeforces),
            (Platform::GitHub, &self.github),
        ]
        .into_iter()
        .filter_map(|(platform, url)| {
            url.as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(|u| (platform, u))
        })
        .collect()
    }
}

impl Enricher {
    /// Scrapes each provided URL once, without identity or photos
    ///
    /// A URL outside its platform's domains yields a failed result rather
    /// than an error.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::NoUrls`] when the request holds no URL.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisReport, EnrichError> {
        let urls = request.urls();
        if urls.is_empty() {
            return Err(EnrichError::NoUrls);
        }

        let mut report = AnalysisReport::new();
        for (platform, raw) in urls {
            let reference = ProfileReference::from_cell(platform, raw, &self.config().platforms);
            let result = match reference.normalized_url {
                Some(url) => match self.limiter().acquire(platform).await {
                    Ok(()) => self.scrapers().scrape(platform, &url, "").await,
                    Err(e) => ExtractionResult::failure(e.to_string()),
                },
                None => ExtractionResult::failure(format!("invalid {} URL", platform)),
            };

            tracing::info!(%platform, success = result.is_success(), "Analyzed {}", raw);
            report.insert(platform, result);
        }

        Ok(report)
    }
}
