//! Processing of one spreadsheet row

use crate::config::PlatformsConfig;
use crate::enrich::columns::{ColumnMapping, OutputCells};
use crate::limiter::RateLimiterManager;
use crate::platform::Platform;
use crate::scraper::{ExtractionResult, ScraperSet};
use crate::url::{extract_username, sanitize_url, ProfileReference};
use chrono::{DateTime, Utc};

/// Spreadsheet row number of a data row (header is row 1)
pub fn sheet_row_number(index: usize) -> usize {
    index + 2
}

/// Resolves the identity key that names a row's artifacts
///
/// # Resolution Order
///
/// 1. Non-empty `RollNo` cell
/// 2. Username of the GitHub URL
/// 3. Username of the LinkedIn `/in/` URL
/// 4. `row_{n}` with `n` the spreadsheet row number
pub fn resolve_identity(row: &[String], mapping: &ColumnMapping, index: usize) -> String {
    if let Some(roll_no) = mapping.roll_no_cell(row) {
        return roll_no.to_string();
    }

    [Platform::GitHub, Platform::LinkedIn]
        .into_iter()
        .find_map(|platform| {
            let url = sanitize_url(mapping.url_cell(row, platform)?)?;
            extract_username(&url, platform)
        })
        .unwrap_or_else(|| format!("row_{}", sheet_row_number(index)))
}

/// One dispatched scrape
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub platform: Platform,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub result: ExtractionResult,
}

/// Everything one row produced
///
/// Rows never touch shared counters; the batch folds these instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOutcome {
    /// Zero-based data row index
    pub index: usize,
    pub identity: String,
    pub cells: OutputCells,
    pub attempts: Vec<Attempt>,
}

impl RowOutcome {
    /// Row id used in logs and sample errors
    pub fn row_id(&self) -> String {
        sheet_row_number(self.index).to_string()
    }
}

/// Shared, read-only state used to process rows
#[derive(Debug, Clone, Copy)]
pub struct RowProcessor<'a> {
    pub mapping: &'a ColumnMapping,
    pub platforms: &'a PlatformsConfig,
    pub limiter: &'a RateLimiterManager,
    pub scrapers: &'a ScraperSet,
}

impl RowProcessor<'_> {
    /// Scrapes every platform of one row, in platform order
    ///
    /// Cells that do not hold a URL of the platform's domains are skipped
    /// without counting as an attempt.
    pub async fn process(&self, index: usize, row: &[String]) -> RowOutcome {
        let identity = resolve_identity(row, self.mapping, index);
        let mut cells = OutputCells::default();
        let mut attempts = Vec::new();

        for platform in Platform::ALL {
            let Some(raw) = self.mapping.url_cell(row, platform) else {
                continue;
            };

            let reference = ProfileReference::from_cell(platform, raw, self.platforms);
            let Some(url) = reference.normalized_url else {
                tracing::debug!(
                    row = sheet_row_number(index),
                    %platform,
                    raw,
                    "Skipping cell without a valid profile URL"
                );
                continue;
            };

            let result = match self.limiter.acquire(platform).await {
                Ok(()) => self.scrapers.scrape(platform, &url, &identity).await,
                Err(e) => {
                    tracing::warn!(%platform, "Rate limiter refused request: {}", e);
                    ExtractionResult::failure(e.to_string())
                }
            };

            match result.error() {
                None => tracing::debug!(row = sheet_row_number(index), %platform, "Scraped"),
                Some(error) => tracing::debug!(
                    row = sheet_row_number(index),
                    %platform,
                    error,
                    "Scrape failed"
                ),
            }

            cells.apply(platform, &result);
            attempts.push(Attempt {
                platform,
                url: url.to_string(),
                timestamp: Utc::now(),
                result,
            });
        }

        RowOutcome {
            index,
            identity,
            cells,
            attempts,
        }
    }
}
