//! Batch enrichment of a whole sheet

use crate::config::{validate, Config};
use crate::enrich::columns::{ColumnMapping, OutputCells, OUTPUT_COLUMNS};
use crate::enrich::row::{RowOutcome, RowProcessor};
use crate::limiter::RateLimiterManager;
use crate::output::{ActivityLogEntry, BatchSummary, PlatformStats, Sheet};
use crate::platform::Platform;
use crate::scraper::ScraperSet;
use crate::EnrichError;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::time::Instant;

/// Rows between two progress reports
const PROGRESS_INTERVAL: usize = 10;

/// Result of one batch
#[derive(Debug, Clone)]
pub struct Enrichment {
    /// Input sheet with the output columns appended
    pub sheet: Sheet,

    /// One entry per attempt, in completion order
    pub log: Vec<ActivityLogEntry>,

    pub summary: BatchSummary,
}

/// Counters and log folded from row outcomes
#[derive(Debug, Default)]
struct BatchAccumulator {
    stats: HashMap<Platform, PlatformStats>,
    log: Vec<ActivityLogEntry>,
    cells: Vec<Option<Vec<String>>>,
    rows_done: usize,
}

impl BatchAccumulator {
    fn new(rows: usize) -> Self {
        Self {
            cells: vec![None; rows],
            ..Self::default()
        }
    }

    fn fold(&mut self, outcome: RowOutcome) {
        let row_id = outcome.row_id();

        for attempt in &outcome.attempts {
            let stats = self.stats.entry(attempt.platform).or_default();
            match attempt.result.error() {
                None => stats.record_success(),
                Some(error) => stats.record_error(&row_id, &attempt.url, error),
            }

            self.log.push(ActivityLogEntry::new(
                attempt.timestamp,
                &row_id,
                attempt.platform,
                &attempt.url,
                &attempt.result,
            ));
        }

        if let Some(slot) = self.cells.get_mut(outcome.index) {
            *slot = Some(outcome.cells.into_vec());
        }
        self.rows_done += 1;
    }
}

/// Enriches sheets of profile links
///
/// Owns the rate limiter and scrapers; the limiter's budget is shared by
/// every batch and analysis run through the same enricher.
#[derive(Debug)]
pub struct Enricher {
    config: Config,
    limiter: RateLimiterManager,
    scrapers: ScraperSet,
}

impl Enricher {
    /// Validates `config`, then builds the HTTP client, the rate limiter
    /// and every scraper
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Config`] for a configuration that fails
    /// validation, such as a non-positive rate or a burst below one token.
    pub async fn new(config: Config) -> Result<Self, EnrichError> {
        validate(&config)?;
        let limiter = RateLimiterManager::new(&config.platforms);
        let scrapers = ScraperSet::build(&config).await?;

        Ok(Self {
            config,
            limiter,
            scrapers,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn limiter(&self) -> &RateLimiterManager {
        &self.limiter
    }

    pub(crate) fn scrapers(&self) -> &ScraperSet {
        &self.scrapers
    }

    /// Scrapes every row of `input` and returns the enriched sheet
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::MissingColumns`] before any request when the
    /// sheet has neither an identity column nor a recognized URL column.
    pub async fn enrich(&self, input: &Sheet) -> Result<Enrichment, EnrichError> {
        let start = Instant::now();
        let mapping = ColumnMapping::validated(&input.headers)?;

        let total_rows = input.rows.len();
        tracing::info!(
            rows = total_rows,
            platforms = ?mapping.platforms(),
            max_concurrent_rows = self.config.batch.max_concurrent_rows,
            "Starting enrichment"
        );

        let processor = &RowProcessor {
            mapping: &mapping,
            platforms: &self.config.platforms,
            limiter: &self.limiter,
            scrapers: &self.scrapers,
        };

        let mut acc = BatchAccumulator::new(total_rows);
        let mut outcomes = stream::iter(input.rows.iter().enumerate())
            .map(move |(index, row)| processor.process(index, row))
            .buffer_unordered(self.config.batch.max_concurrent_rows.max(1));

        while let Some(outcome) = outcomes.next().await {
            acc.fold(outcome);

            if acc.rows_done % PROGRESS_INTERVAL == 0 || acc.rows_done == total_rows {
                tracing::info!(
                    "Progress: {}/{} rows, {} attempts logged",
                    acc.rows_done,
                    total_rows,
                    acc.log.len()
                );
            }
        }

        let sheet = assemble_sheet(input, acc.cells);
        let total_duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let summary = BatchSummary::from_stats(total_rows as u64, total_duration_ms, &acc.stats);

        tracing::info!(
            rows = total_rows,
            attempts = acc.log.len(),
            duration_ms = total_duration_ms,
            "Enrichment complete"
        );

        Ok(Enrichment {
            sheet,
            log: acc.log,
            summary,
        })
    }
}

/// Appends the output columns to a copy of the input
///
/// Input rows are first brought to the header width so the output cells
/// always land under their own columns. Rows without an outcome keep the
/// not-available marker.
fn assemble_sheet(input: &Sheet, cells: Vec<Option<Vec<String>>>) -> Sheet {
    let width = input.headers.len();
    let mut headers = input.headers.clone();
    headers.extend(OUTPUT_COLUMNS.iter().map(|c| c.to_string()));

    let rows = input
        .rows
        .iter()
        .zip(cells)
        .map(|(row, outputs)| {
            let mut row = row.clone();
            row.resize(width, String::new());
            row.extend(outputs.unwrap_or_else(|| OutputCells::default().into_vec()));
            row
        })
        .collect();

    Sheet::new(headers, rows)
}
