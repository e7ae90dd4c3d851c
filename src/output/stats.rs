//! Per-platform counters and the batch summary
//!
//! Counters are only mutated by the batch fold; the summary is derived
//! from them once the batch is done.

use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Failures kept per platform as examples
pub const MAX_SAMPLE_ERRORS: usize = 5;

/// One failed attempt kept as an example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleError {
    pub row_id: String,
    pub url: String,
    pub error: String,
}

/// Success and error counters for one platform
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformStats {
    pub success_count: u64,
    pub error_count: u64,
    pub sample_errors: Vec<SampleError>,
}

impl PlatformStats {
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    /// Counts a failure, keeping the first few as samples
    pub fn record_error(&mut self, row_id: &str, url: &str, error: &str) {
        self.error_count += 1;
        if self.sample_errors.len() < MAX_SAMPLE_ERRORS {
            self.sample_errors.push(SampleError {
                row_id: row_id.to_string(),
                url: url.to_string(),
                error: error.to_string(),
            });
        }
    }

    /// Total attempts
    pub fn attempts(&self) -> u64 {
        self.success_count + self.error_count
    }

    /// Success percentage rounded to 2 decimals; 0 without attempts
    pub fn success_rate(&self) -> f64 {
        let attempts = self.attempts();
        if attempts == 0 {
            return 0.0;
        }
        let rate = self.success_count as f64 / attempts as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

/// Summary of one platform as reported after a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSummary {
    pub success_count: u64,
    pub error_count: u64,
    pub success_rate: f64,
    pub sample_errors: Vec<SampleError>,
}

impl From<&PlatformStats> for PlatformSummary {
    fn from(stats: &PlatformStats) -> Self {
        Self {
            success_count: stats.success_count,
            error_count: stats.error_count,
            success_rate: stats.success_rate(),
            sample_errors: stats.sample_errors.clone(),
        }
    }
}

/// Outcome of one batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_rows: u64,
    pub total_duration_ms: u64,

    /// Keyed by platform key; every platform is present
    pub platforms: BTreeMap<String, PlatformSummary>,
}

impl BatchSummary {
    /// Builds the summary from the folded counters
    pub fn from_stats(
        total_rows: u64,
        total_duration_ms: u64,
        stats: &HashMap<Platform, PlatformStats>,
    ) -> Self {
        let empty = PlatformStats::default();
        let platforms = Platform::ALL
            .into_iter()
            .map(|platform| {
                let platform_stats = stats.get(&platform).unwrap_or(&empty);
                (platform.key().to_string(), PlatformSummary::from(platform_stats))
            })
            .collect();

        Self {
            total_rows,
            total_duration_ms,
            platforms,
        }
    }

    /// Summary of one platform
    pub fn platform(&self, platform: Platform) -> Option<&PlatformSummary> {
        self.platforms.get(platform.key())
    }
}

/// Prints a summary to stdout in a formatted manner
pub fn print_summary(summary: &BatchSummary) {
    println!("=== Enrichment Summary ===\n");

    println!("Overview:");
    println!("  Rows processed: {}", summary.total_rows);
    println!(
        "  Duration: {:.1}s",
        summary.total_duration_ms as f64 / 1000.0
    );
    println!();

    println!("Platforms:");
    for platform in Platform::ALL {
        let Some(stats) = summary.platform(platform) else {
            continue;
        };
        println!(
            "  {}: {} ok, {} failed ({:.2}%)",
            platform, stats.success_count, stats.error_count, stats.success_rate
        );
        for sample in &stats.sample_errors {
            println!("    row {}: {} ({})", sample.row_id, sample.error, sample.url);
        }
    }
}
