//! Profile Enricher: per-platform rate-limited profile scraping
//!
//! This crate fills a spreadsheet of student profile links with public
//! metrics: LeetCode contest rank, Codeforces rating, GitHub activity and
//! a saved LinkedIn photo. Every platform has its own request budget, and
//! a failure on one cell never stops the rest of the batch.

pub mod config;
pub mod enrich;
pub mod limiter;
pub mod output;
pub mod platform;
pub mod scraper;
pub mod url;

use thiserror::Error;

/// Batch-level error type
///
/// Raised before or after scraping; per-cell failures are recorded in the
/// activity log instead.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Missing required columns: expected RollNo or at least one of LeetCodeURL, CodeforcesURL, LinkedInURL, GitHubURL (found: {found})")]
    MissingColumns { found: String },

    #[error("Unsupported file type: {0} (expected .csv)")]
    UnsupportedFile(String),

    #[error("Input file too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("No profile URLs provided")]
    NoUrls,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
}

/// Rate limiter errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimiterError {
    #[error("requested {requested} tokens but bucket capacity is {capacity}")]
    ExceedsCapacity { requested: f64, capacity: f64 },
}

// Re-export commonly used types
pub use config::Config;
pub use enrich::{AnalyzeRequest, Enricher, Enrichment};
pub use output::{BatchSummary, Sheet};
pub use platform::Platform;
pub use scraper::{ExtractionResult, Metric};
