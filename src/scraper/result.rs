use crate::scraper::ScrapeError;
use serde::Serialize;

/// A metric extracted from a profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    /// LeetCode global contest rank
    ContestRank(u64),

    /// Codeforces current rating
    Rating(u32),

    /// GitHub activity; each half may be missing on its own
    Contributions {
        commits_12mo: Option<u64>,
        public_repos: Option<u64>,
    },

    /// Path of the saved LinkedIn photo
    PhotoPath(String),
}

impl Metric {
    /// Activity log message for a successful extraction
    pub fn log_message(&self) -> String {
        match self {
            Self::ContestRank(rank) => format!("Rank: {}", rank),
            Self::Rating(rating) => format!("Rating: {}", rating),
            Self::Contributions {
                commits_12mo,
                public_repos,
            } => format!(
                "Commits: {}, Repos: {}",
                display_or_na(*commits_12mo),
                display_or_na(*public_repos)
            ),
            Self::PhotoPath(path) => format!("Photo: {}", path),
        }
    }
}

/// Marker written wherever a value could not be obtained
pub const NOT_AVAILABLE: &str = "N/A";

/// Renders an optional count, or the not-available marker
pub fn display_or_na(value: Option<u64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Result of scraping one platform for one row
///
/// Exactly one of `value` and `error` is set; the two constructors are the
/// only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    success: bool,
    value: Option<Metric>,
    error: Option<String>,
}

impl ExtractionResult {
    /// A successful extraction
    pub fn success(value: Metric) -> Self {
        Self {
            success: true,
            value: Some(value),
            error: None,
        }
    }

    /// A failed extraction with a human-readable reason
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn value(&self) -> Option<&Metric> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Success message or failure reason, as written to the activity log
    pub fn message(&self) -> String {
        match (&self.value, &self.error) {
            (Some(value), _) => value.log_message(),
            (None, Some(error)) => error.clone(),
            (None, None) => String::new(),
        }
    }
}

impl From<Result<Metric, ScrapeError>> for ExtractionResult {
    fn from(result: Result<Metric, ScrapeError>) -> Self {
        match result {
            Ok(metric) => Self::success(metric),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
