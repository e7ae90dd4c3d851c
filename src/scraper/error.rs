//! Per-cell error types
//!
//! These errors never escape a row: they are rendered into an
//! [`ExtractionResult`](super::ExtractionResult) failure reason.

use thiserror::Error;

/// Outcome of a failed HTTP fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("profile not found (404)")]
    NotFound,

    #[error("access forbidden (403)")]
    Forbidden,

    #[error("rate limited (429)")]
    RateLimited,

    #[error("request timeout")]
    Timeout,

    #[error("connection error")]
    Connection,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("request error: {0}")]
    Request(String),
}

impl FetchError {
    /// Returns true for transient conditions worth another attempt
    ///
    /// | Error | Retried |
    /// |-------|---------|
    /// | 429 | yes |
    /// | Timeout | yes |
    /// | Connection | yes |
    /// | 404, 403, other status | no |
    /// | Other request errors | no |
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Timeout | Self::Connection)
    }

    /// Classifies a transport-level reqwest error
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            tracing::debug!("Connection failed: {}", error);
            Self::Connection
        } else {
            Self::Request(error.to_string())
        }
    }
}

/// Reasons a platform scrape can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{metric} not found on profile")]
    MetricNotFound { metric: &'static str },

    #[error("could not extract {0} metrics")]
    NoMetrics(&'static str),

    #[error("profile photo not found (may require authentication)")]
    PhotoNotFound,

    #[error("no identity key for photo filename")]
    MissingIdentity,

    #[error("invalid profile URL: {0}")]
    InvalidUrl(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("browser error: {0}")]
    Browser(String),
}
