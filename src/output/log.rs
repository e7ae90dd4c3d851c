use crate::platform::Platform;
use crate::scraper::ExtractionResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Outcome label of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Error,
}

/// One scrape attempt, as written to the log sheet
///
/// Column order follows the field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityLogEntry {
    #[serde(serialize_with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub row_id: String,
    pub platform: String,
    pub url: String,
    pub status: LogStatus,
    pub message: String,
}

impl ActivityLogEntry {
    /// Records one attempt at `timestamp`
    pub fn new(
        timestamp: DateTime<Utc>,
        row_id: &str,
        platform: Platform,
        url: &str,
        result: &ExtractionResult,
    ) -> Self {
        let status = if result.is_success() {
            LogStatus::Success
        } else {
            LogStatus::Error
        };

        Self {
            timestamp,
            row_id: row_id.to_string(),
            platform: platform.display_name().to_string(),
            url: url.to_string(),
            status,
            message: result.message(),
        }
    }
}

fn rfc3339<S: serde::Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
