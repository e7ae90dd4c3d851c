//! Input column recognition and output cells

use crate::platform::Platform;
use crate::scraper::{display_or_na, ExtractionResult, Metric, NOT_AVAILABLE};
use crate::EnrichError;
use std::collections::HashMap;

/// Normalized name of the identity column
pub const ROLL_NO_COLUMN: &str = "rollno";

/// Output column headers, appended in this order
pub const OUTPUT_COLUMNS: [&str; 5] = [
    "LC_Global_Contest_Rank",
    "CF_Rating",
    "Photos_Path",
    "GH_Commits_12mo",
    "GH_Public_Repos",
];

const CONTEST_RANK: usize = 0;
const RATING: usize = 1;
const PHOTO_PATH: usize = 2;
const COMMITS: usize = 3;
const PUBLIC_REPOS: usize = 4;

/// Lowercases, trims and removes spaces and underscores
///
/// # Examples
///
/// ```
/// use profile_enricher::enrich::normalize_column_name;
///
/// assert_eq!(normalize_column_name(" LeetCode_URL "), "leetcodeurl");
/// assert_eq!(normalize_column_name("Roll No"), "rollno");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '_'], "")
}

/// Positions of the recognized input columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    roll_no: Option<usize>,
    urls: HashMap<Platform, usize>,
}

impl ColumnMapping {
    /// Recognizes columns by normalized name; the first match wins
    pub fn from_headers(headers: &[String]) -> Self {
        let mut mapping = Self::default();

        for (idx, header) in headers.iter().enumerate() {
            let normalized = normalize_column_name(header);
            if normalized == ROLL_NO_COLUMN {
                mapping.roll_no.get_or_insert(idx);
                continue;
            }
            if let Some(platform) = Platform::ALL
                .into_iter()
                .find(|p| p.url_column() == normalized)
            {
                mapping.urls.entry(platform).or_insert(idx);
            }
        }

        mapping
    }

    /// Recognizes columns and requires an identity or URL column
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::MissingColumns`] when neither is present.
    pub fn validated(headers: &[String]) -> Result<Self, EnrichError> {
        let mapping = Self::from_headers(headers);
        if mapping.roll_no.is_none() && mapping.urls.is_empty() {
            return Err(EnrichError::MissingColumns {
                found: headers.join(", "),
            });
        }
        Ok(mapping)
    }

    pub fn roll_no(&self) -> Option<usize> {
        self.roll_no
    }

    /// Position of the URL column of `platform`
    pub fn url_column(&self, platform: Platform) -> Option<usize> {
        self.urls.get(&platform).copied()
    }

    /// Trimmed identity cell of a row, if non-empty
    pub fn roll_no_cell<'a>(&self, row: &'a [String]) -> Option<&'a str> {
        non_empty_cell(row, self.roll_no)
    }

    /// Trimmed URL cell of a row, if non-empty
    pub fn url_cell<'a>(&self, row: &'a [String], platform: Platform) -> Option<&'a str> {
        non_empty_cell(row, self.url_column(platform))
    }

    /// Platforms with a URL column, in processing order
    pub fn platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.urls.contains_key(p))
            .collect()
    }
}

fn non_empty_cell(row: &[String], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i))
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
}

/// The five output cells of one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCells([String; 5]);

impl Default for OutputCells {
    fn default() -> Self {
        Self(std::array::from_fn(|_| NOT_AVAILABLE.to_string()))
    }
}

impl OutputCells {
    /// Writes the value(s) of one extraction; failures leave the marker
    pub fn apply(&mut self, platform: Platform, result: &ExtractionResult) {
        let Some(metric) = result.value() else {
            return;
        };

        match (platform, metric) {
            (Platform::LeetCode, Metric::ContestRank(rank)) => {
                self.0[CONTEST_RANK] = rank.to_string();
            }
            (Platform::Codeforces, Metric::Rating(rating)) => {
                self.0[RATING] = rating.to_string();
            }
            (
                Platform::GitHub,
                Metric::Contributions {
                    commits_12mo,
                    public_repos,
                },
            ) => {
                self.0[COMMITS] = display_or_na(*commits_12mo);
                self.0[PUBLIC_REPOS] = display_or_na(*public_repos);
            }
            (Platform::LinkedIn, Metric::PhotoPath(path)) => {
                self.0[PHOTO_PATH] = path.clone();
            }
            (platform, metric) => {
                tracing::warn!(%platform, ?metric, "Metric does not belong to platform, ignored");
            }
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into()
    }
}
