//! Platform definitions for the profile sites we scrape
//!
//! Each platform owns one spreadsheet input column, one rate limiter bucket
//! and one or two output columns.

use serde::Serialize;
use std::fmt;

/// A profile site whose public metrics are scraped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Global contest rank
    LeetCode,

    /// Current contest rating
    Codeforces,

    /// Contributions in the last year and public repository count
    GitHub,

    /// Profile photo
    LinkedIn,
}

impl Platform {
    /// All platforms, in the order a row is processed
    pub const ALL: [Platform; 4] = [
        Platform::LeetCode,
        Platform::Codeforces,
        Platform::GitHub,
        Platform::LinkedIn,
    ];

    /// Lowercase key used in configuration and summaries
    pub fn key(&self) -> &'static str {
        match self {
            Self::LeetCode => "leetcode",
            Self::Codeforces => "codeforces",
            Self::GitHub => "github",
            Self::LinkedIn => "linkedin",
        }
    }

    /// Human-readable name used in the activity log
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LeetCode => "LeetCode",
            Self::Codeforces => "Codeforces",
            Self::GitHub => "GitHub",
            Self::LinkedIn => "LinkedIn",
        }
    }

    /// Normalized name of the spreadsheet column holding this platform's URL
    pub fn url_column(&self) -> &'static str {
        match self {
            Self::LeetCode => "leetcodeurl",
            Self::Codeforces => "codeforcesurl",
            Self::GitHub => "githuburl",
            Self::LinkedIn => "linkedinurl",
        }
    }

    /// Domains a profile URL must belong to unless configured otherwise
    pub fn default_domains(&self) -> Vec<String> {
        let domain = match self {
            Self::LeetCode => "leetcode.com",
            Self::Codeforces => "codeforces.com",
            Self::GitHub => "github.com",
            Self::LinkedIn => "linkedin.com",
        };
        vec![domain.to_string()]
    }

    /// Requests per second allowed unless configured otherwise
    pub fn default_rate_limit(&self) -> f64 {
        match self {
            Self::LeetCode => 0.8,
            Self::Codeforces => 1.0,
            Self::GitHub => 0.8,
            Self::LinkedIn => 0.5,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
