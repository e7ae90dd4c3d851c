//! URL handling module for the profile enricher
//!
//! This module provides cell sanitizing, platform domain validation, and
//! username extraction for identity keys.

mod domain;
mod sanitize;
mod username;

use crate::config::PlatformsConfig;
use crate::platform::Platform;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, host_matches};
pub use sanitize::sanitize_url;
pub use username::extract_username;

/// A profile URL taken from one spreadsheet cell
///
/// `normalized_url` is present only when the cell held a URL whose host
/// belongs to the platform's accepted domains. Only such references are
/// dispatched to a scraper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileReference {
    pub platform: Platform,
    pub raw_url: String,
    pub normalized_url: Option<Url>,
}

impl ProfileReference {
    /// Sanitizes a raw cell and validates it against the platform's domains
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_enricher::config::PlatformsConfig;
    /// use profile_enricher::platform::Platform;
    /// use profile_enricher::url::ProfileReference;
    ///
    /// let platforms = PlatformsConfig::default();
    /// let reference = ProfileReference::from_cell(Platform::GitHub, "gitlab.com/x", &platforms);
    /// assert!(!reference.is_dispatchable());
    /// ```
    pub fn from_cell(platform: Platform, raw: &str, platforms: &PlatformsConfig) -> Self {
        let domains = &platforms.get(platform).domains;
        let normalized_url = sanitize_url(raw).filter(|url| host_matches(url, domains));

        Self {
            platform,
            raw_url: raw.to_string(),
            normalized_url,
        }
    }

    /// Returns true if the reference should be handed to a scraper
    pub fn is_dispatchable(&self) -> bool {
        self.normalized_url.is_some()
    }
}
