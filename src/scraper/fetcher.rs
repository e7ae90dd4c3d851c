//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the scrapers:
//! - Building one shared HTTP client with browser-like headers
//! - GET requests for profile pages and photo bytes
//! - Exponential backoff for transient failures
//! - Status classification into [`FetchError`]

use crate::config::FetcherConfig;
use crate::scraper::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, DNT, UPGRADE_INSECURE_REQUESTS};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Longest single backoff delay
const MAX_BACKOFF: Duration = Duration::from_secs(300);

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

    let timeout = Duration::from_secs(config.request_timeout);

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Shared page and image fetcher
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    backoff_factor: f64,
}

impl Fetcher {
    /// Creates a fetcher with its own HTTP client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?, config))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, config: &FetcherConfig) -> Self {
        Self {
            client,
            max_retries: config.max_retries,
            backoff_factor: config.backoff_factor,
        }
    }

    /// Fetches a page body as text
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let body = self.fetch_bytes(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Fetches a URL with retry logic and returns the raw body
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | 2xx | Success |
    /// | HTTP 404 | Immediate → NotFound |
    /// | HTTP 403 | Immediate → Forbidden |
    /// | HTTP 429 | Retry with backoff → RateLimited |
    /// | Timeout | Retry with backoff → Timeout |
    /// | Connection failure | Retry with backoff → Connection |
    /// | Other status | Immediate → Status |
    ///
    /// At most `1 + max_retries` attempts are made. Before retry `k` the
    /// fetcher sleeps `backoff_factor^k` seconds.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            match self.attempt(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retriable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(self.backoff_factor, attempt);
                    tracing::warn!(
                        url,
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Transient fetch error, retrying after backoff: {}",
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::debug!(url, "Fetch failed: {}", e);
                    return Err(e);
                }
            }
        }
    }

    /// One GET request, including reading the body
    async fn attempt(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        classify_status(response.status())?;

        let body = response.bytes().await.map_err(FetchError::from_transport)?;
        Ok(body.to_vec())
    }
}

/// Maps a response status to success or a [`FetchError`]
fn classify_status(status: StatusCode) -> Result<(), FetchError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(FetchError::NotFound),
        StatusCode::FORBIDDEN => Err(FetchError::Forbidden),
        StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited),
        other => Err(FetchError::Status(other.as_u16())),
    }
}

/// Delay before retry number `attempt` (starting at 1)
fn backoff_delay(factor: f64, attempt: u32) -> Duration {
    let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
    let secs = factor.powi(exponent);
    if !secs.is_finite() || secs < 0.0 {
        return MAX_BACKOFF;
    }
    Duration::from_secs_f64(secs.min(MAX_BACKOFF.as_secs_f64()))
}
