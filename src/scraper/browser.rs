//! Headless Chromium page source
//!
//! Renders JavaScript before handing the HTML back, which exposes the
//! profile card markup a plain HTTP client never sees.

use crate::config::{FetcherConfig, PhotosConfig};
use crate::scraper::ScrapeError;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

/// Selectors awaited before the DOM is read, in order
const PROFILE_IMAGE_SELECTORS: [&str; 3] = [
    "img.pv-top-card-profile-picture__image",
    "img[class*='profile-photo']",
    "img[alt*='profile']",
];

/// A shared Chromium process; each fetch opens and closes one tab
#[derive(Clone)]
pub struct BrowserFetcher {
    browser: Arc<Browser>,
    timeout: Duration,
}

impl std::fmt::Debug for BrowserFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserFetcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl BrowserFetcher {
    /// Launches Chromium
    ///
    /// Requires a Chrome or Chromium binary that `chromiumoxide` can find.
    pub async fn launch(fetcher: &FetcherConfig, photos: &PhotosConfig) -> Result<Self, ScrapeError> {
        let mut builder = BrowserConfig::builder().no_sandbox();
        if !photos.headless {
            builder = builder.with_head();
        }

        let config = builder
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--no-first-run")
            .arg(format!("--user-agent={}", fetcher.user_agent))
            .build()
            .map_err(|e| ScrapeError::Browser(format!("browser config error: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::Browser(format!("failed to launch browser: {}", e)))?;

        // The CDP handler must be polled for the connection to make progress
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::warn!("Browser handler error: {}", e);
                    break;
                }
            }
        });

        tracing::info!(headless = photos.headless, "Browser engine started");

        Ok(Self {
            browser: Arc::new(browser),
            timeout: Duration::from_secs(fetcher.request_timeout),
        })
    }

    /// Loads `url` in a new tab and returns the rendered HTML
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let rendered = tokio::time::timeout(self.timeout, async {
            let page = self
                .browser
                .new_page(url)
                .await
                .map_err(|e| ScrapeError::Browser(format!("failed to navigate: {}", e)))?;

            for selector in PROFILE_IMAGE_SELECTORS {
                if page.find_element(selector).await.is_ok() {
                    break;
                }
            }

            let html = page
                .content()
                .await
                .map_err(|e| ScrapeError::Browser(format!("failed to read page: {}", e)));

            if let Err(e) = page.close().await {
                tracing::debug!("Failed to close tab: {}", e);
            }

            html
        })
        .await;

        match rendered {
            Ok(inner) => inner,
            Err(_) => Err(ScrapeError::Browser("page load timed out".to_string())),
        }
    }
}
