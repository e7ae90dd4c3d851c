use crate::config::{Config, PhotoEngine};
use crate::scraper::{Fetcher, ScrapeError};
use url::Url;

/// Where LinkedIn profile pages are loaded from
///
/// Chosen once from `photos.engine` when the scrapers are built.
#[derive(Debug, Clone)]
pub enum PageSource {
    /// Plain HTTP through the shared fetcher
    Http(Fetcher),

    /// Rendered by headless Chromium
    #[cfg(feature = "browser")]
    Browser(crate::scraper::BrowserFetcher),
}

impl PageSource {
    /// Builds the source selected by the configuration
    pub async fn from_config(config: &Config, fetcher: &Fetcher) -> Result<Self, ScrapeError> {
        match config.photos.engine {
            PhotoEngine::Http => Ok(Self::Http(fetcher.clone())),
            #[cfg(feature = "browser")]
            PhotoEngine::Browser => {
                let browser =
                    crate::scraper::BrowserFetcher::launch(&config.fetcher, &config.photos).await?;
                Ok(Self::Browser(browser))
            }
            #[cfg(not(feature = "browser"))]
            PhotoEngine::Browser => Err(ScrapeError::Browser(
                "photo engine \"browser\" requires the `browser` feature".to_string(),
            )),
        }
    }

    /// Loads the page at `url`
    pub async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        match self {
            Self::Http(fetcher) => Ok(fetcher.fetch(url.as_str()).await?),
            #[cfg(feature = "browser")]
            Self::Browser(browser) => browser.fetch(url.as_str()).await,
        }
    }
}
