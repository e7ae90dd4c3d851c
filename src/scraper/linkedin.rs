//! LinkedIn profile photo

use crate::scraper::parser::{first_match, select_all, Strategy};
use crate::scraper::{ExtractionResult, Fetcher, Metric, PageSource, PhotoStore, ScrapeError};
use scraper::{ElementRef, Html};
use url::Url;

/// Image reference strategies tried in order
pub const STRATEGIES: &[Strategy<String>] = &[from_og_image, from_profile_img, from_top_card];

/// Class fragments marking a profile picture
const IMAGE_CLASS_HINTS: [&str; 3] = ["profile", "avatar", "photo"];

/// Source fragments marking a profile picture
const IMAGE_SRC_HINTS: [&str; 2] = ["profile", "photo"];

/// Selectors of the rendered profile card
const TOP_CARD_SELECTORS: [&str; 4] = [
    "img.pv-top-card-profile-picture__image",
    "img[class*='profile-photo']",
    "img[class*='avatar']",
    "img[alt*='profile']",
];

/// Finds the profile image reference, resolved against the page URL
pub fn find_photo_url(html: &str, page_url: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    let reference = first_match(&document, STRATEGIES)?;
    page_url.join(&reference).ok()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn from_og_image(document: &Html) -> Option<String> {
    select_all(document, r#"meta[property="og:image"]"#)
        .into_iter()
        .find_map(|meta| non_empty(meta.value().attr("content")))
}

fn from_profile_img(document: &Html) -> Option<String> {
    select_all(document, "img")
        .into_iter()
        .filter(|img| has_class_hint(*img))
        .find_map(|img| {
            let src = non_empty(img.value().attr("src"))
                .or_else(|| non_empty(img.value().attr("data-src")))?;
            IMAGE_SRC_HINTS
                .iter()
                .any(|hint| src.contains(hint))
                .then_some(src)
        })
}

fn has_class_hint(img: ElementRef<'_>) -> bool {
    img.value().classes().any(|class| {
        let class = class.to_lowercase();
        IMAGE_CLASS_HINTS.iter().any(|hint| class.contains(hint))
    })
}

fn from_top_card(document: &Html) -> Option<String> {
    TOP_CARD_SELECTORS.iter().find_map(|selector| {
        select_all(document, selector)
            .into_iter()
            .find_map(|img| non_empty(img.value().attr("src")))
    })
}

/// Scraper for LinkedIn profile photos
#[derive(Debug, Clone)]
pub struct LinkedInScraper {
    source: PageSource,
    fetcher: Fetcher,
    photos: PhotoStore,
}

impl LinkedInScraper {
    /// Creates a scraper; `source` loads profile pages, `fetcher` downloads images
    pub fn new(source: PageSource, fetcher: Fetcher, photos: PhotoStore) -> Self {
        Self {
            source,
            fetcher,
            photos,
        }
    }

    /// Finds, downloads and saves the profile photo for `identity`
    pub async fn scrape(&self, url: &Url, identity: &str) -> ExtractionResult {
        self.collect(url, identity).await.into()
    }

    async fn collect(&self, url: &Url, identity: &str) -> Result<Metric, ScrapeError> {
        // Fail before any request when no file name can be derived
        self.photos.path_for(identity)?;

        let html = self.source.fetch(url).await?;
        let image_url = find_photo_url(&html, url).ok_or(ScrapeError::PhotoNotFound)?;
        tracing::debug!(image = %image_url, "Found profile photo");

        let bytes = self.fetcher.fetch_bytes(image_url.as_str()).await?;
        let path = self.photos.save(bytes, identity).await?;
        Ok(Metric::PhotoPath(path))
    }
}
