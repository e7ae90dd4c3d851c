//! Integration tests for the profile enricher
//!
//! These tests use wiremock to stand in for the profile sites. Every
//! platform's accepted domain is pointed at the mock server's host.

mod enrich_tests;
mod fetcher_tests;
mod scraper_tests;

use profile_enricher::config::Config;
use profile_enricher::platform::Platform;
use std::path::Path;
use wiremock::MockServer;

/// Creates a configuration that accepts the mock server for every platform
///
/// Rates are high and backoff is zero so tests never wait.
pub fn test_config(server: &MockServer, dir: &Path) -> Config {
    let host = url::Url::parse(&server.uri())
        .expect("Failed to parse mock server URI")
        .host_str()
        .expect("Mock server URI has no host")
        .to_string();

    let mut config = Config::default();
    for platform in Platform::ALL {
        let settings = config.platforms.get_mut(platform);
        settings.rate_limit = 1000.0;
        settings.domains = vec![host.clone()];
    }
    config.fetcher.request_timeout = 5;
    config.fetcher.max_retries = 2;
    config.fetcher.backoff_factor = 0.0;
    config.photos.directory = dir.join("photos").display().to_string();
    config.output.directory = dir.join("output").display().to_string();
    config
}

/// Encodes a small RGBA PNG
pub fn png_bytes() -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(8, 8, image::Rgba([10, 120, 200, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    out.into_inner()
}
