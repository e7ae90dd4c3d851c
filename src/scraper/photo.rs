//! Profile photo storage
//!
//! Downloaded images are normalized to RGB JPEG and written under the
//! photo directory, one file per identity key.

use crate::scraper::ScrapeError;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Writes normalized photos into one directory
#[derive(Debug, Clone)]
pub struct PhotoStore {
    directory: PathBuf,
    quality: u8,
}

impl PhotoStore {
    pub fn new(directory: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            directory: directory.into(),
            quality,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path a photo for `identity` is written to
    pub fn path_for(&self, identity: &str) -> Result<PathBuf, ScrapeError> {
        let stem = safe_file_stem(identity);
        if stem.is_empty() {
            return Err(ScrapeError::MissingIdentity);
        }
        Ok(self.directory.join(format!("{}.jpg", stem)))
    }

    /// Re-encodes `bytes` as JPEG and saves it for `identity`
    ///
    /// Decoding and encoding run on the blocking pool. Returns the written
    /// path as displayed in the output sheet.
    pub async fn save(&self, bytes: Vec<u8>, identity: &str) -> Result<String, ScrapeError> {
        let path = self.path_for(identity)?;
        let directory = self.directory.clone();
        let quality = self.quality;

        let written = tokio::task::spawn_blocking(move || -> Result<PathBuf, ScrapeError> {
            let jpeg = encode_jpeg(&bytes, quality).map_err(|e| ScrapeError::Image(e.to_string()))?;
            std::fs::create_dir_all(&directory).map_err(|e| ScrapeError::Image(e.to_string()))?;
            std::fs::write(&path, jpeg).map_err(|e| ScrapeError::Image(e.to_string()))?;
            Ok(path)
        })
        .await
        .map_err(|e| ScrapeError::Image(format!("encoder task failed: {}", e)))??;

        tracing::debug!(path = %written.display(), "Photo saved");
        Ok(written.display().to_string())
    }
}

/// Decodes any supported image and re-encodes it as an RGB JPEG
pub fn encode_jpeg(bytes: &[u8], quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let mut out = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))?;
    Ok(out)
}

/// Replaces characters that are unsafe in file names with `_`
pub fn safe_file_stem(identity: &str) -> String {
    identity
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}
