use crate::platform::Platform;
use serde::Deserialize;

/// Browser user agent sent with every request unless configured otherwise
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for the profile enricher
///
/// Every section is optional in the TOML file; missing keys fall back to
/// the defaults documented on each field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub platforms: PlatformsConfig,
    pub fetcher: FetcherConfig,
    pub photos: PhotosConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

/// Per-platform settings
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawPlatformsConfig")]
pub struct PlatformsConfig {
    pub leetcode: PlatformConfig,
    pub codeforces: PlatformConfig,
    pub github: PlatformConfig,
    pub linkedin: PlatformConfig,
}

impl PlatformsConfig {
    /// Returns the settings for one platform
    pub fn get(&self, platform: Platform) -> &PlatformConfig {
        match platform {
            Platform::LeetCode => &self.leetcode,
            Platform::Codeforces => &self.codeforces,
            Platform::GitHub => &self.github,
            Platform::LinkedIn => &self.linkedin,
        }
    }

    /// Returns mutable settings for one platform
    pub fn get_mut(&mut self, platform: Platform) -> &mut PlatformConfig {
        match platform {
            Platform::LeetCode => &mut self.leetcode,
            Platform::Codeforces => &mut self.codeforces,
            Platform::GitHub => &mut self.github,
            Platform::LinkedIn => &mut self.linkedin,
        }
    }
}

impl Default for PlatformsConfig {
    fn default() -> Self {
        RawPlatformsConfig::default().into()
    }
}

/// Rate limit and accepted domains for one platform
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Sustained requests per second
    pub rate_limit: f64,

    /// Token bucket capacity; defaults to twice the rate
    pub burst: Option<f64>,

    /// Hosts (and their subdomains) accepted for this platform
    pub domains: Vec<String>,
}

impl PlatformConfig {
    /// Default settings for a platform
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            rate_limit: platform.default_rate_limit(),
            burst: None,
            domains: platform.default_domains(),
        }
    }
}

// A partially specified table keeps the defaults of the platform it
// belongs to, so each table is read as options and merged afterwards.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPlatformsConfig {
    leetcode: RawPlatformConfig,
    codeforces: RawPlatformConfig,
    github: RawPlatformConfig,
    linkedin: RawPlatformConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPlatformConfig {
    #[serde(rename = "rate-limit")]
    rate_limit: Option<f64>,
    burst: Option<f64>,
    domains: Option<Vec<String>>,
}

impl RawPlatformConfig {
    fn resolve(self, platform: Platform) -> PlatformConfig {
        let defaults = PlatformConfig::for_platform(platform);
        PlatformConfig {
            rate_limit: self.rate_limit.unwrap_or(defaults.rate_limit),
            burst: self.burst,
            domains: self.domains.unwrap_or(defaults.domains),
        }
    }
}

impl From<RawPlatformsConfig> for PlatformsConfig {
    fn from(raw: RawPlatformsConfig) -> Self {
        Self {
            leetcode: raw.leetcode.resolve(Platform::LeetCode),
            codeforces: raw.codeforces.resolve(Platform::Codeforces),
            github: raw.github.resolve(Platform::GitHub),
            linkedin: raw.linkedin.resolve(Platform::LinkedIn),
        }
    }
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Retries after the first attempt for transient failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base of the exponential backoff, in seconds
    #[serde(rename = "backoff-factor")]
    pub backoff_factor: f64,

    /// User agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout: 15,
            max_retries: 2,
            backoff_factor: 2.0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// How LinkedIn profile pages are loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoEngine {
    /// Plain HTTP fetch; only sees what a logged-out client sees
    #[default]
    Http,

    /// Headless Chromium; requires the `browser` feature
    Browser,
}

/// Profile photo handling
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhotosConfig {
    /// Directory photos are written to
    pub directory: String,

    /// JPEG quality (1-100)
    pub quality: u8,

    /// Page loading engine
    pub engine: PhotoEngine,

    /// Run the browser engine without a window
    pub headless: bool,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            directory: "photos".to_string(),
            quality: 85,
            engine: PhotoEngine::Http,
            headless: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for the enriched sheet, the log sheet and the summary
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
        }
    }
}

/// Batch processing limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Rows scraped at the same time
    #[serde(rename = "max-concurrent-rows")]
    pub max_concurrent_rows: usize,

    /// Largest accepted input file
    #[serde(rename = "max-file-size-mb")]
    pub max_file_size_mb: u64,
}

impl BatchConfig {
    /// Largest accepted input file in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_rows: 1,
            max_file_size_mb: 10,
        }
    }
}
