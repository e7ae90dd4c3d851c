//! Per-platform request rate limiting
//!
//! Every platform gets its own token bucket so a slow site never throttles
//! a fast one. The buckets live for one enricher and are shared by every
//! row it processes.

mod token_bucket;

pub use token_bucket::{TokenBucket, POLL_INTERVAL};

use crate::config::PlatformsConfig;
use crate::platform::Platform;
use crate::LimiterError;
use std::collections::HashMap;

/// One token bucket per platform
#[derive(Debug)]
pub struct RateLimiterManager {
    buckets: HashMap<Platform, TokenBucket>,
}

impl RateLimiterManager {
    /// Creates buckets from the configured per-platform rates
    pub fn new(config: &PlatformsConfig) -> Self {
        let buckets = Platform::ALL
            .into_iter()
            .map(|platform| {
                let settings = config.get(platform);
                let bucket = match settings.burst {
                    Some(burst) => TokenBucket::with_capacity(settings.rate_limit, burst),
                    None => TokenBucket::new(settings.rate_limit),
                };
                tracing::debug!(
                    platform = platform.key(),
                    rate = bucket.rate(),
                    capacity = bucket.capacity(),
                    "Rate limiter configured"
                );
                (platform, bucket)
            })
            .collect();

        Self { buckets }
    }

    /// Waits for clearance to send one request to `platform`
    ///
    /// # Errors
    ///
    /// Returns [`LimiterError::ExceedsCapacity`] when the platform's bucket
    /// cannot hold a single token. No request may be sent in that case.
    pub async fn acquire(&self, platform: Platform) -> Result<(), LimiterError> {
        match self.buckets.get(&platform) {
            Some(bucket) => bucket.acquire(1.0).await,
            None => Ok(()),
        }
    }

    /// Takes one token for `platform` if available, without waiting
    pub fn try_acquire(&self, platform: Platform) -> bool {
        self.buckets
            .get(&platform)
            .map_or(true, |bucket| bucket.try_consume(1.0))
    }

    /// Returns the bucket of one platform
    pub fn bucket(&self, platform: Platform) -> Option<&TokenBucket> {
        self.buckets.get(&platform)
    }
}
