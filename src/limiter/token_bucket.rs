use crate::LimiterError;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Interval between attempts while waiting for tokens
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Mutable part of a bucket, guarded by one lock
#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Token bucket rate limiter
///
/// Holds up to `capacity` permits and replenishes them at `rate` per second.
/// Refill and debit happen in one critical section, so concurrent callers
/// never observe a lost update.
#[derive(Debug)]
pub struct TokenBucket {
    rate: f64,
    capacity: f64,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Creates a full bucket with the default capacity of `2 × rate`
    ///
    /// The capacity is never below one token, otherwise a slow bucket
    /// could never grant a single request.
    pub fn new(rate: f64) -> Self {
        Self::with_capacity(rate, (rate * 2.0).max(1.0))
    }

    /// Creates a full bucket with an explicit capacity
    pub fn with_capacity(rate: f64, capacity: f64) -> Self {
        Self {
            rate,
            capacity,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Tokens added per second
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Maximum number of tokens held
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Attempts to take `n` tokens right now
    pub fn try_consume(&self, n: f64) -> bool {
        self.try_consume_at(n, Instant::now())
    }

    /// Attempts to take `n` tokens as of `now`
    ///
    /// # Arguments
    ///
    /// * `n` - Number of tokens to take
    /// * `now` - The current time instant
    ///
    /// # Returns
    ///
    /// * `true` - The tokens were debited
    /// * `false` - Not enough tokens; nothing was debited
    pub fn try_consume_at(&self, n: f64, now: Instant) -> bool {
        let mut state = self.lock_state();
        self.refill(&mut state, now);

        if state.tokens >= n {
            state.tokens -= n;
            true
        } else {
            false
        }
    }

    /// Waits until `n` tokens are available, then takes them
    ///
    /// Polls every [`POLL_INTERVAL`]. Only the calling task is suspended;
    /// other buckets are unaffected. Waiters are served in whatever order
    /// their polls land, with no fairness guarantee.
    ///
    /// # Errors
    ///
    /// Returns [`LimiterError::ExceedsCapacity`] if `n` can never fit in
    /// the bucket.
    pub async fn acquire(&self, n: f64) -> Result<(), LimiterError> {
        if n > self.capacity {
            return Err(LimiterError::ExceedsCapacity {
                requested: n,
                capacity: self.capacity,
            });
        }

        while !self.try_consume(n) {
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Ok(())
    }

    /// Returns the number of tokens available right now
    pub fn available(&self) -> f64 {
        self.available_at(Instant::now())
    }

    /// Returns the number of tokens available as of `now`, after refill
    pub fn available_at(&self, now: Instant) -> f64 {
        let mut state = self.lock_state();
        self.refill(&mut state, now);
        state.tokens
    }

    /// Adds `elapsed × rate` tokens, capped at capacity
    fn refill(&self, state: &mut BucketState, now: Instant) {
        // Instants older than the last refill add nothing
        let elapsed = now.saturating_duration_since(state.last_refill);
        state.tokens = (state.tokens + elapsed.as_secs_f64() * self.rate).min(self.capacity);
        if now > state.last_refill {
            state.last_refill = now;
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, BucketState> {
        // The state is two plain numbers; a panic elsewhere cannot leave it torn
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
