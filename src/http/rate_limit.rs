//! Rate limiting implementation
//!
//! Uses the governor crate for token bucket rate limiting. The token
//! bucket replaces a naive inter-request sleep: the observable contract
//! (at most `rps` outbound requests per second) is the same, and the
//! bucket stays correct if the probe loop is ever parallelized.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for rate limiting
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per second; fractional values allowed
    pub requests_per_second: f64,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl RateLimiterConfig {
    /// Create a config from a requests-per-second budget.
    ///
    /// Returns None when `rps <= 0`, which disables limiting entirely.
    /// Discovery uses a burst of 1 so requests are evenly spaced.
    pub fn from_rps(rps: f64) -> Option<Self> {
        if rps > 0.0 {
            Some(Self {
                requests_per_second: rps,
                burst_size: 1,
            })
        } else {
            None
        }
    }

    /// The delay between two consecutive requests at this budget
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.requests_per_second)
    }
}

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        let quota = Quota::with_period(config.period())
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::new(1).unwrap()))
            .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::new(1).unwrap()));

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a request can be made (blocks)
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Check if a request can be made immediately
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}
