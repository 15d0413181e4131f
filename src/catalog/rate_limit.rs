//! Minimum-interval rate limiter for provider channels.
//!
//! MusicBrainz allows one request per second per client. One limiter is shared
//! by every search and lookup on the channel, so concurrent callers queue up
//! behind the mutex and go out spaced by at least `min_interval`.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// MusicBrainz' published limit
pub const MUSICBRAINZ_MIN_INTERVAL: Duration = Duration::from_millis(1000);

/// Enforces a minimum delay between request starts
#[derive(Debug)]
pub struct RateLimiter {
    /// Start of the most recent request. Held across the sleep so the
    /// check, wait and update happen as one step.
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a request may start, then claim the slot.
    ///
    /// The first call returns immediately. The timestamp is taken when the
    /// slot is claimed, so the interval is measured between request starts.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(MUSICBRAINZ_MIN_INTERVAL)
    }
}
