//! Rate limiting between provider calls.
//!
//! The provider enforces implicit rate limits, so the per-item stages pause
//! between calls. Pacing is a strategy behind the [`Pacer`] trait rather than
//! inline sleeps at call sites, which keeps the stages testable and leaves
//! room for concurrency later without touching them.

use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::io::config::{OnboardConfig, PacingKind};

/// Blocking pause applied after every per-item provider call.
pub trait Pacer {
    fn pause(&mut self);
}

/// Fixed delay after every call.
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Pacer for FixedDelayPacer {
    fn pause(&mut self) {
        trace!(delay_ms = self.delay.as_millis() as u64, "pacing");
        thread::sleep(self.delay);
    }
}

/// Token bucket: bursts up to `capacity` calls, then refills steadily.
pub struct TokenBucketPacer {
    capacity: f64,
    refill_per_sec: f64,
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucketPacer {
    pub fn new(capacity: u32, refill_per_sec: f64) -> Self {
        Self {
            capacity: f64::from(capacity.max(1)),
            refill_per_sec: refill_per_sec.max(f64::MIN_POSITIVE),
            tokens: f64::from(capacity.max(1)),
            last_refill: Instant::now(),
        }
    }

    /// Consume one token, returning how long the caller must wait first.
    ///
    /// Separated from the sleep so the arithmetic is testable with injected
    /// clock readings.
    fn next_wait(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_refill);
        self.tokens =
            (self.tokens + elapsed.as_secs_f64() * self.refill_per_sec).min(self.capacity);
        self.last_refill = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            return Duration::ZERO;
        }
        let deficit = 1.0 - self.tokens;
        self.tokens = 0.0;
        // Extreme refill rates can push the quotient past Duration's range.
        Duration::try_from_secs_f64(deficit / self.refill_per_sec).unwrap_or(Duration::MAX)
    }
}

impl Pacer for TokenBucketPacer {
    fn pause(&mut self) {
        let wait = self.next_wait(Instant::now());
        if !wait.is_zero() {
            trace!(wait_ms = wait.as_millis() as u64, "token bucket empty, waiting");
            thread::sleep(wait);
        }
    }
}

/// Build the configured pacing strategy.
pub fn pacer_from_config(cfg: &OnboardConfig) -> Box<dyn Pacer> {
    match cfg.pacing {
        PacingKind::FixedDelay => Box::new(FixedDelayPacer::new(Duration::from_millis(
            cfg.item_delay_ms,
        ))),
        PacingKind::TokenBucket => Box::new(TokenBucketPacer::new(
            cfg.token_bucket_capacity,
            cfg.token_bucket_refill_per_sec,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_allows_burst_up_to_capacity() {
        let mut pacer = TokenBucketPacer::new(3, 1.0);
        let now = Instant::now();
        assert_eq!(pacer.next_wait(now), Duration::ZERO);
        assert_eq!(pacer.next_wait(now), Duration::ZERO);
        assert_eq!(pacer.next_wait(now), Duration::ZERO);
    }

    #[test]
    fn empty_bucket_waits_for_refill() {
        let mut pacer = TokenBucketPacer::new(1, 2.0);
        let now = Instant::now();
        assert_eq!(pacer.next_wait(now), Duration::ZERO);
        // Refill rate 2/s, so a full token is half a second away.
        let wait = pacer.next_wait(now);
        assert!(wait > Duration::from_millis(490) && wait <= Duration::from_millis(510));
    }

    #[test]
    fn elapsed_time_refills_tokens() {
        let mut pacer = TokenBucketPacer::new(1, 1.0);
        let start = Instant::now();
        assert_eq!(pacer.next_wait(start), Duration::ZERO);
        let later = start + Duration::from_secs(2);
        assert_eq!(pacer.next_wait(later), Duration::ZERO);
    }

    #[test]
    fn tiny_refill_rate_saturates_instead_of_panicking() {
        let mut pacer = TokenBucketPacer::new(1, f64::MIN_POSITIVE);
        let now = Instant::now();
        assert_eq!(pacer.next_wait(now), Duration::ZERO);
        assert_eq!(pacer.next_wait(now), Duration::MAX);
    }

    #[test]
    fn refill_never_exceeds_capacity() {
        let mut pacer = TokenBucketPacer::new(2, 10.0);
        let start = Instant::now();
        let later = start + Duration::from_secs(60);
        assert_eq!(pacer.next_wait(later), Duration::ZERO);
        assert_eq!(pacer.next_wait(later), Duration::ZERO);
        // Only capacity (2) tokens were available despite the long idle.
        assert!(pacer.next_wait(later) > Duration::ZERO);
    }
}
