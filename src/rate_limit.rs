use std::cell::Cell;
use std::time::{Duration, Instant};

use tracing::debug;

/// Minimum spacing between two outbound requests of one client.
pub const RATE_LIMIT: Duration = Duration::from_millis(1100);

/// Enforces a minimum wall-clock interval between consecutive outbound calls.
///
/// The interval is measured call-to-call: [`RateLimiter::record`] stores the
/// instant the previous call *completed*, and [`RateLimiter::gate`] sleeps
/// until `interval` has elapsed since then.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last_request: Cell<Option<Instant>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        RateLimiter::new(RATE_LIMIT)
    }
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        RateLimiter {
            interval,
            last_request: Cell::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks the calling thread until the next call is allowed.
    pub fn gate(&self, label: &str) {
        if let Some(wait) = self.remaining_wait(Instant::now()) {
            debug!(
                "[{}] Waiting for {:.2} seconds to respect rate limit",
                label,
                wait.as_secs_f64()
            );
            std::thread::sleep(wait);
        }
    }

    /// Marks an outbound call as completed now.
    pub fn record(&self) {
        self.last_request.set(Some(Instant::now()));
    }

    /// Runs `call` between [`gate`](Self::gate) and [`record`](Self::record).
    /// The completion time is recorded whatever `call` returns.
    pub fn throttle<T>(&self, label: &str, call: impl FnOnce() -> T) -> T {
        self.gate(label);
        let out = call();
        self.record();
        out
    }

    fn remaining_wait(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request.get()?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.interval {
            Some(self.interval - elapsed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_is_not_delayed() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.remaining_wait(Instant::now()), None);
    }

    #[test]
    fn wait_is_measured_from_last_completion() {
        let limiter = RateLimiter::new(Duration::from_millis(1100));
        let last = Instant::now();
        limiter.last_request.set(Some(last));

        let wait = limiter
            .remaining_wait(last + Duration::from_millis(300))
            .unwrap();
        assert_eq!(wait, Duration::from_millis(800));
        assert_eq!(
            limiter.remaining_wait(last + Duration::from_millis(1100)),
            None
        );
    }

    #[test]
    fn consecutive_calls_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(150));
        let first = limiter.throttle("test", Instant::now);
        let second = limiter.throttle("test", Instant::now);
        assert!(second.duration_since(first) >= Duration::from_millis(150));
    }

    #[test]
    fn failed_calls_are_recorded() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        let res: Result<(), &str> = limiter.throttle("test", || Err("boom"));
        assert!(res.is_err());
        assert!(limiter.remaining_wait(Instant::now()).is_some());
    }
}
