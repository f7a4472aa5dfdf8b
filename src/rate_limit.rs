//! Fixed-quota-per-window admission throttling.
//!
//! A [`RateLimiter`] grants a fixed number of runs per time window.
//! Callers acquire permits before running; once the window's quota is
//! exhausted, [`RateLimiter::acquire`] waits until the next refill. The
//! same instance is safe to share across tasks and threads.
//!
//! # Example
//!
//! ```rust,ignore
//! use callwrap::rate_limit::RateLimiter;
//!
//! // At most 5 runs per second.
//! let limiter = RateLimiter::of_rate(5);
//!
//! loop {
//!     limiter.acquire(1).await;
//!     do_the_work().await;
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Concurrency-safe throttle admitting a fixed quota per time window.
///
/// Permits are replenished by a background task once per window; the
/// task is stopped when the limiter is dropped. The limiter must be
/// created inside a Tokio runtime.
pub struct RateLimiter {
    quota: u32,
    period: Duration,
    permits: Arc<Semaphore>,
    refill: JoinHandle<()>,
}

impl RateLimiter {
    /// Limiter admitting `rate` runs per second.
    pub fn of_rate(rate: u32) -> Self {
        Self::of_rate_per(rate, Duration::from_secs(1))
    }

    /// Limiter admitting `rate` runs per `period`.
    ///
    /// Refills top the available permits back up to `rate`; unused
    /// windows do not accumulate extra burst capacity.
    pub fn of_rate_per(rate: u32, period: Duration) -> Self {
        let permits = Arc::new(Semaphore::new(rate as usize));
        let refill = tokio::spawn({
            let permits = Arc::clone(&permits);
            async move {
                let mut ticker = tokio::time::interval(period);
                // The first tick of an interval completes immediately.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    let missing = (rate as usize).saturating_sub(permits.available_permits());
                    if missing > 0 {
                        permits.add_permits(missing);
                    }
                }
            }
        });
        Self {
            quota: rate,
            period,
            permits,
            refill,
        }
    }

    /// Acquire `runs` permits, waiting for the next refill when the
    /// current window's quota is exhausted.
    pub async fn acquire(&self, runs: u32) {
        // The semaphore is owned by this limiter and never closed, so
        // acquisition cannot fail.
        if let Ok(acquired) = self.permits.acquire_many(runs).await {
            acquired.forget();
        }
    }

    /// Acquire `runs` permits without waiting. Returns false when the
    /// current window cannot admit them.
    pub fn try_acquire(&self, runs: u32) -> bool {
        match self.permits.try_acquire_many(runs) {
            Ok(acquired) => {
                acquired.forget();
                true
            }
            Err(_) => false,
        }
    }

    /// Runs admitted per window.
    pub fn quota(&self) -> u32 {
        self.quota
    }

    /// Length of one window.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.refill.abort();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_quota_is_admitted_immediately() {
        let limiter = RateLimiter::of_rate_per(5, Duration::from_secs(60));
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire(1).await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_exhausted_window_blocks_until_refill() {
        let limiter = RateLimiter::of_rate_per(2, Duration::from_millis(100));
        limiter.acquire(2).await;

        let start = Instant::now();
        limiter.acquire(1).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_try_acquire_refuses_without_blocking() {
        let limiter = RateLimiter::of_rate_per(1, Duration::from_secs(60));
        assert!(limiter.try_acquire(1));
        assert!(!limiter.try_acquire(1));
    }

    #[tokio::test]
    async fn test_refill_does_not_accumulate_burst() {
        let limiter = RateLimiter::of_rate_per(2, Duration::from_millis(100));
        // Two idle windows must not grow the quota beyond 2.
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(limiter.try_acquire(2));
        assert!(!limiter.try_acquire(1));
    }

    #[tokio::test]
    async fn test_shared_across_tasks() {
        let limiter = Arc::new(RateLimiter::of_rate_per(4, Duration::from_secs(60)));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.acquire(1).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert!(!limiter.try_acquire(1));
    }
}
