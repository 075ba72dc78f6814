// Fixed-window request limiter for the message-retrieval endpoints.
//
// The backend allows roughly one message request per five seconds per
// account. Rather than reacting to 429s, the client reserves a send
// slot up front and sleeps until that slot arrives.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tracing::debug;

/// Serializes calls so that successive acquisitions start at least one
/// `interval` apart.
///
/// Slot reservation happens under a brief mutex; the sleep happens
/// outside it, so concurrent callers queue up in reservation order
/// without holding the lock across an await.
#[derive(Debug)]
pub struct RequestLimiter {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestLimiter {
    /// A limiter permitting one acquisition per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// The configured window length.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the window permits the next request.
    ///
    /// The first acquisition returns immediately; each subsequent one
    /// is delayed so that request starts are spaced by `interval`.
    pub async fn acquire(&self) {
        let slot = {
            let mut next = self.next_slot.lock().expect("limiter lock poisoned");
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };

        let now = Instant::now();
        if slot > now {
            let wait_ms = u64::try_from((slot - now).as_millis()).unwrap_or(u64::MAX);
            debug!(wait_ms, "rate-limit window busy, sleeping");
        }
        sleep_until(slot).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_acquire_is_immediate() {
        let limiter = RequestLimiter::new(Duration::from_secs(5));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn second_acquire_waits_a_full_window() {
        let limiter = RequestLimiter::new(Duration::from_secs(5));
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(Instant::now() - start >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn acquisitions_are_spaced_by_interval() {
        let limiter = RequestLimiter::new(Duration::from_secs(5));
        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert!(Instant::now() - start >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_never_waits() {
        let limiter = RequestLimiter::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..10 {
            limiter.acquire().await;
        }
        assert_eq!(Instant::now(), start);
    }
}
