//! Admission gate bounding the number of in-flight fetches
//!
//! A thin wrapper over a counting semaphore. Admission is tracked with an
//! atomic gauge and a high-water mark so tests can verify the bound holds
//! under concurrent load.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Caps the number of concurrently in-flight fetches
///
/// `acquire` suspends the caller until fewer than `capacity` slots are held.
/// There is no acquire timeout: saturated callers wait indefinitely, bounded
/// only by the per-fetch deadline applied after admission. No ordering
/// guarantee is made across waiters.
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    in_flight: Arc<AtomicUsize>,
    high_water: Arc<AtomicUsize>,
    capacity: usize,
}

/// An admission slot held by one fetch
///
/// The slot is returned on drop, on every exit path.
pub struct AdmissionSlot {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for AdmissionSlot {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl RateLimiter {
    /// Creates a limiter admitting at most `capacity` holders at once
    pub fn new(capacity: u32) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity as usize)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            high_water: Arc::new(AtomicUsize::new(0)),
            capacity: capacity as usize,
        }
    }

    /// Waits for a slot and returns it
    pub async fn acquire(&self) -> AdmissionSlot {
        // The semaphore is never closed, so acquisition cannot fail
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore closed");

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(now, Ordering::SeqCst);

        AdmissionSlot {
            _permit: permit,
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Returns the number of slots currently held
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Returns the largest number of slots ever held simultaneously
    pub fn high_water_mark(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }

    /// Returns the admission limit
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_acquire_up_to_capacity() {
        let limiter = RateLimiter::new(2);

        let a = limiter.acquire().await;
        let b = limiter.acquire().await;

        assert_eq!(limiter.in_flight(), 2);
        assert_eq!(limiter.high_water_mark(), 2);

        drop(a);
        drop(b);
        assert_eq!(limiter.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_acquire_blocks_when_saturated() {
        let limiter = Arc::new(RateLimiter::new(1));

        let held = limiter.acquire().await;

        // A second acquire must not complete while the slot is held
        let contender = {
            let limiter = Arc::clone(&limiter);
            tokio::spawn(async move {
                let _slot = limiter.acquire().await;
            })
        };

        let blocked =
            tokio::time::timeout(Duration::from_millis(50), limiter.acquire()).await;
        assert!(blocked.is_err(), "acquire should block at capacity");

        drop(held);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should be admitted after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_slot_released_on_drop() {
        let limiter = RateLimiter::new(1);

        {
            let _slot = limiter.acquire().await;
            assert_eq!(limiter.in_flight(), 1);
        }

        assert_eq!(limiter.in_flight(), 0);
        // The slot is free again
        let _again = limiter.acquire().await;
    }

    #[tokio::test]
    async fn test_high_water_mark_tracks_peak() {
        let limiter = RateLimiter::new(3);

        let a = limiter.acquire().await;
        let b = limiter.acquire().await;
        drop(a);
        let c = limiter.acquire().await;

        assert_eq!(limiter.high_water_mark(), 2);
        drop(b);
        drop(c);
    }

    #[test]
    fn test_capacity() {
        let limiter = RateLimiter::new(7);
        assert_eq!(limiter.capacity(), 7);
    }
}
