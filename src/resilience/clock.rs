//! Time source used for pacing and backoff.
//!
//! Production code sleeps the calling thread; tests substitute
//! [`ManualClock`], which advances virtual time instead of blocking.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A monotonic time source that can block the caller.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Block the calling flow for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

#[derive(Debug)]
struct ManualState {
    now: Instant,
    sleeps: Vec<Duration>,
}

/// Deterministic clock for tests.
///
/// `sleep` advances virtual time and records the requested duration, so
/// pacing and backoff schedules can be asserted without waiting. Clones share
/// the same timeline.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                now: Instant::now(),
                sleeps: Vec::new(),
            })),
        }
    }

    /// Move virtual time forward without recording a sleep, e.g. to model
    /// time spent inside a remote call.
    pub fn advance(&self, duration: Duration) {
        if let Ok(mut state) = self.state.lock() {
            state.now += duration;
        }
    }

    /// Every duration passed to `sleep`, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state
            .lock()
            .map(|state| state.sleeps.clone())
            .unwrap_or_default()
    }

    /// Sum of all recorded sleeps.
    pub fn total_slept(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.state
            .lock()
            .map(|state| state.now)
            .unwrap_or_else(|poisoned| poisoned.into_inner().now)
    }

    fn sleep(&self, duration: Duration) {
        if let Ok(mut state) = self.state.lock() {
            state.now += duration;
            state.sleeps.push(duration);
        }
    }
}
