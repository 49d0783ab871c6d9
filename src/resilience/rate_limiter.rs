//! Minimum-spacing pacer for remote calls.
//!
//! Unlike a token bucket this never allows bursts: each call starts no
//! sooner than `min_interval` after the previous call completed.

use super::clock::{Clock, SystemClock};
use crate::metrics::Metrics;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

/// Paces calls to at most `max_calls_per_minute`.
///
/// One instance must own the whole call path it paces; separate instances do
/// not coordinate with each other.
#[derive(Debug)]
pub struct RateLimiter<C: Clock = SystemClock> {
    min_interval: Duration,
    last_call: Option<Instant>,
    total_wait: Duration,
    clock: C,
    metrics: Option<Metrics>,
}

impl RateLimiter<SystemClock> {
    /// Create a limiter on the wall clock.
    pub fn per_minute(max_calls_per_minute: NonZeroU32) -> Self {
        Self::with_clock(max_calls_per_minute, SystemClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    /// Create a limiter on an explicit clock.
    pub fn with_clock(max_calls_per_minute: NonZeroU32, clock: C) -> Self {
        Self {
            min_interval: Duration::from_secs(60) / max_calls_per_minute.get(),
            last_call: None,
            total_wait: Duration::ZERO,
            clock,
            metrics: None,
        }
    }

    /// Also report pacing waits to `metrics`.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Required spacing between calls.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Cumulative time spent waiting for the interval to elapse.
    pub fn total_wait(&self) -> Duration {
        self.total_wait
    }

    /// How long a call issued now would have to wait.
    pub fn pending_wait(&self) -> Duration {
        match self.last_call {
            Some(last) => {
                let elapsed = self.clock.now().saturating_duration_since(last);
                self.min_interval.saturating_sub(elapsed)
            }
            None => Duration::ZERO,
        }
    }

    /// Run `op` once the minimum interval since the last completed call has
    /// passed. The completion time is recorded whatever `op` returns.
    pub fn call<T>(&mut self, op: impl FnOnce() -> T) -> T {
        let wait = self.pending_wait();
        if !wait.is_zero() {
            tracing::trace!(wait_ms = wait.as_millis() as u64, "Pacing remote call");
            self.clock.sleep(wait);
            self.total_wait += wait;
            if let Some(metrics) = &self.metrics {
                metrics.record_pacing_wait(wait);
            }
        }

        let result = op();
        self.last_call = Some(self.clock.now());
        result
    }
}
