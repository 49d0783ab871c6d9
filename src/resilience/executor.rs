//! `Retry(RateLimited(call))` composition.

use super::clock::{Clock, SystemClock};
use super::outcome::CallOutcome;
use super::rate_limiter::RateLimiter;
use super::retry::{Retried, Retrier, RetryPolicy};
use crate::error::PeopleApiError;
use crate::metrics::Metrics;
use std::num::NonZeroU32;
use std::time::Duration;

/// Owns the single rate limiter for a run and the retry policy around it.
///
/// Every attempt made through the executor, including retries, is paced by
/// the same limiter.
#[derive(Debug)]
pub struct PacedExecutor<C: Clock + Clone = SystemClock> {
    limiter: RateLimiter<C>,
    retrier: Retrier<C>,
}

impl PacedExecutor<SystemClock> {
    pub fn new(max_calls_per_minute: NonZeroU32, policy: RetryPolicy) -> Self {
        Self::with_clock(max_calls_per_minute, policy, SystemClock)
    }
}

impl<C: Clock + Clone> PacedExecutor<C> {
    pub fn with_clock(max_calls_per_minute: NonZeroU32, policy: RetryPolicy, clock: C) -> Self {
        Self {
            limiter: RateLimiter::with_clock(max_calls_per_minute, clock.clone()),
            retrier: Retrier::with_clock(policy, clock),
        }
    }

    /// Report pacing waits to `metrics`.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.limiter = self.limiter.with_metrics(metrics);
        self
    }

    /// Run an outcome-producing call with pacing and retries.
    pub fn attempt(&mut self, mut op: impl FnMut() -> CallOutcome) -> Retried<CallOutcome> {
        let limiter = &mut self.limiter;
        self.retrier.attempt(|| limiter.call(&mut op))
    }

    /// Run a fallible API call with pacing and retries.
    pub fn call<T>(
        &mut self,
        mut op: impl FnMut() -> Result<T, PeopleApiError>,
    ) -> Retried<Result<T, PeopleApiError>> {
        let limiter = &mut self.limiter;
        self.retrier.call(|| limiter.call(&mut op))
    }

    /// Cumulative time spent in pacing waits.
    pub fn pacing_wait(&self) -> Duration {
        self.limiter.total_wait()
    }

    pub fn min_interval(&self) -> Duration {
        self.limiter.min_interval()
    }
}
