//! Exponential-backoff retry for transient remote failures.
//!
//! The schedule is a pure function of the retry number, so the geometry can
//! be checked without sleeping; [`Retrier`] only applies it.

use super::clock::{Clock, SystemClock};
use super::outcome::CallOutcome;
use crate::error::PeopleApiError;
use std::time::Duration;

/// Retry limits and backoff geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first one
    pub max_retries: u32,

    /// Delay before the first retry
    pub base_delay: Duration,

    /// Factor applied to the delay for each further retry
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_secs(2),
            multiplier: 2,
        }
    }
}

/// What to do after a retryable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    /// Sleep `delay`, then make retry number `retry` (1-indexed).
    Retry { retry: u32, delay: Duration },

    /// Retries are exhausted.
    GiveUp,
}

impl RetryPolicy {
    /// Delay before retry `retry` (1-indexed): `base * multiplier^(retry-1)`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Decide the next step given how many retries have already been made.
    pub fn next_step(&self, retries_made: u32) -> RetryStep {
        if retries_made >= self.max_retries {
            return RetryStep::GiveUp;
        }
        let retry = retries_made + 1;
        RetryStep::Retry {
            retry,
            delay: self.delay_for(retry),
        }
    }

    /// The full delay sequence if every attempt fails.
    pub fn schedule(&self) -> Vec<Duration> {
        (1..=self.max_retries).map(|n| self.delay_for(n)).collect()
    }
}

/// A value produced by a retried operation, plus the attempts it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retried<T> {
    pub value: T,
    pub attempts: u32,
}

impl<T> Retried<T> {
    /// Retries made beyond the first attempt.
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}

/// Applies a [`RetryPolicy`], blocking on its clock between attempts.
#[derive(Debug, Clone)]
pub struct Retrier<C: Clock = SystemClock> {
    policy: RetryPolicy,
    clock: C,
}

impl<C: Clock> Retrier<C> {
    pub fn with_clock(policy: RetryPolicy, clock: C) -> Self {
        Self { policy, clock }
    }

    /// Run `op` until it returns a non-retryable outcome or retries run out.
    ///
    /// When retries are exhausted the last retryable outcome is returned as
    /// the final result.
    pub fn attempt(&self, op: impl FnMut() -> CallOutcome) -> Retried<CallOutcome> {
        self.run(op, CallOutcome::is_retryable)
    }

    /// Run a fallible API call under the same policy, returning its value or
    /// the last error.
    pub fn call<T>(
        &self,
        op: impl FnMut() -> Result<T, PeopleApiError>,
    ) -> Retried<Result<T, PeopleApiError>> {
        self.run(op, |result| CallOutcome::from_result(result).is_retryable())
    }

    fn run<T>(&self, mut op: impl FnMut() -> T, is_retryable: impl Fn(&T) -> bool) -> Retried<T> {
        let mut attempts = 0;
        loop {
            let value = op();
            attempts += 1;

            if !is_retryable(&value) {
                return Retried { value, attempts };
            }

            match self.policy.next_step(attempts - 1) {
                RetryStep::Retry { retry, delay } => {
                    tracing::warn!(
                        retry,
                        max_retries = self.policy.max_retries,
                        delay_secs = delay.as_secs_f64(),
                        "Transient failure, retrying after backoff"
                    );
                    self.clock.sleep(delay);
                }
                RetryStep::GiveUp => {
                    tracing::warn!(attempts, "Retries exhausted");
                    return Retried { value, attempts };
                }
            }
        }
    }
}
