//! Pacing and retry for remote calls.
//!
//! Calls are composed as `Retrier(RateLimiter(call))`: every attempt,
//! retries included, goes through the limiter.

pub mod clock;
pub mod executor;
pub mod outcome;
pub mod rate_limiter;
pub mod retry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use executor::PacedExecutor;
pub use outcome::{CallOutcome, FatalScope};
pub use rate_limiter::RateLimiter;
pub use retry::{Retried, Retrier, RetryPolicy, RetryStep};
