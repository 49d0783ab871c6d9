//! Contact Pruner - rate-limited cleanup of bulk-imported Google contacts.
//!
//! Decides which contacts under an import label are worth keeping and
//! deletes the rest through the People API, pacing calls to stay under the
//! provider's rate limit and retrying transient failures.
//!
//! # Architecture
//!
//! - **classifier**: ordered chain of retention predicates
//! - **resilience**: clock, rate limiter, retry policy and their composition
//! - **services**: contact source and the cleanup pipeline
//! - **client**: HTTP client for the People API
//! - **repositories**: abstraction over the remote address book
//! - **models** / **domain**: contact records and validated identifiers
//! - **config** / **error** / **metrics**: ambient plumbing

pub mod classifier;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod resilience;
pub mod services;

pub use classifier::{Classification, Partition, RetentionClassifier};
pub use client::PeopleClient;
pub use config::Config;
pub use error::{ConfigError, PeopleApiError, SourceError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{Contact, ContactGroup, PhoneNumber};
pub use resilience::{CallOutcome, PacedExecutor, RateLimiter, Retrier, RetryPolicy};
pub use services::{CleanupPipeline, ContactSource, RunSummary};
