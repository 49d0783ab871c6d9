//! Basic metrics instrumentation for a cleanup run.
//!
//! Provides counters and duration tracking for HTTP requests, retries,
//! pacing and deletion outcomes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the API client and the pipeline.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of contacts fetched
    contacts_fetched_total: Arc<AtomicU64>,

    /// Number of contacts removed (deleted or already absent)
    contacts_deleted_total: Arc<AtomicU64>,

    /// Number of contacts whose deletion failed
    delete_failures_total: Arc<AtomicU64>,

    /// Retries made after transient failures
    retries_total: Arc<AtomicU64>,

    /// Time spent in rate-limit pacing waits, in milliseconds
    pacing_wait_total_ms: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            contacts_fetched_total: Arc::new(AtomicU64::new(0)),
            contacts_deleted_total: Arc::new(AtomicU64::new(0)),
            delete_failures_total: Arc::new(AtomicU64::new(0)),
            retries_total: Arc::new(AtomicU64::new(0)),
            pacing_wait_total_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record contacts fetched.
    pub fn record_contacts_fetched(&self, count: usize) {
        self.contacts_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record a contact removed remotely.
    pub fn record_contact_deleted(&self) {
        self.contacts_deleted_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a contact whose deletion failed.
    pub fn record_delete_failure(&self) {
        self.delete_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record retries made for one call.
    pub fn record_retries(&self, count: u32) {
        self.retries_total
            .fetch_add(u64::from(count), Ordering::Relaxed);
    }

    /// Record time spent waiting for the rate limiter.
    pub fn record_pacing_wait(&self, wait: Duration) {
        self.pacing_wait_total_ms
            .fetch_add(wait.as_millis() as u64, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get total contacts fetched.
    pub fn contacts_fetched_total(&self) -> u64 {
        self.contacts_fetched_total.load(Ordering::Relaxed)
    }

    /// Get total contacts removed.
    pub fn contacts_deleted_total(&self) -> u64 {
        self.contacts_deleted_total.load(Ordering::Relaxed)
    }

    /// Get total failed deletions.
    pub fn delete_failures_total(&self) -> u64 {
        self.delete_failures_total.load(Ordering::Relaxed)
    }

    /// Get total retries.
    pub fn retries_total(&self) -> u64 {
        self.retries_total.load(Ordering::Relaxed)
    }

    /// Get total pacing wait in milliseconds.
    pub fn pacing_wait_total_ms(&self) -> u64 {
        self.pacing_wait_total_ms.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            contacts_fetched_total: self.contacts_fetched_total(),
            contacts_deleted_total: self.contacts_deleted_total(),
            delete_failures_total: self.delete_failures_total(),
            retries_total: self.retries_total(),
            pacing_wait_total_ms: self.pacing_wait_total_ms(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub contacts_fetched_total: u64,
    pub contacts_deleted_total: u64,
    pub delete_failures_total: u64,
    pub retries_total: u64,
    pub pacing_wait_total_ms: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}
