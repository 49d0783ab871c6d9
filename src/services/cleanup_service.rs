//! Cleanup pipeline.
//!
//! Partitions the input with the retention classifier, then deletes the
//! delete-set one contact at a time, in input order, through the paced
//! executor. A per-contact failure is recorded and the run continues; a
//! session-fatal failure stops the run and returns what was done so far.

use crate::classifier::{Partition, RetentionClassifier};
use crate::domain::ResourceName;
use crate::metrics::Metrics;
use crate::models::Contact;
use crate::repositories::ContactRepository;
use crate::resilience::{CallOutcome, Clock, PacedExecutor, SystemClock};

/// A contact whose deletion did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub resource_name: ResourceName,
    pub detail: String,
    pub attempts: u32,
}

/// Counts for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Contacts retained by the classifier
    pub kept: usize,

    /// Contacts removed remotely (deleted or already absent)
    pub deleted: usize,

    /// Contacts whose deletion failed
    pub failed: usize,

    /// Delete-set members never attempted because the run was aborted
    pub unprocessed: usize,

    /// Per-contact failure details, in processing order
    pub failures: Vec<DeleteFailure>,

    /// Reason the run stopped early, if it did
    pub aborted: Option<String>,
}

impl RunSummary {
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Partition `contacts` and log the decision for each kept contact.
///
/// Needs no repository, so an offline dry run can use it without
/// credentials.
pub fn plan(classifier: &RetentionClassifier, contacts: Vec<Contact>) -> Partition {
    let partition = classifier.partition(contacts);
    for kept in &partition.kept {
        tracing::debug!(
            "Keeping {} ({}): {}",
            kept.contact.resource_name,
            kept.contact.label_for_logs(),
            kept.reason
        );
    }
    tracing::info!(
        "Classified {} contacts: {} kept, {} to delete",
        partition.len(),
        partition.kept.len(),
        partition.to_delete.len()
    );
    partition
}

/// Drives classification and paced deletion for one run.
pub struct CleanupPipeline<R: ContactRepository, C: Clock + Clone = SystemClock> {
    repo: R,
    classifier: RetentionClassifier,
    executor: PacedExecutor<C>,
    metrics: Metrics,
}

impl<R: ContactRepository, C: Clock + Clone> CleanupPipeline<R, C> {
    pub fn new(
        repo: R,
        classifier: RetentionClassifier,
        executor: PacedExecutor<C>,
        metrics: Metrics,
    ) -> Self {
        Self {
            repo,
            classifier,
            executor,
            metrics,
        }
    }

    /// Repository and executor, so a contact source can fetch input through
    /// the same rate limiter the deletions use.
    pub fn source_parts(&mut self) -> (&R, &mut PacedExecutor<C>) {
        (&self.repo, &mut self.executor)
    }

    /// Classify without touching the remote side.
    pub fn plan(&self, contacts: Vec<Contact>) -> Partition {
        plan(&self.classifier, contacts)
    }

    /// Classify `contacts` and delete everything not kept.
    pub fn run(&mut self, contacts: Vec<Contact>) -> RunSummary {
        let partition = self.plan(contacts);
        let mut summary = self.delete_all(&partition.to_delete);
        summary.kept = partition.kept.len();
        summary
    }

    /// Delete each contact in order. `kept` is left at zero.
    pub fn delete_all(&mut self, to_delete: &[Contact]) -> RunSummary {
        let mut summary = RunSummary::default();
        let total = to_delete.len();
        tracing::info!("Deleting {} contacts", total);

        for (index, contact) in to_delete.iter().enumerate() {
            let name = &contact.resource_name;
            tracing::info!("Deleting {} of {}: {}", index + 1, total, name);

            let repo = &self.repo;
            let result = self
                .executor
                .attempt(|| CallOutcome::from_result(&repo.delete(name)));
            self.metrics.record_retries(result.retries());

            match result.value {
                outcome if outcome.is_removal() => {
                    if outcome == CallOutcome::NotFound {
                        tracing::debug!("{} was already absent", name);
                    }
                    self.metrics.record_contact_deleted();
                    summary.deleted += 1;
                }
                outcome if outcome.is_session_fatal() => {
                    tracing::error!("Aborting run at {}: {}", name, outcome);
                    self.metrics.record_delete_failure();
                    summary.failed += 1;
                    summary.failures.push(DeleteFailure {
                        resource_name: name.clone(),
                        detail: outcome.to_string(),
                        attempts: result.attempts,
                    });
                    summary.unprocessed = total - index - 1;
                    summary.aborted = Some(outcome.to_string());
                    break;
                }
                outcome => {
                    tracing::error!(
                        "Failed to delete {} after {} attempt(s): {}",
                        name,
                        result.attempts,
                        outcome
                    );
                    self.metrics.record_delete_failure();
                    summary.failed += 1;
                    summary.failures.push(DeleteFailure {
                        resource_name: name.clone(),
                        detail: outcome.to_string(),
                        attempts: result.attempts,
                    });
                }
            }
        }

        tracing::info!(
            deleted = summary.deleted,
            failed = summary.failed,
            unprocessed = summary.unprocessed,
            pacing_wait_secs = self.executor.pacing_wait().as_secs_f64(),
            "Deletion finished"
        );
        summary
    }
}
