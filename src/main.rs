//! Contact Pruner - main entry point
//!
//! Deletes low-value contacts from a bulk import, keeping anything that was
//! touched by hand.

use anyhow::{bail, Result};
use clap::Parser;
use contact_pruner::repositories::PeopleContactRepository;
use contact_pruner::services::{load_contacts_from_file, plan};
use contact_pruner::{
    CleanupPipeline, Config, ContactSource, Metrics, PacedExecutor, Partition, PeopleClient,
    RetentionClassifier,
};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Remove bulk-imported contacts that carry no manual edits
#[derive(Parser, Debug)]
#[command(name = "contact-pruner", version, about)]
struct Cli {
    /// Label (contact group name) whose members are candidates for deletion
    #[arg(long, required_unless_present = "input")]
    label: Option<String>,

    /// Read candidates from a JSON array of person records instead of the API
    #[arg(long, conflicts_with = "label")]
    input: Option<PathBuf>,

    /// Classify and report only; delete nothing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Previewing a file needs no credentials
    if let (Some(path), true) = (&cli.input, cli.dry_run) {
        let partition = plan(&RetentionClassifier::default(), load_contacts_from_file(path)?);
        report_dry_run(&partition);
        return Ok(());
    }

    let metrics = Metrics::new();
    let client = PeopleClient::new(&config, metrics.clone())?;
    let executor = PacedExecutor::new(config.max_calls_per_minute, config.retry_policy())
        .with_metrics(metrics.clone());
    info!(
        "Pacing at {} calls/minute ({} ms apart), up to {} retries",
        config.max_calls_per_minute,
        executor.min_interval().as_millis(),
        config.max_retries
    );
    let mut pipeline = CleanupPipeline::new(
        PeopleContactRepository::new(client),
        RetentionClassifier::default(),
        executor,
        metrics.clone(),
    );

    let contacts = match (&cli.input, &cli.label) {
        (Some(path), _) => load_contacts_from_file(path)?,
        (None, Some(label)) => {
            let (repo, executor) = pipeline.source_parts();
            ContactSource::new(repo, executor).fetch_labeled(label)?
        }
        (None, None) => bail!("either --label or --input is required"),
    };

    if cli.dry_run {
        report_dry_run(&pipeline.plan(contacts));
        return Ok(());
    }

    let summary = pipeline.run(contacts);
    let stats = metrics.summary();

    info!(
        "Done: {} kept, {} deleted, {} failed ({} HTTP requests, {} retries, avg {:.0} ms, {:.1}s pacing)",
        summary.kept,
        summary.deleted,
        summary.failed,
        stats.http_requests_total,
        stats.retries_total,
        stats.http_duration_avg_ms,
        stats.pacing_wait_total_ms as f64 / 1000.0
    );
    for failure in &summary.failures {
        warn!(
            "Not deleted: {} after {} attempt(s): {}",
            failure.resource_name, failure.attempts, failure.detail
        );
    }

    if let Some(reason) = &summary.aborted {
        error!(
            "Run aborted with {} contacts unprocessed: {}",
            summary.unprocessed, reason
        );
        bail!("run aborted: {}", reason);
    }

    Ok(())
}

fn report_dry_run(partition: &Partition) {
    for contact in &partition.to_delete {
        info!(
            "Would delete {} ({})",
            contact.resource_name,
            contact.label_for_logs()
        );
    }
    info!(
        "Dry run: {} kept, {} would be deleted",
        partition.kept.len(),
        partition.to_delete.len()
    );
}
