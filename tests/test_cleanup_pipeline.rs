//! Pipeline tests against the in-memory repository and a manual clock.

mod mocks;

use contact_pruner::domain::ResourceName;
use contact_pruner::resilience::{ManualClock, PacedExecutor, RetryPolicy};
use contact_pruner::services::{load_contacts_from_file, plan, CleanupPipeline};
use contact_pruner::{Config, Contact, Metrics, PeopleClient, PhoneNumber, RetentionClassifier};
use mocks::{Fault, MockContactRepository};
use std::num::NonZeroU32;
use std::time::Duration;

fn rate(calls: u32) -> NonZeroU32 {
    NonZeroU32::new(calls).unwrap()
}

fn contact(id: &str) -> Contact {
    Contact::new(ResourceName::new(format!("people/{}", id)).unwrap())
}

fn deletable(id: &str) -> Contact {
    contact(id)
        .with_phone(PhoneNumber::new("555-0000"))
        .with_membership("contactGroups/import")
}

fn keepable(id: &str) -> Contact {
    contact(id).with_phone(PhoneNumber::labeled("555-0001", "Mobile"))
}

fn pipeline(
    repo: &MockContactRepository,
    clock: &ManualClock,
    max_retries: u32,
) -> CleanupPipeline<MockContactRepository, ManualClock> {
    let policy = RetryPolicy {
        max_retries,
        base_delay: Duration::from_secs(2),
        multiplier: 2,
    };
    CleanupPipeline::new(
        repo.clone(),
        RetentionClassifier::default(),
        PacedExecutor::with_clock(rate(90), policy, clock.clone()),
        Metrics::new(),
    )
}

#[test]
fn test_run_deletes_only_unkept_contacts_in_order() {
    let repo = MockContactRepository::new();
    let contacts = vec![deletable("d1"), keepable("k1"), deletable("d2"), deletable("d3")];
    repo.add_page(contacts.clone());
    let clock = ManualClock::new();

    let summary = pipeline(&repo, &clock, 5).run(contacts);

    assert_eq!(summary.kept, 1);
    assert_eq!(summary.deleted, 3);
    assert_eq!(summary.failed, 0);
    assert!(summary.is_complete());
    assert_eq!(
        repo.delete_calls(),
        vec!["people/d1", "people/d2", "people/d3"]
    );
    assert!(repo.exists("people/k1"));
    assert!(!repo.exists("people/d2"));
}

#[test]
fn test_deletes_are_paced() {
    let repo = MockContactRepository::new();
    let contacts = vec![deletable("d1"), deletable("d2"), deletable("d3")];
    repo.add_page(contacts.clone());
    let clock = ManualClock::new();

    pipeline(&repo, &clock, 5).run(contacts);

    let interval = Duration::from_secs(60) / 90;
    assert_eq!(clock.sleeps(), vec![interval, interval]);
}

#[test]
fn test_not_found_counts_as_deleted() {
    let repo = MockContactRepository::new();
    let clock = ManualClock::new();
    // never added to the repository: the delete reports not found
    let contacts = vec![deletable("gone"), deletable("d1")];
    repo.add_existing("people/d1");

    let summary = pipeline(&repo, &clock, 5).run(contacts);

    assert_eq!(summary.deleted, 2);
    assert_eq!(summary.failed, 0);
    assert!(summary.is_complete());
}

#[test]
fn test_rerun_is_idempotent() {
    let repo = MockContactRepository::new();
    let contacts = vec![deletable("d1"), deletable("d2")];
    repo.add_page(contacts.clone());
    let clock = ManualClock::new();

    let first = pipeline(&repo, &clock, 5).run(contacts.clone());
    let second = pipeline(&repo, &clock, 5).run(contacts);

    assert_eq!(first.deleted, 2);
    assert_eq!(second.deleted, 2);
    assert_eq!(second.failed, 0);
}

#[test]
fn test_transient_failures_are_retried() {
    let repo = MockContactRepository::new();
    let contacts = vec![deletable("d1")];
    repo.add_page(contacts.clone());
    repo.fail_delete("people/d1", &[Fault::RateLimited, Fault::Unavailable]);
    let clock = ManualClock::new();
    let metrics = Metrics::new();
    let mut pipeline = CleanupPipeline::new(
        repo.clone(),
        RetentionClassifier::default(),
        PacedExecutor::with_clock(rate(90), RetryPolicy::default(), clock.clone()),
        metrics.clone(),
    );

    let summary = pipeline.run(contacts);

    assert_eq!(summary.deleted, 1);
    assert_eq!(repo.delete_calls().len(), 3);
    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(2), Duration::from_secs(4)]
    );
    assert_eq!(metrics.retries_total(), 2);
    assert_eq!(metrics.contacts_deleted_total(), 1);
}

#[test]
fn test_exhausted_retries_fail_contact_and_continue() {
    let repo = MockContactRepository::new();
    let contacts = vec![deletable("d1"), deletable("d2")];
    repo.add_page(contacts.clone());
    repo.fail_delete("people/d1", &[Fault::RateLimited; 4]);
    let clock = ManualClock::new();

    let summary = pipeline(&repo, &clock, 3).run(contacts);

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].resource_name.as_str(), "people/d1");
    assert_eq!(summary.failures[0].attempts, 4);
    assert_eq!(summary.failures[0].detail, "rate limited");
    assert!(summary.is_complete());
    assert!(repo.exists("people/d1"));
    assert!(!repo.exists("people/d2"));
}

#[test]
fn test_contact_fatal_is_recorded_and_run_continues() {
    let repo = MockContactRepository::new();
    let contacts = vec![deletable("d1"), deletable("d2")];
    repo.add_page(contacts.clone());
    repo.fail_delete("people/d1", &[Fault::BadRequest]);
    let clock = ManualClock::new();

    let summary = pipeline(&repo, &clock, 5).run(contacts);

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.failures[0].attempts, 1);
    assert!(summary.failures[0].detail.contains("400"));
    assert_eq!(repo.delete_calls(), vec!["people/d1", "people/d2"]);
}

#[test]
fn test_session_fatal_aborts_remaining_run() {
    let repo = MockContactRepository::new();
    let contacts = vec![deletable("d1"), deletable("d2"), deletable("d3"), keepable("k1")];
    repo.add_page(contacts.clone());
    repo.fail_delete("people/d2", &[Fault::Unauthorized]);
    let clock = ManualClock::new();

    let summary = pipeline(&repo, &clock, 5).run(contacts);

    assert_eq!(summary.kept, 1);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.unprocessed, 1);
    assert!(!summary.is_complete());
    assert_eq!(summary.aborted.as_deref(), Some("Authentication failed"));
    assert_eq!(repo.delete_calls(), vec!["people/d1", "people/d2"]);
    assert!(repo.exists("people/d3"));
}

#[test]
fn test_plan_makes_no_remote_calls() {
    let repo = MockContactRepository::new();
    let clock = ManualClock::new();
    let contacts = vec![deletable("d1"), keepable("k1")];

    let partition = pipeline(&repo, &clock, 5).plan(contacts);

    assert_eq!(partition.kept.len(), 1);
    assert_eq!(partition.kept[0].reason, "labeled phone number");
    assert_eq!(partition.to_delete.len(), 1);
    assert_eq!(repo.get_call_count("delete"), 0);
    assert!(clock.sleeps().is_empty());
}

#[test]
fn test_file_preview_without_credentials() {
    let path = std::env::temp_dir().join(format!("pruner-preview-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"[{"resourceName": "people/d1", "phoneNumbers": [{"value": "555-0000"}]},
            {"resourceName": "people/k1", "phoneNumbers": [{"value": "555-0001", "type": "work"}]}]"#,
    )
    .unwrap();

    let config = Config::default();
    assert!(config.access_token.is_none());
    assert!(PeopleClient::new(&config, Metrics::new()).is_err());

    let contacts = load_contacts_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    let partition = plan(&RetentionClassifier::default(), contacts);

    assert_eq!(partition.kept.len(), 1);
    assert_eq!(partition.kept[0].contact.resource_name.as_str(), "people/k1");
    assert_eq!(partition.to_delete.len(), 1);
    assert_eq!(partition.to_delete[0].resource_name.as_str(), "people/d1");
}

#[test]
fn test_empty_input() {
    let repo = MockContactRepository::new();
    let clock = ManualClock::new();

    let summary = pipeline(&repo, &clock, 5).run(Vec::new());

    assert_eq!(summary, Default::default());
}
