//! Input contact set assembly.
//!
//! Contacts come either from the People API, restricted to members of one
//! label, or from a JSON export of person records. Either way the result is
//! a finite list with unique resource names, in source order.

use crate::error::{SourceError, SourceResult};
use crate::models::{Contact, ContactGroup};
use crate::repositories::ContactRepository;
use crate::resilience::{Clock, PacedExecutor};
use std::collections::HashSet;
use std::path::Path;

/// Fetches contacts through a repository, pacing and retrying every page.
pub struct ContactSource<'a, R: ContactRepository, C: Clock + Clone> {
    repo: &'a R,
    executor: &'a mut PacedExecutor<C>,
}

impl<'a, R: ContactRepository, C: Clock + Clone> ContactSource<'a, R, C> {
    pub fn new(repo: &'a R, executor: &'a mut PacedExecutor<C>) -> Self {
        Self { repo, executor }
    }

    /// Resolve a label name to its contact group.
    pub fn find_group(&mut self, label: &str) -> SourceResult<ContactGroup> {
        let repo = self.repo;
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .executor
                .call(|| repo.list_groups(page_token.as_deref()))
                .value?;

            if let Some(group) = page.contact_groups.into_iter().find(|g| g.is_named(label)) {
                tracing::debug!("Label {} resolved to {}", label, group.resource_name);
                return Ok(group);
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => return Err(SourceError::LabelNotFound(label.to_string())),
            }
        }
    }

    /// All contacts that are members of the group carrying `label`.
    pub fn fetch_labeled(&mut self, label: &str) -> SourceResult<Vec<Contact>> {
        let group = self.find_group(label)?;
        let repo = self.repo;
        let mut contacts = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .executor
                .call(|| repo.list_contacts(page_token.as_deref()))
                .value?;

            let fetched = page.connections.len();
            contacts.extend(
                page.connections
                    .into_iter()
                    .filter(|c| c.is_member_of(&group.resource_name)),
            );
            tracing::debug!(
                "Fetched page of {} contacts, {} labeled so far",
                fetched,
                contacts.len()
            );

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::info!("Found {} contacts labeled {}", contacts.len(), label);
        ensure_unique(contacts)
    }
}

/// Read contacts from a JSON file holding an array of person records.
pub fn load_contacts_from_file(path: &Path) -> SourceResult<Vec<Contact>> {
    let display = path.display().to_string();
    let data = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: display.clone(),
        source,
    })?;
    let contacts: Vec<Contact> =
        serde_json::from_str(&data).map_err(|source| SourceError::InvalidInput {
            path: display,
            source,
        })?;
    ensure_unique(contacts)
}

/// Reject inputs where a resource name repeats.
pub fn ensure_unique(contacts: Vec<Contact>) -> SourceResult<Vec<Contact>> {
    let mut seen = HashSet::with_capacity(contacts.len());
    for contact in &contacts {
        if !seen.insert(contact.resource_name.as_str()) {
            return Err(SourceError::DuplicateResourceName(
                contact.resource_name.to_string(),
            ));
        }
    }
    Ok(contacts)
}
