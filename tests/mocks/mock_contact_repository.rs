use contact_pruner::client::{ConnectionsPage, ContactGroupsPage};
use contact_pruner::domain::ResourceName;
use contact_pruner::error::{PeopleApiError, PeopleApiResult};
use contact_pruner::models::{Contact, ContactGroup};
use contact_pruner::repositories::ContactRepository;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Scripted failure returned by the mock instead of performing a call.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    RateLimited,
    Unavailable,
    Unauthorized,
    BadRequest,
}

impl Fault {
    fn to_error(self, target: &str) -> PeopleApiError {
        match self {
            Fault::RateLimited => PeopleApiError::RateLimitExceeded,
            Fault::Unavailable => PeopleApiError::ServiceUnavailable(503),
            Fault::Unauthorized => PeopleApiError::Unauthorized,
            Fault::BadRequest => PeopleApiError::ApiError {
                status: 400,
                message: format!("Invalid resource name {}", target),
            },
        }
    }
}

/// Mock contact repository for testing.
///
/// Provides an in-memory address book with paged listing, tracks every
/// delete call in order, and can be scripted to fail specific calls.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactRepository {
    groups: Arc<Mutex<Vec<ContactGroup>>>,
    pages: Arc<Mutex<Vec<Vec<Contact>>>>,
    existing: Arc<Mutex<BTreeSet<String>>>,
    delete_faults: Arc<Mutex<HashMap<String, VecDeque<Fault>>>>,
    list_faults: Arc<Mutex<VecDeque<Fault>>>,
    delete_calls: Arc<Mutex<Vec<String>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contact group.
    pub fn add_group(&self, resource_name: &str, name: &str) {
        self.groups.lock().unwrap().push(ContactGroup {
            resource_name: resource_name.to_string(),
            name: name.to_string(),
            member_count: None,
        });
    }

    /// Add a page of contacts; they also become deletable.
    pub fn add_page(&self, contacts: Vec<Contact>) {
        let mut existing = self.existing.lock().unwrap();
        for contact in &contacts {
            existing.insert(contact.resource_name.to_string());
        }
        self.pages.lock().unwrap().push(contacts);
    }

    /// Make a resource name exist remotely without listing it.
    pub fn add_existing(&self, resource_name: &str) {
        self.existing
            .lock()
            .unwrap()
            .insert(resource_name.to_string());
    }

    /// Fail the next delete calls for `resource_name` with these faults, in order.
    pub fn fail_delete(&self, resource_name: &str, faults: &[Fault]) {
        self.delete_faults
            .lock()
            .unwrap()
            .entry(resource_name.to_string())
            .or_default()
            .extend(faults.iter().copied());
    }

    /// Fail the next list calls (groups or contacts) with these faults.
    pub fn fail_list(&self, faults: &[Fault]) {
        self.list_faults.lock().unwrap().extend(faults.iter().copied());
    }

    /// Resource names passed to `delete`, in call order (retries included).
    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }

    /// Whether the resource still exists.
    pub fn exists(&self, resource_name: &str) -> bool {
        self.existing.lock().unwrap().contains(resource_name)
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn next_list_fault(&self) -> Option<Fault> {
        self.list_faults.lock().unwrap().pop_front()
    }

    fn page_index(page_token: Option<&str>) -> usize {
        page_token.and_then(|t| t.parse().ok()).unwrap_or(0)
    }
}

impl ContactRepository for MockContactRepository {
    fn list_groups(&self, page_token: Option<&str>) -> PeopleApiResult<ContactGroupsPage> {
        self.track_call("list_groups");
        if let Some(fault) = self.next_list_fault() {
            return Err(fault.to_error("contactGroups"));
        }
        assert!(page_token.is_none(), "mock serves a single group page");

        Ok(ContactGroupsPage {
            contact_groups: self.groups.lock().unwrap().clone(),
            next_page_token: None,
        })
    }

    fn list_contacts(&self, page_token: Option<&str>) -> PeopleApiResult<ConnectionsPage> {
        self.track_call("list_contacts");
        if let Some(fault) = self.next_list_fault() {
            return Err(fault.to_error("people/me"));
        }

        let pages = self.pages.lock().unwrap();
        let index = Self::page_index(page_token);
        let connections = pages.get(index).cloned().unwrap_or_default();
        let next_page_token = if index + 1 < pages.len() {
            Some((index + 1).to_string())
        } else {
            None
        };

        Ok(ConnectionsPage {
            connections,
            next_page_token,
            total_people: None,
        })
    }

    fn delete(&self, resource_name: &ResourceName) -> PeopleApiResult<()> {
        self.track_call("delete");
        let name = resource_name.to_string();
        self.delete_calls.lock().unwrap().push(name.clone());

        let fault = self
            .delete_faults
            .lock()
            .unwrap()
            .get_mut(&name)
            .and_then(|faults| faults.pop_front());
        if let Some(fault) = fault {
            return Err(fault.to_error(&name));
        }

        if self.existing.lock().unwrap().remove(&name) {
            Ok(())
        } else {
            Err(PeopleApiError::NotFound(format!("{} not found", name)))
        }
    }
}
