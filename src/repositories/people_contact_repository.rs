use crate::client::{ConnectionsPage, ContactGroupsPage, PeopleClient};
use crate::domain::ResourceName;
use crate::error::PeopleApiResult;
use crate::repositories::traits::ContactRepository;

/// Contact repository implementation using the People API client.
///
/// This repository delegates all operations to the PeopleClient,
/// providing a clean abstraction layer between the pipeline and
/// the underlying HTTP client.
pub struct PeopleContactRepository {
    client: PeopleClient,
}

impl PeopleContactRepository {
    /// Create a new PeopleContactRepository with the given client.
    pub fn new(client: PeopleClient) -> Self {
        Self { client }
    }
}

impl ContactRepository for PeopleContactRepository {
    fn list_groups(&self, page_token: Option<&str>) -> PeopleApiResult<ContactGroupsPage> {
        self.client.list_contact_groups(page_token)
    }

    fn list_contacts(&self, page_token: Option<&str>) -> PeopleApiResult<ConnectionsPage> {
        self.client.list_connections(page_token)
    }

    fn delete(&self, resource_name: &ResourceName) -> PeopleApiResult<()> {
        self.client.delete_contact(resource_name)
    }
}
