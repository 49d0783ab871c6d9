use crate::client::{ConnectionsPage, ContactGroupsPage};
use crate::domain::ResourceName;
use crate::error::PeopleApiResult;

/// Repository for the remote address book.
///
/// Provides abstraction over the People API so the pipeline can run against
/// the real client or an in-memory mock. Each method is exactly one remote
/// call; pacing and retries are applied by the caller.
pub trait ContactRepository {
    /// Fetch one page of contact groups.
    fn list_groups(&self, page_token: Option<&str>) -> PeopleApiResult<ContactGroupsPage>;

    /// Fetch one page of contacts.
    fn list_contacts(&self, page_token: Option<&str>) -> PeopleApiResult<ConnectionsPage>;

    /// Permanently delete a contact.
    fn delete(&self, resource_name: &ResourceName) -> PeopleApiResult<()>;
}

impl<R: ContactRepository + ?Sized> ContactRepository for &R {
    fn list_groups(&self, page_token: Option<&str>) -> PeopleApiResult<ContactGroupsPage> {
        (**self).list_groups(page_token)
    }

    fn list_contacts(&self, page_token: Option<&str>) -> PeopleApiResult<ConnectionsPage> {
        (**self).list_contacts(page_token)
    }

    fn delete(&self, resource_name: &ResourceName) -> PeopleApiResult<()> {
        (**self).delete(resource_name)
    }
}
