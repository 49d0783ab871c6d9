mod people_contact_repository;
mod traits;

pub use people_contact_repository::PeopleContactRepository;
pub use traits::ContactRepository;
