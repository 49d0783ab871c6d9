//! Domain value objects and types.
//!
//! Type-safe wrappers that validate at construction time so invalid
//! identifiers cannot be represented in the system.

pub mod errors;
pub mod resource_name;

pub use errors::ValidationError;
pub use resource_name::ResourceName;
