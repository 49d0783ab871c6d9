//! Application service layer.
//!
//! Services orchestrate the classifier, the paced executor and the
//! repository. They provide a clean boundary between the binary and the
//! data access layer.

mod cleanup_service;
mod contact_source;

pub use cleanup_service::{plan, CleanupPipeline, DeleteFailure, RunSummary};
pub use contact_source::{ensure_unique, load_contacts_from_file, ContactSource};
