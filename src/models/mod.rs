//! Data models for People API entities.
//!
//! This module contains the contact and contact group structures the
//! classifier and pipeline operate on.

pub mod contact;
pub mod contact_group;

pub use contact::{Contact, PhoneNumber};
pub use contact_group::ContactGroup;
