//! Contact model representing a person record from the People API.

use crate::domain::ResourceName;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Phone number entry for a contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PhoneNumber {
    /// The phone number as entered
    #[serde(default)]
    pub value: String,

    /// Manual tag such as "mobile" or "work" (API field: type)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PhoneNumber {
    /// Create an unlabeled phone number.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    /// Create a phone number carrying a manual label.
    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    /// Whether the number was manually tagged with a non-blank label.
    pub fn has_label(&self) -> bool {
        self.label
            .as_deref()
            .map(|label| !label.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Person name entry (from API).
#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct NameEntry {
    display_name: Option<String>,
}

/// Membership entry (from API); only contact group memberships are of interest.
#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct MembershipEntry {
    contact_group_membership: Option<ContactGroupMembership>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ContactGroupMembership {
    contact_group_resource_name: String,
}

/// Custom deserializer taking the first display name from the API `names` array
fn deserialize_display_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<NameEntry> = Vec::deserialize(deserializer)?;
    Ok(entries.into_iter().find_map(|e| e.display_name))
}

/// Custom deserializer flattening API memberships into a set of group resource names
fn deserialize_memberships<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<MembershipEntry> = Vec::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|e| e.contact_group_membership)
        .map(|m| m.contact_group_resource_name)
        .filter(|name| !name.is_empty())
        .collect())
}

/// A contact record subject to retention classification.
///
/// Deserializes directly from a People API `Person` resource. A missing or
/// malformed `resourceName` is a hard deserialization error.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique identifier of the person (`people/<id>`)
    pub resource_name: ResourceName,

    /// First display name, for log output only
    #[serde(default, rename = "names", deserialize_with = "deserialize_display_name")]
    pub display_name: Option<String>,

    /// Phone numbers in API order
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,

    /// Contact group resource names this person belongs to
    #[serde(
        default,
        rename = "memberships",
        deserialize_with = "deserialize_memberships"
    )]
    pub group_memberships: BTreeSet<String>,
}

impl Contact {
    /// Create a contact with no phone numbers and no memberships.
    pub fn new(resource_name: ResourceName) -> Self {
        Self {
            resource_name,
            display_name: None,
            phone_numbers: Vec::new(),
            group_memberships: BTreeSet::new(),
        }
    }

    /// Add a phone number, keeping insertion order.
    pub fn with_phone(mut self, phone: PhoneNumber) -> Self {
        self.phone_numbers.push(phone);
        self
    }

    /// Add a contact group membership.
    pub fn with_membership(mut self, group: impl Into<String>) -> Self {
        self.group_memberships.insert(group.into());
        self
    }

    /// Whether this contact belongs to the given contact group.
    pub fn is_member_of(&self, group_resource_name: &str) -> bool {
        self.group_memberships.contains(group_resource_name)
    }

    /// Name suitable for logs: display name if present, else resource name.
    pub fn label_for_logs(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.resource_name.as_str())
    }
}
