//! Contact group (label) model.

use serde::Deserialize;

/// A contact group as returned by `GET contactGroups`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactGroup {
    /// Group identifier (`contactGroups/<id>`)
    pub resource_name: String,

    /// User-visible label name
    #[serde(default)]
    pub name: String,

    /// Number of members, when the API reports it
    #[serde(default)]
    pub member_count: Option<u32>,
}

impl ContactGroup {
    /// Whether this group carries the given label name.
    pub fn is_named(&self, label: &str) -> bool {
        self.name == label
    }
}
