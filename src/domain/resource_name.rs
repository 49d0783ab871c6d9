//! ResourceName value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static PERSON_RESOURCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^people/[A-Za-z0-9_-]+$").expect("static regex is valid"));

/// A type-safe wrapper for person resource names (`people/<id>`).
///
/// This ensures that resource names are validated at construction time,
/// so a malformed record is rejected on import rather than reaching the
/// delete call.
///
/// # Example
///
/// ```
/// use contact_pruner::domain::ResourceName;
///
/// let name = ResourceName::new("people/c123").unwrap();
/// assert_eq!(name.as_str(), "people/c123");
/// assert_eq!(name.person_id(), "c123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName(String);

impl ResourceName {
    /// Create a new ResourceName, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyResourceName` for an empty string and
    /// `ValidationError::MalformedResourceName` for anything not of the form
    /// `people/<id>`.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyResourceName);
        }
        if !PERSON_RESOURCE.is_match(&name) {
            return Err(ValidationError::MalformedResourceName(name));
        }
        Ok(Self(name))
    }

    /// Get the resource name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id segment after `people/`.
    pub fn person_id(&self) -> &str {
        &self.0["people/".len()..]
    }
}

// Serde support - serialize as string
impl Serialize for ResourceName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for ResourceName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ResourceName::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
