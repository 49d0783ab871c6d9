//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided resource name is empty.
    EmptyResourceName,

    /// The provided resource name is not of the form `people/<id>`.
    MalformedResourceName(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyResourceName => write!(f, "Resource name cannot be empty"),
            Self::MalformedResourceName(name) => {
                write!(f, "Malformed resource name: {}", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
