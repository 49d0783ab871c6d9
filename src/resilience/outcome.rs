//! Outcome of a single remote call, bucketed for retry decisions.

use crate::error::PeopleApiError;
use std::fmt;

/// How far a fatal failure reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalScope {
    /// Only this call's target is affected; later calls may succeed.
    Contact,

    /// No further call in this session can succeed (auth, network).
    Session,
}

/// Result of one remote call attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Success,

    /// Target already absent. Treated as the desired end state.
    NotFound,

    /// Provider throttled the call.
    RateLimited,

    /// Provider was temporarily unable to serve the call.
    TransientServerError,

    /// Not worth retrying.
    Fatal { detail: String, scope: FatalScope },
}

impl CallOutcome {
    /// Bucket a call result.
    pub fn from_result<T>(result: &Result<T, PeopleApiError>) -> Self {
        match result {
            Ok(_) => CallOutcome::Success,
            Err(err) => Self::from_error(err),
        }
    }

    /// Bucket a People API error.
    pub fn from_error(err: &PeopleApiError) -> Self {
        match err {
            PeopleApiError::NotFound(_) => CallOutcome::NotFound,
            PeopleApiError::RateLimitExceeded => CallOutcome::RateLimited,
            PeopleApiError::ServiceUnavailable(_) | PeopleApiError::Timeout => {
                CallOutcome::TransientServerError
            }
            PeopleApiError::Unauthorized
            | PeopleApiError::Forbidden(_)
            | PeopleApiError::ConnectionFailed(_) => CallOutcome::Fatal {
                detail: err.to_string(),
                scope: FatalScope::Session,
            },
            _ => CallOutcome::Fatal {
                detail: err.to_string(),
                scope: FatalScope::Contact,
            },
        }
    }

    /// Throttling or transient unavailability.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CallOutcome::RateLimited | CallOutcome::TransientServerError
        )
    }

    /// The target no longer exists remotely.
    pub fn is_removal(&self) -> bool {
        matches!(self, CallOutcome::Success | CallOutcome::NotFound)
    }

    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            CallOutcome::Fatal {
                scope: FatalScope::Session,
                ..
            }
        )
    }
}

impl fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallOutcome::Success => write!(f, "success"),
            CallOutcome::NotFound => write!(f, "not found"),
            CallOutcome::RateLimited => write!(f, "rate limited"),
            CallOutcome::TransientServerError => write!(f, "transient server error"),
            CallOutcome::Fatal { detail, .. } => write!(f, "{}", detail),
        }
    }
}
