//! Error types for the profile module.

use thiserror::Error;

/// Errors that can occur while resolving or mutating a profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// The requested sampler is not one of the known hardware targets.
    #[error("Unknown profile kind: {0}")]
    UnknownProfileKind(String),

    /// A profile would end up with an empty set, a zero value, or a default
    /// outside its allowed set.
    #[error("Invalid profile state: {reason}")]
    InvalidProfileState { reason: String },
}

impl ProfileError {
    /// Creates a new invalid profile state error.
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidProfileState {
            reason: reason.into(),
        }
    }
}
