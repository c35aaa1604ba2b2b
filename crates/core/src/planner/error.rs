//! Error types for the planner module.

use std::path::PathBuf;
use thiserror::Error;

use crate::audio_file::AudioFileError;
use crate::profile::ProfileError;

/// Errors that can occur while planning a conversion.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The source or target handle could not be built or read.
    #[error(transparent)]
    AudioFile(#[from] AudioFileError),

    /// An override could not be applied to the profile.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The source is not below the configured input directory.
    #[error("{path} is not inside input directory {input_dir}")]
    OutsideInputDir { path: PathBuf, input_dir: PathBuf },

    /// A user override is malformed or out of range.
    #[error("Invalid override: {reason}")]
    InvalidOverride { reason: String },
}

impl PlanError {
    /// Creates a new invalid override error.
    pub fn invalid_override(reason: impl Into<String>) -> Self {
        Self::InvalidOverride {
            reason: reason.into(),
        }
    }
}
