//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

use crate::audio_file::AudioFileError;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Source file not found.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Source file is not a readable WAV container.
    #[error("Corrupt source file {path}: {reason}")]
    CorruptSource { path: PathBuf, reason: String },

    /// Source or target uses a sample encoding outside the PCM table.
    #[error("Unsupported subtype: {subtype}")]
    UnsupportedSubtype { subtype: String },

    /// The source handle was never refreshed from disk.
    #[error("Source {path} has not been refreshed from disk")]
    NotRefreshed { path: PathBuf },

    /// The resampler produced a different rate than the one requested.
    #[error("Resampler produced {achieved} Hz, requested {requested} Hz")]
    ResampleRateMismatch { requested: u32, achieved: u32 },

    /// The resampler could not be built or failed while processing.
    #[error("Resampling failed: {reason}")]
    ResampleFailed { reason: String },

    /// The destination could not be created or written.
    #[error("Cannot write destination: {path}")]
    UnwritableDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The WAV encoder rejected the data.
    #[error("Failed to encode {path}: {reason}")]
    EncodeFailed { path: PathBuf, reason: String },

    /// The target cannot be produced (e.g. zero channels).
    #[error("Invalid target: {reason}")]
    InvalidTarget { reason: String },

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates a new resample failed error.
    pub fn resample_failed(reason: impl Into<String>) -> Self {
        Self::ResampleFailed {
            reason: reason.into(),
        }
    }

    /// Creates a new invalid target error.
    pub fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }

    /// Creates a new unwritable destination error.
    pub fn unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnwritableDestination {
            path: path.into(),
            source,
        }
    }

    /// Whether this error points at a bug rather than bad input.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, Self::ResampleRateMismatch { .. })
    }
}

impl From<AudioFileError> for ConverterError {
    fn from(error: AudioFileError) -> Self {
        match error {
            AudioFileError::SourceNotFound { path } => Self::SourceNotFound { path },
            AudioFileError::CorruptSource { path, reason } => Self::CorruptSource { path, reason },
            AudioFileError::UnsupportedSubtype { subtype } => Self::UnsupportedSubtype { subtype },
            AudioFileError::NotRefreshed { path } => Self::NotRefreshed { path },
            AudioFileError::Io { source, .. } => Self::Io(source),
            other @ (AudioFileError::ExtensionMismatch { .. }
            | AudioFileError::InvalidProfileState(_)) => Self::invalid_target(other.to_string()),
        }
    }
}
