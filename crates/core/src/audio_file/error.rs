//! Error types for the audio file module.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::profile::ProfileError;

/// Errors that can occur while binding or reading an audio file.
#[derive(Debug, Error)]
pub enum AudioFileError {
    /// The path's extension is not accepted by the profile.
    #[error("Extension {extension:?} of {path} is not one of {allowed:?}")]
    ExtensionMismatch {
        path: PathBuf,
        extension: String,
        allowed: Vec<String>,
    },

    /// The container uses a sample encoding without a known PCM subtype tag.
    #[error("Unsupported subtype: {subtype}")]
    UnsupportedSubtype { subtype: String },

    /// Metadata was needed from a file that has not been refreshed from disk.
    #[error("Metadata for {path} has not been read from disk")]
    NotRefreshed { path: PathBuf },

    /// The file does not exist.
    #[error("Audio file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// The file exists but is not a readable WAV container.
    #[error("Corrupt audio file {path}: {reason}")]
    CorruptSource { path: PathBuf, reason: String },

    /// An instance value violates a profile constraint.
    #[error(transparent)]
    InvalidProfileState(#[from] ProfileError),

    /// I/O error while reading the file.
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AudioFileError {
    /// Creates an unsupported subtype error.
    pub fn unsupported_subtype(subtype: impl Into<String>) -> Self {
        Self::UnsupportedSubtype {
            subtype: subtype.into(),
        }
    }

    /// Translates a WAV decoder error for the given path.
    pub fn from_wav(path: &Path, error: hound::Error) -> Self {
        match error {
            hound::Error::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::SourceNotFound {
                    path: path.to_path_buf(),
                }
            }
            hound::Error::IoError(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Self::CorruptSource {
                    path: path.to_path_buf(),
                    reason: "unexpected end of file".to_string(),
                }
            }
            hound::Error::IoError(e) => Self::Io {
                path: path.to_path_buf(),
                source: e,
            },
            hound::Error::Unsupported => Self::unsupported_subtype("unknown WAVE encoding"),
            other => Self::CorruptSource {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}
