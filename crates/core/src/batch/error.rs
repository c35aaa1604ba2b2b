//! Error types for the batch module.

use std::path::PathBuf;
use thiserror::Error;

/// Setup-time failures. Per-file errors never surface here; the runner
/// records them in the report.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The input root does not exist or is not a directory.
    #[error("Input directory not found: {path}")]
    InputDirNotFound { path: PathBuf },

    /// The input root or one of its sub-directories cannot be listed.
    #[error("Cannot read input directory {path}: {source}")]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BatchError {
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputDirUnreadable {
            path: path.into(),
            source,
        }
    }
}
