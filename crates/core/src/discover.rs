//! Recursive discovery of candidate files.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::batch::BatchError;
use crate::profile::Profile;

/// Walks `dir` recursively and returns every file whose extension `profile`
/// accepts, sorted by path.
pub fn find_target_files(dir: &Path, profile: &Profile) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::InputDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if entry.file_type().is_file() && profile.accepts_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "Discovered files");
    Ok(files)
}

fn walk_error(dir: &Path, error: walkdir::Error) -> BatchError {
    let path = error.path().unwrap_or(dir).to_path_buf();
    let message = error.to_string();
    let source = error
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    BatchError::unreadable(path, source)
}
