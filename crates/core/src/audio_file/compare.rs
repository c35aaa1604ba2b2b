//! Format equality between audio files.
//!
//! Two handles are equal when their channel count, sample rate and bit depth
//! match. Path and content are ignored.

use super::error::AudioFileError;
use super::handle::AudioFile;

impl PartialEq for AudioFile {
    fn eq(&self, other: &Self) -> bool {
        self.format() == other.format()
    }
}

impl Eq for AudioFile {}

/// Whether `existing` has to be rewritten to become `target`.
///
/// `existing` must have been refreshed from disk; `target` is a planned state
/// and is compared as declared.
pub fn needs_conversion(existing: &AudioFile, target: &AudioFile) -> Result<bool, AudioFileError> {
    if !existing.is_refreshed() {
        return Err(AudioFileError::NotRefreshed {
            path: existing.path().to_path_buf(),
        });
    }
    Ok(existing != target)
}
