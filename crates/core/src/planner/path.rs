//! Output path derivation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::PlanError;

/// Separator placed between the original stem and the rename token.
pub const TOKEN_SEPARATOR: &str = "_";

/// Inserts `separator + token` between the file stem and its extension.
///
/// `/samples/kick.wav` with token `octa` becomes `/samples/kick_octa.wav`.
/// When `skip_when_present` is set and the stem already ends with the
/// suffix, returns `None`: the file has already been converted and the
/// caller must skip it rather than fall back to the original path.
pub fn append_token_before_extension(
    path: &Path,
    token: &str,
    separator: &str,
    skip_when_present: bool,
) -> Option<PathBuf> {
    let suffix = format!("{separator}{token}");
    let stem = path.file_stem()?;
    if skip_when_present && stem.to_string_lossy().ends_with(&suffix) {
        return None;
    }

    let mut file_name = OsString::from(stem);
    file_name.push(&suffix);
    if let Some(extension) = path.extension() {
        file_name.push(".");
        file_name.push(extension);
    }
    Some(path.with_file_name(file_name))
}

/// Moves `path` from below `input_dir` to the same relative location below
/// `output_dir`.
pub fn rebase(path: &Path, input_dir: &Path, output_dir: &Path) -> Result<PathBuf, PlanError> {
    let relative = path
        .strip_prefix(input_dir)
        .map_err(|_| PlanError::OutsideInputDir {
            path: path.to_path_buf(),
            input_dir: input_dir.to_path_buf(),
        })?;
    Ok(output_dir.join(relative))
}
