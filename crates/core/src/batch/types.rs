//! Types for the batch module.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::audio_file::PcmFormat;

/// Stage a file failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Plan,
    Convert,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plan => write!(f, "plan"),
            Self::Convert => write!(f, "convert"),
        }
    }
}

/// Error captured for one failed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub stage: FailureStage,
    pub error: String,
}

impl FileFailure {
    pub fn new(path: impl Into<PathBuf>, stage: FailureStage, error: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            stage,
            error: error.to_string(),
        }
    }
}

/// Why a file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The name already carries the rename token.
    AlreadyTagged,
    /// The file already has the target format.
    AlreadyMatching,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// A file that was converted, or would be in a dry run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub source_format: PcmFormat,
    pub target_format: PcmFormat,
}

/// Append-only record of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub profile: String,
    pub total_files: usize,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub converted: Vec<ConvertedFile>,
    pub failed: Vec<PathBuf>,
    pub errors: Vec<FileFailure>,
    pub skipped: Vec<SkippedFile>,
    /// Set when the failure threshold stopped the run early.
    pub aborted: bool,
}

impl BatchReport {
    pub fn new(profile: impl Into<String>, total_files: usize, dry_run: bool) -> Self {
        Self {
            profile: profile.into(),
            total_files,
            dry_run,
            started_at: Utc::now(),
            finished_at: None,
            converted: Vec::new(),
            failed: Vec::new(),
            errors: Vec::new(),
            skipped: Vec::new(),
            aborted: false,
        }
    }

    pub(crate) fn record_failure(&mut self, failure: FileFailure) {
        self.failed.push(failure.path.clone());
        self.errors.push(failure);
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Files that were planned, converted, skipped or failed.
    pub fn processed(&self) -> usize {
        self.converted.len() + self.failed.len() + self.skipped.len()
    }

    /// Whether any file failed.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total: self.total_files,
            converted: self.converted.len(),
            failed: self.failed.len(),
            skipped: self.skipped.len(),
            not_attempted: self.total_files.saturating_sub(self.processed()),
            aborted: self.aborted,
            dry_run: self.dry_run,
        }
    }
}

/// Counts for the end-of-run summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub not_attempted: usize,
    pub aborted: bool,
    pub dry_run: bool,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "to convert" } else { "converted" };
        write!(
            f,
            "{} files: {} {}, {} failed, {} skipped",
            self.total, self.converted, verb, self.failed, self.skipped
        )?;
        if self.aborted {
            write!(
                f,
                " (aborted, {} not attempted)",
                self.not_attempted
            )?;
        }
        Ok(())
    }
}
