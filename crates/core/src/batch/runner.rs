//! Sequential batch runner with a failure-ratio circuit breaker.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::converter::Converter;
use crate::discover::find_target_files;
use crate::planner::{plan, PlanOptions, PlanOutcome};
use crate::profile::Profile;

use super::config::BatchConfig;
use super::error::BatchError;
use super::types::{
    BatchReport, ConvertedFile, FailureStage, FileFailure, SkipReason, SkippedFile,
};

/// Whether the failure ratio over all attempts so far exceeds `threshold`.
///
/// Skipped files are not attempts. With no attempts the breaker stays closed.
pub fn should_abort(failures: usize, successes: usize, threshold: f64) -> bool {
    let attempts = failures + successes;
    if attempts == 0 {
        return false;
    }
    failures as f64 / attempts as f64 > threshold
}

enum FileOutcome {
    Converted(ConvertedFile),
    Skipped(SkippedFile),
}

/// Plans and converts files one at a time.
pub struct BatchRunner<C: Converter> {
    config: BatchConfig,
    converter: C,
}

impl<C: Converter> BatchRunner<C> {
    pub fn new(config: BatchConfig, converter: C) -> Self {
        Self { config, converter }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Discovers every file below `dir` accepted by `profile` and runs them.
    ///
    /// `dir` becomes the input root for this run unless one is configured.
    pub fn run_dir(&self, dir: &Path, profile: &Profile) -> Result<BatchReport, BatchError> {
        let files = find_target_files(dir, profile)?;
        let mut options = self.config.plan.clone();
        if options.input_dir.is_none() {
            options.input_dir = Some(dir.to_path_buf());
        }
        Ok(self.run_with_options(&files, profile, &options))
    }

    /// Runs `files` in order. Per-file errors are recorded, never returned.
    pub fn run(&self, files: &[PathBuf], profile: &Profile) -> BatchReport {
        self.run_with_options(files, profile, &self.config.plan)
    }

    fn run_with_options(
        &self,
        files: &[PathBuf],
        profile: &Profile,
        options: &PlanOptions,
    ) -> BatchReport {
        let mut report = BatchReport::new(profile.name(), files.len(), self.config.dry_run);
        info!(
            profile = %profile.name(),
            files = files.len(),
            converter = self.converter.name(),
            dry_run = self.config.dry_run,
            "Starting batch"
        );

        for path in files {
            match self.process_file(path, profile, options) {
                Ok(FileOutcome::Converted(file)) => report.converted.push(file),
                Ok(FileOutcome::Skipped(file)) => {
                    debug!(path = %file.path.display(), reason = ?file.reason, "Skipped");
                    report.skipped.push(file);
                }
                Err(failure) => {
                    warn!(
                        path = %failure.path.display(),
                        stage = %failure.stage,
                        error = %failure.error,
                        "File failed"
                    );
                    report.record_failure(failure);

                    if should_abort(
                        report.failed.len(),
                        report.converted.len(),
                        self.config.failure_threshold,
                    ) {
                        warn!(
                            failed = report.failed.len(),
                            converted = report.converted.len(),
                            threshold = self.config.failure_threshold,
                            "Failure threshold exceeded, aborting batch"
                        );
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        report.finish();
        info!(summary = %report.summary(), "Batch finished");
        report
    }

    fn process_file(
        &self,
        path: &Path,
        profile: &Profile,
        options: &PlanOptions,
    ) -> Result<FileOutcome, FileFailure> {
        let outcome = plan(path, profile, options)
            .map_err(|e| FileFailure::new(path, FailureStage::Plan, e))?;
        let conversion = match outcome {
            PlanOutcome::Ready(conversion) => conversion,
            PlanOutcome::AlreadyTagged { path, .. } => {
                return Ok(FileOutcome::Skipped(SkippedFile {
                    path,
                    reason: SkipReason::AlreadyTagged,
                }));
            }
        };

        let needs_conversion = conversion
            .needs_conversion()
            .map_err(|e| FileFailure::new(path, FailureStage::Plan, e))?;
        if !needs_conversion && !self.config.convert_all {
            return Ok(FileOutcome::Skipped(SkippedFile {
                path: path.to_path_buf(),
                reason: SkipReason::AlreadyMatching,
            }));
        }

        let file = ConvertedFile {
            source: path.to_path_buf(),
            output: conversion.descriptor.output_path.clone(),
            source_format: conversion.existing.format(),
            target_format: conversion.descriptor.format(),
        };
        if self.config.dry_run {
            return Ok(FileOutcome::Converted(file));
        }

        self.converter
            .convert(&conversion.existing, &conversion.target)
            .map_err(|e| FileFailure::new(path, FailureStage::Convert, e))?;
        Ok(FileOutcome::Converted(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{pcm, write_wav_files};
    use crate::testing::MockConverter;
    use tempfile::TempDir;

    #[test]
    fn test_should_abort_uses_attempts() {
        assert!(!should_abort(0, 0, 0.05));
        assert!(!should_abort(0, 10, 0.05));
        assert!(should_abort(1, 0, 0.05));
        assert!(!should_abort(1, 9, 0.10));
        assert!(should_abort(2, 9, 0.10));
        assert!(!should_abort(1, 1, 0.5));
        assert!(!should_abort(3, 0, 1.0));
    }

    #[test]
    fn test_run_converts_mismatching_files() {
        let dir = TempDir::new().unwrap();
        let files = write_wav_files(dir.path(), &["kick", "snare"], pcm(2, 48000, 16), 64).unwrap();
        let runner = BatchRunner::new(BatchConfig::default(), MockConverter::new());

        let report = runner.run(&files, &Profile::rample());
        assert_eq!(report.converted.len(), 2);
        assert_eq!(report.converted[0].output, dir.path().join("kick_rample.wav"));
        assert_eq!(report.converted[0].target_format, pcm(1, 44100, 16));
        assert!(!report.aborted);
        assert_eq!(runner.converter().conversion_count(), 2);
        assert!(report.finished_at.is_some());
    }

    #[test]
    fn test_run_skips_matching_unless_convert_all() {
        let dir = TempDir::new().unwrap();
        let files = write_wav_files(dir.path(), &["hit"], pcm(1, 44100, 16), 64).unwrap();

        let runner = BatchRunner::new(BatchConfig::default(), MockConverter::new());
        let report = runner.run(&files, &Profile::rample());
        assert_eq!(report.skipped[0].reason, SkipReason::AlreadyMatching);
        assert!(report.converted.is_empty());
        assert!(report.failed.is_empty());
        assert_eq!(runner.converter().conversion_count(), 0);

        let runner = BatchRunner::new(
            BatchConfig::default().with_convert_all(true),
            MockConverter::new(),
        );
        let report = runner.run(&files, &Profile::rample());
        assert_eq!(report.converted.len(), 1);
        assert_eq!(runner.converter().conversion_count(), 1);
    }

    #[test]
    fn test_run_skips_already_tagged() {
        let dir = TempDir::new().unwrap();
        let files = write_wav_files(dir.path(), &["loop_octa"], pcm(2, 48000, 16), 64).unwrap();
        let runner = BatchRunner::new(BatchConfig::default(), MockConverter::new());
        let report = runner.run(&files, &Profile::octatrack());
        assert_eq!(report.skipped[0].reason, SkipReason::AlreadyTagged);
        assert_eq!(runner.converter().conversion_count(), 0);
    }

    #[test]
    fn test_dry_run_never_calls_converter() {
        let dir = TempDir::new().unwrap();
        let files = write_wav_files(dir.path(), &["a", "b"], pcm(2, 48000, 16), 64).unwrap();
        let runner = BatchRunner::new(BatchConfig::default().with_dry_run(true), MockConverter::new());
        let report = runner.run(&files, &Profile::hyperion());
        assert!(report.dry_run);
        assert_eq!(report.converted.len(), 2);
        assert_eq!(runner.converter().conversion_count(), 0);
    }

    #[test]
    fn test_plan_failure_is_recorded() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.wav");
        let runner = BatchRunner::new(
            BatchConfig::default().with_failure_threshold(1.0),
            MockConverter::new(),
        );
        let report = runner.run(&[missing.clone()], &Profile::octatrack());
        assert_eq!(report.failed, vec![missing]);
        assert_eq!(report.errors[0].stage, FailureStage::Plan);
        assert!(!report.aborted);
    }

    #[test]
    fn test_run_dir_sets_input_root() {
        let dir = TempDir::new().unwrap();
        write_wav_files(dir.path(), &["drums/kick"], pcm(2, 48000, 16), 64).unwrap();
        let out = dir.path().join("out");

        let mut config = BatchConfig::default();
        config.plan.output_dir = Some(out.clone());
        let runner = BatchRunner::new(config, MockConverter::new());
        let report = runner.run_dir(dir.path(), &Profile::rample()).unwrap();
        assert_eq!(report.converted[0].output, out.join("drums/kick_rample.wav"));
        assert!(runner.config().plan.input_dir.is_none());
    }

    #[test]
    fn test_run_dir_twice_with_different_roots() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_wav_files(first.path(), &["x"], pcm(2, 48000, 16), 64).unwrap();
        write_wav_files(second.path(), &["y"], pcm(2, 48000, 16), 64).unwrap();
        let out = TempDir::new().unwrap();

        let mut config = BatchConfig::default();
        config.plan.output_dir = Some(out.path().to_path_buf());
        let runner = BatchRunner::new(config, MockConverter::new());

        let report = runner.run_dir(first.path(), &Profile::rample()).unwrap();
        assert_eq!(report.converted[0].output, out.path().join("x_rample.wav"));
        assert!(report.errors.is_empty());

        let report = runner.run_dir(second.path(), &Profile::rample()).unwrap();
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.converted[0].output, out.path().join("y_rample.wav"));
        assert_eq!(runner.converter().conversion_count(), 2);
    }

    #[test]
    fn test_run_dir_missing_root() {
        let runner = BatchRunner::new(BatchConfig::default(), MockConverter::new());
        let err = runner
            .run_dir(Path::new("/nonexistent/samples"), &Profile::rample())
            .unwrap_err();
        assert!(matches!(err, BatchError::InputDirNotFound { .. }));
    }
}
