//! Batch runner integration tests.
//!
//! These tests drive the runner with a mock converter over real WAV headers:
//! - Circuit breaker stops the remaining files
//! - Matching files are left alone unless convert-all is set
//! - Earlier successes survive an abort

use std::path::PathBuf;

use tempfile::TempDir;

use samplefit_core::{
    batch::{BatchConfig, BatchRunner, FailureStage, SkipReason},
    profile::Profile,
    testing::{
        fixtures::{pcm, write_wav_files},
        MockConverter,
    },
};

fn twelve_files(dir: &TempDir) -> Vec<PathBuf> {
    let stems: Vec<String> = (1..=12).map(|n| format!("hit{n:02}")).collect();
    let stems: Vec<&str> = stems.iter().map(String::as_str).collect();
    write_wav_files(dir.path(), &stems, pcm(2, 48000, 16), 32).unwrap()
}

#[test]
fn test_breaker_trips_on_second_late_failure() {
    let dir = TempDir::new().unwrap();
    let files = twelve_files(&dir);

    let converter = MockConverter::new();
    converter.fail_on(&files[9]);
    converter.fail_on(&files[10]);
    let runner = BatchRunner::new(
        BatchConfig::default().with_failure_threshold(0.10),
        converter,
    );

    let report = runner.run(&files, &Profile::octatrack());

    assert!(report.aborted);
    assert_eq!(report.converted.len(), 9);
    assert_eq!(report.failed, vec![files[9].clone(), files[10].clone()]);
    assert!(report
        .errors
        .iter()
        .all(|failure| failure.stage == FailureStage::Convert));

    // The 12th file is neither converted nor failed.
    let last = &files[11];
    assert!(!runner.converter().was_converted(last));
    assert!(report.converted.iter().all(|c| &c.source != last));
    assert!(!report.failed.contains(last));
    assert_eq!(report.summary().not_attempted, 1);
}

#[test]
fn test_single_late_failure_under_threshold_completes() {
    let dir = TempDir::new().unwrap();
    let files = twelve_files(&dir);

    let converter = MockConverter::new();
    converter.fail_on(&files[9]);
    let runner = BatchRunner::new(
        BatchConfig::default().with_failure_threshold(0.10),
        converter,
    );

    let report = runner.run(&files, &Profile::octatrack());
    assert!(!report.aborted);
    assert_eq!(report.converted.len(), 11);
    assert_eq!(report.failed.len(), 1);
}

#[test]
fn test_default_threshold_aborts_on_first_failure() {
    let dir = TempDir::new().unwrap();
    let files = twelve_files(&dir);

    let converter = MockConverter::new();
    converter.fail_on(&files[0]);
    let runner = BatchRunner::new(BatchConfig::default(), converter);

    let report = runner.run(&files, &Profile::rample());
    assert!(report.aborted);
    assert!(report.converted.is_empty());
    assert_eq!(runner.converter().conversion_count(), 1);
}

#[test]
fn test_matching_files_skipped_then_converted_with_convert_all() {
    let dir = TempDir::new().unwrap();
    let files =
        write_wav_files(dir.path(), &["ready", "tail"], pcm(1, 48000, 16), 32).unwrap();
    let profile = Profile::hyperion();

    let runner = BatchRunner::new(BatchConfig::default(), MockConverter::new());
    let report = runner.run(&files, &profile);
    assert!(report.converted.is_empty());
    assert!(report.failed.is_empty());
    assert_eq!(report.skipped.len(), 2);
    assert!(report
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::AlreadyMatching));

    let runner = BatchRunner::new(
        BatchConfig::default().with_convert_all(true),
        MockConverter::new(),
    );
    let report = runner.run(&files, &profile);
    assert_eq!(report.converted.len(), 2);
    assert_eq!(runner.converter().conversion_count(), 2);
}

#[test]
fn test_tagged_outputs_are_not_reconverted() {
    let dir = TempDir::new().unwrap();
    let files = write_wav_files(
        dir.path(),
        &["pad", "pad_octa"],
        pcm(2, 48000, 16),
        32,
    )
    .unwrap();

    let runner = BatchRunner::new(BatchConfig::default(), MockConverter::new());
    let report = runner.run(&files, &Profile::octatrack());
    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.converted[0].output, dir.path().join("pad_octa.wav"));
    assert_eq!(report.skipped[0].path, files[1]);
    assert_eq!(report.skipped[0].reason, SkipReason::AlreadyTagged);
}
