//! End-to-end conversion tests with the real WAV engine.
//!
//! Each test writes fixtures to a temp directory, runs the planner and the
//! engine, and reads the output header back from disk.

use std::path::Path;

use tempfile::TempDir;

use samplefit_core::{
    audio_file::{AudioFile, AudioFileError, PcmSubtype},
    batch::{BatchConfig, BatchRunner, FailureStage},
    converter::{ConverterConfig, ResamplerConfig, WavConverter},
    planner::{plan, PlanError, PlanOptions, PlanOverrides},
    profile::Profile,
    testing::fixtures::{pcm, write_float_wav, write_test_wav, write_wav_files},
};

fn converter() -> WavConverter {
    WavConverter::new(ConverterConfig::default().with_resampler(ResamplerConfig::fast()))
}

fn read_back(path: &Path) -> samplefit_core::AudioMetadata {
    let mut file = AudioFile::open(path, Profile::wave()).unwrap();
    file.refresh_from_disk().unwrap()
}

#[test]
fn test_tracker_conversion_reads_back_mono_24bit() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("name.wav");
    write_test_wav(&source, pcm(2, 44100, 16), 4410).unwrap();

    let runner = BatchRunner::new(BatchConfig::default(), converter());
    let report = runner.run_dir(dir.path(), &Profile::polyend_tracker()).unwrap();
    assert_eq!(report.converted.len(), 1);

    let output = dir.path().join("name_track.wav");
    assert_eq!(report.converted[0].output, output);
    let metadata = read_back(&output);
    assert_eq!(metadata.format(), pcm(1, 44100, 24));
    assert_eq!(metadata.subtype, PcmSubtype::Pcm24);
    assert_eq!(metadata.frames, 4410);

    // The source is untouched.
    assert_eq!(read_back(&source).format(), pcm(2, 44100, 16));
}

#[test]
fn test_rerun_skips_previous_outputs() {
    let dir = TempDir::new().unwrap();
    write_test_wav(&dir.path().join("kick.wav"), pcm(2, 48000, 24), 480).unwrap();
    let profile = Profile::rample();

    let runner = BatchRunner::new(BatchConfig::default(), converter());
    let first = runner.run_dir(dir.path(), &profile).unwrap();
    assert_eq!(first.converted.len(), 1);

    let second = runner.run_dir(dir.path(), &profile).unwrap();
    assert_eq!(second.converted.len(), 1);
    assert_eq!(second.skipped.len(), 1);
    assert_eq!(second.skipped[0].path, dir.path().join("kick_rample.wav"));
    assert_eq!(read_back(&dir.path().join("kick_rample.wav")).format(), pcm(1, 44100, 16));
}

#[test]
fn test_output_dir_mirrors_tree_and_resamples() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    let out = dir.path().join("out");
    write_wav_files(&input, &["drums/snare"], pcm(2, 96000, 32), 960).unwrap();

    let mut config = BatchConfig::default();
    config.plan.output_dir = Some(out.clone());
    let runner = BatchRunner::new(config, converter());
    let report = runner.run_dir(&input, &Profile::octatrack()).unwrap();
    assert!(report.failed.is_empty(), "{:?}", report.errors);

    let metadata = read_back(&out.join("drums/snare_octa.wav"));
    assert_eq!(metadata.format(), pcm(2, 44100, 24));
    assert_eq!(metadata.frames, 441);
}

#[test]
fn test_in_place_with_overrides() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("vox.wav");
    write_test_wav(&source, pcm(2, 44100, 24), 441).unwrap();

    let mut config = BatchConfig::default();
    config.plan.replace_in_place = true;
    config.plan.overrides = PlanOverrides {
        sample_rate: Some(22050),
        bit_depth: Some(16),
        force_mono: true,
    };
    let runner = BatchRunner::new(config, converter());
    let report = runner.run(&[source.clone()], &Profile::wave());
    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.converted[0].output, source);

    let metadata = read_back(&source);
    assert_eq!(metadata.format(), pcm(1, 22050, 16));
    assert!(!dir.path().join("vox.wav.partial").exists());
}

#[test]
fn test_aiff_rejected_before_io() {
    let profile = Profile::wave();
    let missing = Path::new("/nonexistent/loop.aiff");

    let err = AudioFile::open(missing, profile.clone()).unwrap_err();
    assert!(matches!(err, AudioFileError::ExtensionMismatch { .. }));

    let err = plan(missing, &profile, &PlanOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        PlanError::AudioFile(AudioFileError::ExtensionMismatch { .. })
    ));
}

#[test]
fn test_float_source_is_recorded_as_failure() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("float.wav");
    write_float_wav(&source, 48000, 64).unwrap();

    let runner = BatchRunner::new(
        BatchConfig::default().with_failure_threshold(1.0),
        converter(),
    );
    let report = runner.run(&[source.clone()], &Profile::octatrack());
    assert_eq!(report.failed, vec![source]);
    assert_eq!(report.errors[0].stage, FailureStage::Plan);
    assert!(report.errors[0].error.contains("FLOAT"));
    assert!(!dir.path().join("float_octa.wav").exists());
}

#[test]
fn test_truncated_source_is_reported_as_corrupt() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    let out = dir.path().join("out");
    let files = write_wav_files(&input, &["sub/cut"], pcm(2, 48000, 16), 4800).unwrap();

    let file = std::fs::OpenOptions::new().write(true).open(&files[0]).unwrap();
    let len = file.metadata().unwrap().len();
    file.set_len(len - 301).unwrap();
    drop(file);

    let mut config = BatchConfig::default();
    config.plan.output_dir = Some(out.clone());
    let runner = BatchRunner::new(config, converter());
    let report = runner.run_dir(&input, &Profile::rample()).unwrap();

    assert_eq!(report.failed, files);
    assert_eq!(report.errors[0].stage, FailureStage::Convert);
    assert!(report.errors[0].error.starts_with("Corrupt source file"), "{}", report.errors[0].error);
    assert!(!out.join("sub").exists());
}
