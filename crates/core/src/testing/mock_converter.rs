//! Mock converter for testing.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::audio_file::AudioFile;
use crate::converter::{ConversionResult, Converter, ConverterError};

/// A recorded conversion for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Whether the conversion succeeded.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Never touches the filesystem. Provides controllable behavior for testing:
/// - Track conversions for assertions
/// - Fail specific source paths
/// - Fail the next call with a given error
///
/// # Example
///
/// ```rust,ignore
/// use samplefit_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// converter.fail_on("/samples/broken.wav");
///
/// let report = BatchRunner::new(&converter, config).run(&files, &profile)?;
///
/// assert_eq!(converter.conversion_count(), files.len());
/// ```
#[derive(Debug, Default)]
pub struct MockConverter {
    conversions: RwLock<Vec<RecordedConversion>>,
    failing_paths: RwLock<HashSet<PathBuf>>,
    next_error: RwLock<Option<ConverterError>>,
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded conversions.
    pub fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the number of conversions attempted.
    pub fn conversion_count(&self) -> usize {
        self.conversions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether `path` was handed to the converter as a source.
    pub fn was_converted(&self, path: impl AsRef<Path>) -> bool {
        self.conversions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|c| c.input_path == path.as_ref())
    }

    /// Make every conversion of `path` fail.
    pub fn fail_on(&self, path: impl Into<PathBuf>) {
        self.failing_paths
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into());
    }

    /// Configure the next conversion to fail with the given error.
    pub fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Clear recorded conversions.
    pub fn clear_recorded(&self) {
        self.conversions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn take_error(&self, source: &Path) -> Option<ConverterError> {
        if let Some(err) = self
            .next_error
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            return Some(err);
        }
        self.failing_paths
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(source)
            .then(|| ConverterError::CorruptSource {
                path: source.to_path_buf(),
                reason: "mock failure".to_string(),
            })
    }

    fn record(&self, existing: &AudioFile, target: &AudioFile, success: bool) {
        self.conversions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedConversion {
                input_path: existing.path().to_path_buf(),
                output_path: target.path().to_path_buf(),
                success,
            });
    }
}

impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    fn convert(
        &self,
        existing: &AudioFile,
        target: &AudioFile,
    ) -> Result<ConversionResult, ConverterError> {
        if let Some(err) = self.take_error(existing.path()) {
            self.record(existing, target, false);
            return Err(err);
        }

        self.record(existing, target, true);
        Ok(ConversionResult {
            input_path: existing.path().to_path_buf(),
            output_path: target.path().to_path_buf(),
            source_format: existing.format(),
            target_format: target.format(),
            frames_written: 0,
            resampled: existing.sample_rate() != target.sample_rate(),
            remixed: existing.channel_count() != target.channel_count(),
            duration_ms: 0,
        })
    }
}
