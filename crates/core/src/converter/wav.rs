//! WAV rewrite engine.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::audio_file::{AudioFile, PcmSubtype};

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::pcm;
use super::resampler::SincResampler;
use super::traits::{Converter, Resampler};
use super::types::{ConversionResult, PcmBuffer};

/// Decodes a WAV source, remixes, resamples and writes integer PCM.
pub struct WavConverter<R = SincResampler> {
    config: ConverterConfig,
    resampler: R,
}

impl WavConverter<SincResampler> {
    /// Creates a new converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        let resampler = SincResampler::new(config.resampler.clone());
        Self { config, resampler }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl<R: Resampler> WavConverter<R> {
    /// Creates a converter that resamples with `resampler`.
    pub fn with_resampler(config: ConverterConfig, resampler: R) -> Self {
        Self { config, resampler }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn partial_path(&self, destination: &Path) -> PathBuf {
        let mut file_name = destination
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        file_name.push(&self.config.partial_suffix);
        destination.with_file_name(file_name)
    }

    /// Ensures the destination directory exists.
    fn prepare_destination(&self, destination: &Path) -> Result<(), ConverterError> {
        let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        if parent.is_dir() {
            return Ok(());
        }
        if !self.config.create_missing_dirs {
            return Err(ConverterError::unwritable(
                destination,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                ),
            ));
        }
        debug!(directory = %parent.display(), "Creating output directory");
        fs::create_dir_all(parent).map_err(|e| ConverterError::unwritable(destination, e))
    }

    /// Writes to a sibling scratch file and renames it over the destination,
    /// so a failed write never leaves a truncated output behind.
    fn write_atomically(
        &self,
        destination: &Path,
        buffer: &PcmBuffer,
        bit_depth: u16,
    ) -> Result<u64, ConverterError> {
        let partial = self.partial_path(destination);
        let written = match pcm::encode(&partial, buffer, bit_depth) {
            Ok(frames) => frames,
            Err(e) => {
                let _ = fs::remove_file(&partial);
                return Err(e);
            }
        };
        if let Err(e) = fs::rename(&partial, destination) {
            warn!(
                partial = %partial.display(),
                destination = %destination.display(),
                error = %e,
                "Failed to move converted file into place"
            );
            let _ = fs::remove_file(&partial);
            return Err(ConverterError::unwritable(destination, e));
        }
        Ok(written)
    }
}

impl<R: Resampler> Converter for WavConverter<R> {
    fn name(&self) -> &str {
        "wav"
    }

    fn convert(
        &self,
        existing: &AudioFile,
        target: &AudioFile,
    ) -> Result<ConversionResult, ConverterError> {
        let start = Instant::now();

        if !existing.is_refreshed() {
            return Err(ConverterError::NotRefreshed {
                path: existing.path().to_path_buf(),
            });
        }
        let target_format = target.format();
        if target_format.channel_count == 0 {
            return Err(ConverterError::invalid_target("zero channels"));
        }
        PcmSubtype::from_bit_depth(target_format.bit_depth)?;

        let source_format = existing.format();
        let mut buffer = pcm::decode(existing.path())?;

        let remixed = buffer.channel_count() != usize::from(target_format.channel_count);
        if remixed {
            buffer = pcm::remix(&buffer, target_format.channel_count);
        }

        let resampled = buffer.sample_rate != target_format.sample_rate;
        if resampled {
            let requested = target_format.sample_rate;
            buffer = self.resampler.resample(&buffer, requested)?;
            if buffer.sample_rate != requested {
                return Err(ConverterError::ResampleRateMismatch {
                    requested,
                    achieved: buffer.sample_rate,
                });
            }
        }

        let destination = target.path();
        self.prepare_destination(destination)?;
        let frames_written = self.write_atomically(destination, &buffer, target_format.bit_depth)?;

        let result = ConversionResult {
            input_path: existing.path().to_path_buf(),
            output_path: destination.to_path_buf(),
            source_format,
            target_format,
            frames_written,
            resampled,
            remixed,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            input = %result.input_path.display(),
            output = %result.output_path.display(),
            from = %result.source_format,
            to = %result.target_format,
            duration_ms = result.duration_ms,
            "Converted file"
        );

        Ok(result)
    }
}
