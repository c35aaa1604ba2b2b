//! Testing utilities and test doubles.
//!
//! Mock implementations of the converter seams plus helpers that write real
//! WAV files, so batch and planner tests run against a temp directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use samplefit_core::testing::{fixtures, MockConverter};
//!
//! let dir = tempfile::TempDir::new()?;
//! let files = fixtures::write_wav_files(dir.path(), &["kick", "snare"], fixtures::pcm(2, 48000, 16), 480)?;
//!
//! let converter = MockConverter::new();
//! // Run a batch with it...
//! ```

mod mock_converter;
mod mock_resampler;

pub use mock_converter::{MockConverter, RecordedConversion};
pub use mock_resampler::FixedRateResampler;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use crate::audio_file::PcmFormat;

    /// Shorthand for a [`PcmFormat`].
    pub fn pcm(channel_count: u16, sample_rate: u32, bit_depth: u16) -> PcmFormat {
        PcmFormat {
            channel_count,
            sample_rate,
            bit_depth,
        }
    }

    /// Writes `frames` frames of a half-scale 440 Hz sine as integer PCM.
    /// Each channel is phase shifted so remixing is observable.
    pub fn write_test_wav(path: &Path, format: PcmFormat, frames: u32) -> Result<(), hound::Error> {
        let spec = hound::WavSpec {
            channels: format.channel_count,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bit_depth,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        let scale = f64::from(1u32 << (format.bit_depth - 1));
        let step = 2.0 * std::f64::consts::PI * 440.0 / f64::from(format.sample_rate);
        for n in 0..frames {
            for channel in 0..format.channel_count {
                let phase = f64::from(channel) * std::f64::consts::FRAC_PI_4;
                let value = 0.5 * (step * f64::from(n) + phase).sin();
                writer.write_sample((value * scale).round() as i32)?;
            }
        }
        writer.finalize()
    }

    /// Writes `<stem>.wav` below `dir` for every stem and returns the paths
    /// in the same order.
    pub fn write_wav_files(
        dir: &Path,
        stems: &[&str],
        format: PcmFormat,
        frames: u32,
    ) -> Result<Vec<PathBuf>, hound::Error> {
        stems
            .iter()
            .map(|stem| -> Result<PathBuf, hound::Error> {
                let path = dir.join(format!("{stem}.wav"));
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                write_test_wav(&path, format, frames)?;
                Ok(path)
            })
            .collect()
    }

    /// Writes an IEEE float WAV, which no profile accepts.
    pub fn write_float_wav(path: &Path, sample_rate: u32, frames: u32) -> Result<(), hound::Error> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for _ in 0..frames {
            writer.write_sample(0.25f32)?;
        }
        writer.finalize()
    }
}
