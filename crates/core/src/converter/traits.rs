//! Trait definitions for the converter module.

use crate::audio_file::AudioFile;

use super::error::ConverterError;
use super::types::{ConversionResult, PcmBuffer};

/// Rewrites an existing audio file into the format of a target handle.
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Converts `existing` into the format described by `target` and writes
    /// it to `target.path()`.
    ///
    /// `existing` must have been refreshed from disk. `target` is never read.
    fn convert(
        &self,
        existing: &AudioFile,
        target: &AudioFile,
    ) -> Result<ConversionResult, ConverterError>;
}

/// Changes the sample rate of decoded audio.
pub trait Resampler: Send + Sync {
    fn name(&self) -> &str;

    /// Resamples every plane of `input` to `target_rate`.
    ///
    /// The returned buffer carries the rate actually achieved, which callers
    /// compare against `target_rate`.
    fn resample(&self, input: &PcmBuffer, target_rate: u32) -> Result<PcmBuffer, ConverterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Halving;

    impl Resampler for Halving {
        fn name(&self) -> &str {
            "halving"
        }

        fn resample(
            &self,
            input: &PcmBuffer,
            target_rate: u32,
        ) -> Result<PcmBuffer, ConverterError> {
            let channels = input
                .channels
                .iter()
                .map(|plane| plane.iter().step_by(2).copied().collect())
                .collect();
            Ok(PcmBuffer::new(target_rate, channels))
        }
    }

    #[test]
    fn test_resampler_trait_object() {
        let resampler: Box<dyn Resampler> = Box::new(Halving);
        let input = PcmBuffer::new(96000, vec![vec![0.0, 0.1, 0.2, 0.3]]);
        let output = resampler.resample(&input, 48000).unwrap();
        assert_eq!(resampler.name(), "halving");
        assert_eq!(output.sample_rate, 48000);
        assert_eq!(output.channels[0], vec![0.0, 0.2]);
    }
}
