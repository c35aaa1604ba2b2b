//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::audio_file::PcmFormat;

/// Decoded audio, one normalised `f64` plane per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f64>>,
}

impl PcmBuffer {
    pub fn new(sample_rate: u32, channels: Vec<Vec<f64>>) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// A buffer of `channels` empty planes.
    pub fn empty(sample_rate: u32, channels: usize) -> Self {
        Self::new(sample_rate, vec![Vec::new(); channels])
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Source file path.
    pub input_path: PathBuf,
    /// Output file path.
    pub output_path: PathBuf,
    /// Format read from the source.
    pub source_format: PcmFormat,
    /// Format written to the output.
    pub target_format: PcmFormat,
    /// Frames written per channel.
    pub frames_written: u64,
    /// Whether the sample rate changed.
    pub resampled: bool,
    /// Whether the channel layout changed.
    pub remixed: bool,
    /// Conversion duration in milliseconds.
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_dimensions() {
        let buffer = PcmBuffer::new(44100, vec![vec![0.0; 10], vec![0.5; 10]]);
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frames(), 10);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = PcmBuffer::empty(48000, 2);
        assert_eq!(buffer.channel_count(), 2);
        assert!(buffer.is_empty());
        assert_eq!(PcmBuffer::empty(48000, 0).frames(), 0);
    }
}
