//! Types for the audio file module.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::subtype::PcmSubtype;

/// The three values that decide whether two files are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PcmFormat {
    pub channel_count: u16,
    pub sample_rate: u32,
    pub bit_depth: u16,
}

impl fmt::Display for PcmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ch / {} Hz / {}-bit",
            self.channel_count, self.sample_rate, self.bit_depth
        )
    }
}

/// Snapshot of what a WAV file on disk actually contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioMetadata {
    pub channel_count: u16,
    pub sample_rate: u32,
    pub bit_depth: u16,
    pub subtype: PcmSubtype,
    /// Length in frames (samples per channel).
    pub frames: u32,
}

impl AudioMetadata {
    pub fn format(&self) -> PcmFormat {
        PcmFormat {
            channel_count: self.channel_count,
            sample_rate: self.sample_rate,
            bit_depth: self.bit_depth,
        }
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            f64::from(self.frames) / f64::from(self.sample_rate)
        }
    }
}

/// Whether an [`AudioFile`](super::AudioFile) has been checked against disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetadataState {
    /// Instance values are planned or defaulted, not read.
    #[default]
    Unrefreshed,
    /// Metadata was read from the file and cached.
    Refreshed(AudioMetadata),
}

impl MetadataState {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, Self::Refreshed(_))
    }

    pub fn metadata(&self) -> Option<AudioMetadata> {
        match self {
            Self::Refreshed(metadata) => Some(*metadata),
            Self::Unrefreshed => None,
        }
    }
}
