//! PCM subtype tags.
//!
//! WAV files carry their bit depth as a sample width; the rest of the system
//! talks about it through symbolic tags (`PCM_16` and friends). The table is
//! closed: anything outside 8/16/24/32-bit integer PCM is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::AudioFileError;

/// Integer PCM encodings the converter reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PcmSubtype {
    #[serde(rename = "PCM_S8")]
    PcmS8,
    #[serde(rename = "PCM_16")]
    Pcm16,
    #[serde(rename = "PCM_24")]
    Pcm24,
    #[serde(rename = "PCM_32")]
    Pcm32,
}

impl PcmSubtype {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::PcmS8 => "PCM_S8",
            Self::Pcm16 => "PCM_16",
            Self::Pcm24 => "PCM_24",
            Self::Pcm32 => "PCM_32",
        }
    }

    pub fn bit_depth(&self) -> u16 {
        match self {
            Self::PcmS8 => 8,
            Self::Pcm16 => 16,
            Self::Pcm24 => 24,
            Self::Pcm32 => 32,
        }
    }

    pub fn from_bit_depth(bit_depth: u16) -> Result<Self, AudioFileError> {
        match bit_depth {
            8 => Ok(Self::PcmS8),
            16 => Ok(Self::Pcm16),
            24 => Ok(Self::Pcm24),
            32 => Ok(Self::Pcm32),
            other => Err(AudioFileError::unsupported_subtype(format!("PCM_{other}"))),
        }
    }

    /// Derives the tag from a decoded WAV header.
    pub fn from_spec(spec: &hound::WavSpec) -> Result<Self, AudioFileError> {
        match spec.sample_format {
            hound::SampleFormat::Int => Self::from_bit_depth(spec.bits_per_sample),
            hound::SampleFormat::Float => Err(AudioFileError::unsupported_subtype(format!(
                "FLOAT_{}",
                spec.bits_per_sample
            ))),
        }
    }
}

impl fmt::Display for PcmSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PcmSubtype {
    type Err = AudioFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PCM_S8" => Ok(Self::PcmS8),
            "PCM_16" => Ok(Self::Pcm16),
            "PCM_24" => Ok(Self::Pcm24),
            "PCM_32" => Ok(Self::Pcm32),
            other => Err(AudioFileError::unsupported_subtype(other)),
        }
    }
}
