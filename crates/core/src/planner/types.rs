//! Types for the planner module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::audio_file::{needs_conversion, AudioFile, AudioFileError, PcmFormat};

use super::overrides::PlanOverrides;

/// Path policy and overrides shared by every file in a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Root the candidate files were collected from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_dir: Option<PathBuf>,
    /// Root to write converted files below. Without an `input_dir` files
    /// are placed flat in this directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Token appended to converted filenames instead of the profile short
    /// name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename_token: Option<String>,
    /// Rewrite the source file itself.
    #[serde(default)]
    pub replace_in_place: bool,
    #[serde(default)]
    pub overrides: PlanOverrides,
}

/// Resolved output of planning one file. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionTarget {
    pub output_path: PathBuf,
    pub channel_count: u16,
    pub sample_rate: u32,
    pub bit_depth: u16,
    pub force_mono: bool,
    pub in_place: bool,
}

impl ConversionTarget {
    pub(crate) fn from_target(target: &AudioFile, force_mono: bool, in_place: bool) -> Self {
        Self {
            output_path: target.path().to_path_buf(),
            channel_count: target.channel_count(),
            sample_rate: target.sample_rate(),
            bit_depth: target.bit_depth(),
            force_mono,
            in_place,
        }
    }

    pub fn format(&self) -> PcmFormat {
        PcmFormat {
            channel_count: self.channel_count,
            sample_rate: self.sample_rate,
            bit_depth: self.bit_depth,
        }
    }
}

/// A source file paired with the file it should become.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    /// The source, refreshed from disk.
    pub existing: AudioFile,
    /// The planned output. Never refreshed.
    pub target: AudioFile,
    pub descriptor: ConversionTarget,
}

impl ConversionPlan {
    /// Whether the source format differs from the planned one.
    pub fn needs_conversion(&self) -> Result<bool, AudioFileError> {
        needs_conversion(&self.existing, &self.target)
    }
}

/// What the planner decided for one source file.
#[derive(Debug, Clone)]
pub enum PlanOutcome {
    /// A target was resolved.
    Ready(Box<ConversionPlan>),
    /// The filename already carries the rename token, so it is the output of
    /// an earlier run. Nothing to do.
    AlreadyTagged { path: PathBuf, token: String },
}

impl PlanOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn into_plan(self) -> Option<ConversionPlan> {
        match self {
            Self::Ready(plan) => Some(*plan),
            Self::AlreadyTagged { .. } => None,
        }
    }
}
