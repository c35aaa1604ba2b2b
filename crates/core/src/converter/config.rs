//! Configuration for the converter module.

use serde::{Deserialize, Serialize};

/// Configuration for the WAV converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Create missing destination directories instead of failing.
    #[serde(default = "default_create_missing_dirs")]
    pub create_missing_dirs: bool,

    /// Suffix of the scratch file written next to the destination before it
    /// is renamed into place.
    #[serde(default = "default_partial_suffix")]
    pub partial_suffix: String,

    /// Sinc resampler settings.
    #[serde(default)]
    pub resampler: ResamplerConfig,
}

/// Settings for the sinc interpolation resampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResamplerConfig {
    /// Length of the windowed sinc filter.
    #[serde(default = "default_sinc_len")]
    pub sinc_len: usize,

    /// Cutoff relative to the Nyquist frequency.
    #[serde(default = "default_f_cutoff")]
    pub f_cutoff: f32,

    /// Number of intermediate points between sinc samples.
    #[serde(default = "default_oversampling_factor")]
    pub oversampling_factor: usize,

    /// Input frames per processing chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_create_missing_dirs() -> bool {
    true
}

fn default_partial_suffix() -> String {
    ".partial".to_string()
}

fn default_sinc_len() -> usize {
    256
}

fn default_f_cutoff() -> f32 {
    0.95
}

fn default_oversampling_factor() -> usize {
    256
}

fn default_chunk_size() -> usize {
    1024
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            create_missing_dirs: default_create_missing_dirs(),
            partial_suffix: default_partial_suffix(),
            resampler: ResamplerConfig::default(),
        }
    }
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        Self {
            sinc_len: default_sinc_len(),
            f_cutoff: default_f_cutoff(),
            oversampling_factor: default_oversampling_factor(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl ConverterConfig {
    /// Sets whether missing destination directories are created.
    pub fn with_create_missing_dirs(mut self, create: bool) -> Self {
        self.create_missing_dirs = create;
        self
    }

    /// Sets the resampler settings.
    pub fn with_resampler(mut self, resampler: ResamplerConfig) -> Self {
        self.resampler = resampler;
        self
    }
}

impl ResamplerConfig {
    /// Smaller filter for quick previews and tests.
    pub fn fast() -> Self {
        Self {
            sinc_len: 64,
            f_cutoff: 0.9,
            oversampling_factor: 64,
            chunk_size: 512,
        }
    }
}
