//! Parsing and application of user overrides.

use serde::{Deserialize, Deserializer, Serialize};

use crate::profile::{Profile, STANDARD_BIT_DEPTHS};

use super::error::PlanError;

/// Highest sample rate accepted as an override.
pub const MAX_SAMPLE_RATE: u32 = 768_000;

/// Format values the user asked for explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOverrides {
    /// Target sample rate in Hz. Accepts the aliases of [`parse_sample_rate`]
    /// when deserialized from a string.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_sample_rate"
    )]
    pub sample_rate: Option<u32>,
    /// Target bit depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<u16>,
    /// Down-mix everything to one channel.
    #[serde(default)]
    pub force_mono: bool,
}

impl PlanOverrides {
    pub fn validate(&self) -> Result<(), PlanError> {
        if let Some(rate) = self.sample_rate {
            check_sample_rate(rate)?;
        }
        if let Some(depth) = self.bit_depth {
            check_bit_depth(depth)?;
        }
        Ok(())
    }

    /// Returns a copy of `profile` whose defaults reflect the overrides.
    /// Overridden values are added to the allowed sets.
    pub fn apply(&self, profile: &Profile) -> Result<Profile, PlanError> {
        self.validate()?;
        let mut profile = profile.clone();
        if let Some(rate) = self.sample_rate {
            profile.set_default_sample_rate(rate)?;
        }
        if let Some(depth) = self.bit_depth {
            profile.set_default_bit_depth(depth)?;
        }
        if self.force_mono {
            profile.set_default_channel_count(1)?;
        }
        Ok(profile)
    }
}

fn deserialize_sample_rate<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRate {
        Hz(u32),
        Text(String),
    }

    match Option::<RawRate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawRate::Hz(rate)) => Ok(Some(rate)),
        Some(RawRate::Text(text)) => parse_sample_rate(&text)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Parses a sample rate given in Hz or kHz.
///
/// `"44100"`, `"44.1"`, `"44.1k"` and `"44.1kHz"` all give 44100. Bare values
/// below 1000 are read as kHz.
pub fn parse_sample_rate(input: &str) -> Result<u32, PlanError> {
    let normalized = input.trim().to_ascii_lowercase();
    let (number, explicit_khz) = if let Some(n) = normalized.strip_suffix("khz") {
        (n, true)
    } else if let Some(n) = normalized.strip_suffix('k') {
        (n, true)
    } else if let Some(n) = normalized.strip_suffix("hz") {
        (n, false)
    } else {
        (normalized.as_str(), false)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| PlanError::invalid_override(format!("not a sample rate: {input:?}")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(PlanError::invalid_override(format!(
            "sample rate must be positive: {input:?}"
        )));
    }

    let hz = if explicit_khz || value < 1000.0 {
        value * 1000.0
    } else {
        value
    };
    let rounded = hz.round();
    if (hz - rounded).abs() > 1e-6 {
        return Err(PlanError::invalid_override(format!(
            "sample rate must be a whole number of Hz: {input:?}"
        )));
    }
    if rounded > f64::from(MAX_SAMPLE_RATE) {
        return Err(PlanError::invalid_override(format!(
            "sample rate above {MAX_SAMPLE_RATE} Hz: {input:?}"
        )));
    }
    let rate = rounded as u32;
    check_sample_rate(rate)?;
    Ok(rate)
}

/// Parses a bit depth such as `"24"` or `"24bit"`.
pub fn parse_bit_depth(input: &str) -> Result<u16, PlanError> {
    let normalized = input.trim().to_ascii_lowercase();
    let number = normalized
        .strip_suffix("-bit")
        .or_else(|| normalized.strip_suffix("bit"))
        .unwrap_or(&normalized);
    let depth: u16 = number
        .trim()
        .parse()
        .map_err(|_| PlanError::invalid_override(format!("not a bit depth: {input:?}")))?;
    check_bit_depth(depth)?;
    Ok(depth)
}

fn check_sample_rate(rate: u32) -> Result<(), PlanError> {
    if rate == 0 || rate > MAX_SAMPLE_RATE {
        return Err(PlanError::invalid_override(format!(
            "sample rate out of range: {rate}"
        )));
    }
    Ok(())
}

fn check_bit_depth(depth: u16) -> Result<(), PlanError> {
    if !STANDARD_BIT_DEPTHS.contains(&depth) {
        return Err(PlanError::invalid_override(format!(
            "bit depth must be one of {STANDARD_BIT_DEPTHS:?}, got {depth}"
        )));
    }
    Ok(())
}
