//! Types for the profile module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::error::ProfileError;

/// Bit depths a PCM profile may allow.
pub const STANDARD_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// Sample rates the generic wave profile allows.
pub const STANDARD_SAMPLE_RATES: [u32; 6] = [8000, 16000, 32000, 44100, 48000, 96000];

/// Extensions accepted for RIFF/WAVE files.
pub const WAVE_EXTENSIONS: [&str; 4] = [".WAVE", ".wave", ".WAV", ".wav"];

/// Hardware targets with a known sample format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Elektron Octatrack.
    #[serde(alias = "octa")]
    Octatrack,
    /// Polyend Tracker.
    #[serde(alias = "tracker", alias = "track")]
    PolyendTracker,
    /// Squarp Rample.
    Rample,
    /// Synthesis Technology E520 Hyperion impulse responses.
    Hyperion,
}

impl ProfileKind {
    /// All known kinds, in registry order.
    pub const ALL: [ProfileKind; 4] = [
        Self::Octatrack,
        Self::PolyendTracker,
        Self::Rample,
        Self::Hyperion,
    ];

    /// Returns the identifier used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Octatrack => "octatrack",
            Self::PolyendTracker => "polyend_tracker",
            Self::Rample => "rample",
            Self::Hyperion => "hyperion",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "octa" | "octatrack" => Ok(Self::Octatrack),
            "tracker" | "track" | "polyend_tracker" | "polyend-tracker" => {
                Ok(Self::PolyendTracker)
            }
            "rample" => Ok(Self::Rample),
            "hyperion" => Ok(Self::Hyperion),
            _ => Err(ProfileError::UnknownProfileKind(s.to_string())),
        }
    }
}

/// Accepted and default format parameters for a family of sample files.
///
/// Every default is a member of its allowed set. The only way to change a
/// default is through the `set_default_*` methods, which insert the new value
/// into the allowed set and never remove anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    name: String,
    short_name: String,
    extensions: BTreeSet<String>,
    default_extension: String,
    sample_rates: BTreeSet<u32>,
    default_sample_rate: u32,
    bit_depths: BTreeSet<u16>,
    default_bit_depth: u16,
    channel_counts: BTreeSet<u16>,
    default_channel_count: u16,
}

impl Profile {
    /// Starts building a profile. Unset parameters fall back to the generic
    /// wave profile values.
    pub fn builder(name: impl Into<String>) -> ProfileBuilder {
        ProfileBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier appended to derived filenames.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn extensions(&self) -> &BTreeSet<String> {
        &self.extensions
    }

    pub fn default_extension(&self) -> &str {
        &self.default_extension
    }

    pub fn sample_rates(&self) -> &BTreeSet<u32> {
        &self.sample_rates
    }

    pub fn default_sample_rate(&self) -> u32 {
        self.default_sample_rate
    }

    pub fn bit_depths(&self) -> &BTreeSet<u16> {
        &self.bit_depths
    }

    pub fn default_bit_depth(&self) -> u16 {
        self.default_bit_depth
    }

    pub fn channel_counts(&self) -> &BTreeSet<u16> {
        &self.channel_counts
    }

    pub fn default_channel_count(&self) -> u16 {
        self.default_channel_count
    }

    /// Whether the path's extension (dot included, case-sensitive) belongs to
    /// this profile.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        dotted_extension(path).is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Whether a file with this channel count can be used as-is.
    pub fn allows_channel_count(&self, channels: u16) -> bool {
        self.channel_counts.contains(&channels)
    }

    pub fn set_default_extension(&mut self, extension: &str) -> Result<(), ProfileError> {
        if !extension.starts_with('.') || extension.len() < 2 {
            return Err(ProfileError::invalid_state(format!(
                "extension must start with a dot: {extension:?}"
            )));
        }
        self.extensions.insert(extension.to_string());
        self.default_extension = extension.to_string();
        Ok(())
    }

    pub fn set_default_sample_rate(&mut self, sample_rate: u32) -> Result<(), ProfileError> {
        if sample_rate == 0 {
            return Err(ProfileError::invalid_state("sample rate cannot be 0"));
        }
        self.sample_rates.insert(sample_rate);
        self.default_sample_rate = sample_rate;
        Ok(())
    }

    pub fn set_default_bit_depth(&mut self, bit_depth: u16) -> Result<(), ProfileError> {
        check_bit_depth(bit_depth)?;
        self.bit_depths.insert(bit_depth);
        self.default_bit_depth = bit_depth;
        Ok(())
    }

    pub fn set_default_channel_count(&mut self, channels: u16) -> Result<(), ProfileError> {
        if channels == 0 {
            return Err(ProfileError::invalid_state("channel count cannot be 0"));
        }
        self.channel_counts.insert(channels);
        self.default_channel_count = channels;
        Ok(())
    }

    /// Re-checks every invariant. Constructors and setters already enforce
    /// them, so this only fails on a bug.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_member("extension", &self.extensions, &self.default_extension)?;
        check_member("sample rate", &self.sample_rates, &self.default_sample_rate)?;
        check_member("bit depth", &self.bit_depths, &self.default_bit_depth)?;
        check_member(
            "channel count",
            &self.channel_counts,
            &self.default_channel_count,
        )?;
        if self.short_name.is_empty() {
            return Err(ProfileError::invalid_state("short name cannot be empty"));
        }
        if self.sample_rates.contains(&0) {
            return Err(ProfileError::invalid_state("sample rate cannot be 0"));
        }
        if self.channel_counts.contains(&0) {
            return Err(ProfileError::invalid_state("channel count cannot be 0"));
        }
        for depth in &self.bit_depths {
            check_bit_depth(*depth)?;
        }
        for ext in &self.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(ProfileError::invalid_state(format!(
                    "extension must start with a dot: {ext:?}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} Hz, {}-bit, {} ch, {}",
            self.name,
            self.short_name,
            self.default_sample_rate,
            self.default_bit_depth,
            self.default_channel_count,
            self.default_extension
        )
    }
}

/// Builder for [`Profile`].
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    name: String,
    short_name: Option<String>,
    extensions: BTreeSet<String>,
    default_extension: String,
    sample_rates: BTreeSet<u32>,
    default_sample_rate: u32,
    bit_depths: BTreeSet<u16>,
    default_bit_depth: u16,
    channel_counts: BTreeSet<u16>,
    default_channel_count: u16,
}

impl ProfileBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            extensions: WAVE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            default_extension: ".wav".to_string(),
            sample_rates: STANDARD_SAMPLE_RATES.into_iter().collect(),
            default_sample_rate: 48000,
            bit_depths: STANDARD_BIT_DEPTHS.into_iter().collect(),
            default_bit_depth: 24,
            channel_counts: [1, 2].into_iter().collect(),
            default_channel_count: 2,
        }
    }

    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self.default_extension = default.to_string();
        self
    }

    pub fn sample_rates(mut self, rates: impl IntoIterator<Item = u32>, default: u32) -> Self {
        self.sample_rates = rates.into_iter().collect();
        self.default_sample_rate = default;
        self
    }

    pub fn bit_depths(mut self, depths: impl IntoIterator<Item = u16>, default: u16) -> Self {
        self.bit_depths = depths.into_iter().collect();
        self.default_bit_depth = default;
        self
    }

    pub fn channel_counts(mut self, counts: impl IntoIterator<Item = u16>, default: u16) -> Self {
        self.channel_counts = counts.into_iter().collect();
        self.default_channel_count = default;
        self
    }

    /// Builds the profile, checking that every default is allowed.
    pub fn build(self) -> Result<Profile, ProfileError> {
        let short_name = match self.short_name {
            Some(short) => short,
            None => derive_short_name(&self.name),
        };
        let profile = Profile {
            name: self.name,
            short_name,
            extensions: self.extensions,
            default_extension: self.default_extension,
            sample_rates: self.sample_rates,
            default_sample_rate: self.default_sample_rate,
            bit_depths: self.bit_depths,
            default_bit_depth: self.default_bit_depth,
            channel_counts: self.channel_counts,
            default_channel_count: self.default_channel_count,
        };
        profile.validate()?;
        Ok(profile)
    }
}

/// First word of the name, at most four characters, lowercased.
pub fn derive_short_name(name: &str) -> String {
    name.split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .take(4)
        .collect::<String>()
        .to_lowercase()
}

/// The path's extension with its leading dot, e.g. `".wav"`.
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
}

fn check_bit_depth(bit_depth: u16) -> Result<(), ProfileError> {
    if STANDARD_BIT_DEPTHS.contains(&bit_depth) {
        Ok(())
    } else {
        Err(ProfileError::invalid_state(format!(
            "unsupported bit depth: {bit_depth}"
        )))
    }
}

fn check_member<T: Ord + fmt::Debug>(
    what: &str,
    set: &BTreeSet<T>,
    default: &T,
) -> Result<(), ProfileError> {
    if set.is_empty() {
        return Err(ProfileError::invalid_state(format!(
            "allowed {what} set is empty"
        )));
    }
    if !set.contains(default) {
        return Err(ProfileError::invalid_state(format!(
            "default {what} {default:?} is not in {set:?}"
        )));
    }
    Ok(())
}
