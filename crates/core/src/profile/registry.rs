//! Built-in sampler profiles.

use super::error::ProfileError;
use super::types::{Profile, ProfileKind};

impl Profile {
    /// Generic RIFF/WAVE profile that the sampler presets narrow down.
    pub fn wave() -> Profile {
        Profile::builder("Wave File")
            .short_name("wav")
            .build()
            .expect("wave preset is valid")
    }

    /// Elektron Octatrack: 44.1 kHz, 16 or 24 bit, mono or stereo.
    pub fn octatrack() -> Profile {
        Profile::builder("Octatrack Sample")
            .short_name("octa")
            .sample_rates([44100], 44100)
            .bit_depths([16, 24], 24)
            .channel_counts([1, 2], 2)
            .build()
            .expect("octatrack preset is valid")
    }

    /// Polyend Tracker: 44.1 kHz mono, 16/24/32 bit.
    pub fn polyend_tracker() -> Profile {
        Profile::builder("Polyend Tracker Sample")
            .short_name("track")
            .sample_rates([44100], 44100)
            .bit_depths([16, 24, 32], 24)
            .channel_counts([1], 1)
            .build()
            .expect("polyend tracker preset is valid")
    }

    /// Squarp Rample: 44.1 kHz mono, 8 or 16 bit.
    pub fn rample() -> Profile {
        Profile::builder("Rample Sample")
            .short_name("rample")
            .sample_rates([44100], 44100)
            .bit_depths([8, 16], 16)
            .channel_counts([1], 1)
            .build()
            .expect("rample preset is valid")
    }

    /// Synthesis Technology E520 Hyperion impulse responses: 48 kHz mono 16 bit.
    pub fn hyperion() -> Profile {
        Profile::builder("Hyperion IR Sample")
            .short_name("hyperion")
            .sample_rates([48000], 48000)
            .bit_depths([16], 16)
            .channel_counts([1], 1)
            .build()
            .expect("hyperion preset is valid")
    }
}

/// Returns a fresh profile for the given hardware target.
pub fn resolve(kind: ProfileKind) -> Profile {
    match kind {
        ProfileKind::Octatrack => Profile::octatrack(),
        ProfileKind::PolyendTracker => Profile::polyend_tracker(),
        ProfileKind::Rample => Profile::rample(),
        ProfileKind::Hyperion => Profile::hyperion(),
    }
}

/// Parses a sampler identifier and resolves its profile.
pub fn resolve_name(name: &str) -> Result<Profile, ProfileError> {
    name.parse::<ProfileKind>().map(resolve)
}
