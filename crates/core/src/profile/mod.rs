//! Sampler profiles.
//!
//! A [`Profile`] lists the extensions, sample rates, bit depths and channel
//! counts a hardware sampler accepts, plus the default for each. The registry
//! maps each [`ProfileKind`] to a freshly built preset.
//!
//! # Example
//!
//! ```ignore
//! use samplefit_core::profile::{resolve, ProfileKind};
//!
//! let mut profile = resolve(ProfileKind::Rample);
//! assert_eq!(profile.default_bit_depth(), 16);
//!
//! // Widening is allowed, narrowing is not.
//! profile.set_default_bit_depth(8)?;
//! ```

mod error;
mod registry;
mod types;

pub use error::ProfileError;
pub use registry::{resolve, resolve_name};
pub use types::{
    derive_short_name, dotted_extension, Profile, ProfileBuilder, ProfileKind,
    STANDARD_BIT_DEPTHS, STANDARD_SAMPLE_RATES, WAVE_EXTENSIONS,
};
