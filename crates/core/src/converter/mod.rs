//! Resample/rewrite engine.
//!
//! Takes a refreshed source [`AudioFile`](crate::audio_file::AudioFile) and a
//! target handle and writes a new WAV file in the target's format.
//!
//! # Pipeline
//!
//! 1. Decode the whole source into normalised `f64` planes at its native
//!    rate, depth and channel count.
//! 2. Remix to the target channel count (mono output averages all channels).
//! 3. Resample with a band-limited sinc filter when the rates differ. The
//!    achieved rate must equal the requested one.
//! 4. Quantise to the target integer depth and write to a `.partial` file
//!    next to the destination, then rename it into place.
//!
//! # Example
//!
//! ```ignore
//! use samplefit_core::converter::{Converter, WavConverter};
//!
//! let converter = WavConverter::with_defaults();
//! let result = converter.convert(&plan.existing, &plan.target)?;
//! println!("Wrote {} frames in {} ms", result.frames_written, result.duration_ms);
//! ```

mod config;
mod error;
pub mod pcm;
mod resampler;
mod traits;
mod types;
mod wav;

pub use config::{ConverterConfig, ResamplerConfig};
pub use error::ConverterError;
pub use resampler::SincResampler;
pub use traits::{Converter, Resampler};
pub use types::{ConversionResult, PcmBuffer};
pub use wav::WavConverter;
