//! Profile-bound audio file handles.
//!
//! An [`AudioFile`] ties a path to a [`Profile`](crate::profile::Profile) and
//! carries the format the file has (after a refresh) or should have (when it
//! describes a conversion target). Metadata is read lazily with `hound` and
//! cached in a [`MetadataState`].

mod compare;
mod error;
mod handle;
mod subtype;
mod types;

pub use compare::needs_conversion;
pub use error::AudioFileError;
pub use handle::{probe_wav, AudioFile};
pub use subtype::PcmSubtype;
pub use types::{AudioMetadata, MetadataState, PcmFormat};
