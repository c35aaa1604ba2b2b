//! Profile-bound handle on a single audio file.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::profile::{dotted_extension, Profile, ProfileError};

use super::error::AudioFileError;
use super::subtype::PcmSubtype;
use super::types::{AudioMetadata, MetadataState, PcmFormat};

/// A path bound to a profile, plus the format it has or should have.
///
/// The instance values start out as the profile defaults. They describe the
/// file on disk only after [`refresh_from_disk`](Self::refresh_from_disk).
#[derive(Debug, Clone)]
pub struct AudioFile {
    path: PathBuf,
    profile: Profile,
    sample_rate: u32,
    channel_count: u16,
    bit_depth: u16,
    metadata: MetadataState,
}

impl AudioFile {
    /// Binds `path` to `profile`. Fails before touching the filesystem when
    /// the extension is not accepted.
    pub fn open(path: impl Into<PathBuf>, profile: Profile) -> Result<Self, AudioFileError> {
        let path = path.into();
        check_extension(&path, &profile)?;
        Ok(Self {
            sample_rate: profile.default_sample_rate(),
            channel_count: profile.default_channel_count(),
            bit_depth: profile.default_bit_depth(),
            path,
            profile,
            metadata: MetadataState::Unrefreshed,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    pub fn format(&self) -> PcmFormat {
        PcmFormat {
            channel_count: self.channel_count,
            sample_rate: self.sample_rate,
            bit_depth: self.bit_depth,
        }
    }

    /// Subtype tag for the instance bit depth.
    pub fn subtype(&self) -> Result<PcmSubtype, AudioFileError> {
        PcmSubtype::from_bit_depth(self.bit_depth)
    }

    pub fn metadata_state(&self) -> &MetadataState {
        &self.metadata
    }

    pub fn is_refreshed(&self) -> bool {
        self.metadata.is_refreshed()
    }

    /// Moves the handle to another path of the same profile. Cached metadata
    /// belongs to the old path and is dropped.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) -> Result<(), AudioFileError> {
        let path = path.into();
        check_extension(&path, &self.profile)?;
        self.path = path;
        self.metadata = MetadataState::Unrefreshed;
        Ok(())
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), AudioFileError> {
        if sample_rate == 0 {
            return Err(ProfileError::invalid_state("sample rate cannot be 0").into());
        }
        self.sample_rate = sample_rate;
        Ok(())
    }

    pub fn set_channel_count(&mut self, channel_count: u16) -> Result<(), AudioFileError> {
        if channel_count == 0 {
            return Err(ProfileError::invalid_state("channel count cannot be 0").into());
        }
        self.channel_count = channel_count;
        Ok(())
    }

    pub fn set_bit_depth(&mut self, bit_depth: u16) -> Result<(), AudioFileError> {
        PcmSubtype::from_bit_depth(bit_depth)?;
        self.bit_depth = bit_depth;
        Ok(())
    }

    /// Returns the cached metadata, reading the file on first use.
    pub fn read_metadata(&mut self) -> Result<AudioMetadata, AudioFileError> {
        if !self.metadata.is_refreshed() {
            let metadata = probe_wav(&self.path)?;
            self.metadata = MetadataState::Refreshed(metadata);
        }
        self.metadata
            .metadata()
            .ok_or_else(|| AudioFileError::NotRefreshed {
                path: self.path.clone(),
            })
    }

    pub fn invalidate_metadata(&mut self) {
        self.metadata = MetadataState::Unrefreshed;
    }

    /// Re-reads the file and overwrites the instance values with what is
    /// actually on disk.
    pub fn refresh_from_disk(&mut self) -> Result<AudioMetadata, AudioFileError> {
        self.invalidate_metadata();
        let metadata = self.read_metadata()?;
        self.sample_rate = metadata.sample_rate;
        self.channel_count = metadata.channel_count;
        self.bit_depth = metadata.bit_depth;
        debug!(path = %self.path.display(), format = %self.format(), "Refreshed from disk");
        Ok(metadata)
    }

    pub fn does_exist(&self) -> bool {
        self.path.exists()
    }

    pub fn does_containing_directory_exist(&self) -> bool {
        match self.path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new(".").is_dir(),
            Some(parent) => parent.is_dir(),
            None => false,
        }
    }
}

/// Reads the header of a WAV file. The reader is closed before returning.
pub fn probe_wav(path: &Path) -> Result<AudioMetadata, AudioFileError> {
    let reader = hound::WavReader::open(path).map_err(|e| AudioFileError::from_wav(path, e))?;
    let spec = reader.spec();
    let subtype = PcmSubtype::from_spec(&spec)?;
    Ok(AudioMetadata {
        channel_count: spec.channels,
        sample_rate: spec.sample_rate,
        bit_depth: subtype.bit_depth(),
        subtype,
        frames: reader.duration(),
    })
}

fn check_extension(path: &Path, profile: &Profile) -> Result<(), AudioFileError> {
    if profile.accepts_extension(path) {
        return Ok(());
    }
    Err(AudioFileError::ExtensionMismatch {
        path: path.to_path_buf(),
        extension: dotted_extension(path).unwrap_or_default(),
        allowed: profile.extensions().iter().cloned().collect(),
    })
}
