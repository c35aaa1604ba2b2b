pub mod audio_file;
pub mod batch;
pub mod config;
pub mod converter;
pub mod discover;
pub mod planner;
pub mod profile;
pub mod testing;

pub use audio_file::{needs_conversion, AudioFile, AudioFileError, AudioMetadata, PcmFormat};
pub use batch::{should_abort, BatchConfig, BatchError, BatchReport, BatchRunner, BatchSummary};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use converter::{Converter, ConverterConfig, ConverterError, WavConverter};
pub use discover::find_target_files;
pub use planner::{plan, PlanError, PlanOptions, PlanOutcome, PlanOverrides};
pub use profile::{resolve, resolve_name, Profile, ProfileError, ProfileKind};
