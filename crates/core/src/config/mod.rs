//! Layered configuration.
//!
//! Values come from an optional TOML file, then `SAMPLEFIT_`-prefixed
//! environment variables (nested keys separated by `__`, e.g.
//! `SAMPLEFIT_BATCH__FAILURE_THRESHOLD=0.2`). Command-line flags are applied
//! on top by the binary.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str, ENV_PREFIX};
pub use types::*;
pub use validate::validate_config;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
