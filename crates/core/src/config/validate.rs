use std::path::MAIN_SEPARATOR;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Failure threshold is in (0, 1]
/// - Sample rate and bit depth overrides are usable
/// - Replace-in-place is not combined with a distinct output directory
/// - Rename token is a plain, non-empty name
/// - Resampler chunk and filter sizes are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let batch = &config.batch;
    let threshold = batch.failure_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "batch.failure_threshold must be in (0, 1], got {threshold}"
        )));
    }

    batch
        .plan
        .overrides
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if batch.plan.replace_in_place {
        if let Some(output_dir) = &batch.plan.output_dir {
            if batch.plan.input_dir.as_ref() != Some(output_dir) {
                return Err(ConfigError::ValidationError(
                    "replace_in_place cannot be combined with a different output_dir".to_string(),
                ));
            }
        }
    }

    if let Some(token) = &batch.plan.rename_token {
        if token.is_empty() || token.contains(MAIN_SEPARATOR) || token.contains('/') {
            return Err(ConfigError::ValidationError(format!(
                "rename_token must be a non-empty name without separators, got {token:?}"
            )));
        }
    }

    let resampler = &config.converter.resampler;
    if resampler.chunk_size == 0 || resampler.sinc_len == 0 || resampler.oversampling_factor == 0 {
        return Err(ConfigError::ValidationError(
            "converter.resampler sizes cannot be 0".to_string(),
        ));
    }

    Ok(())
}
