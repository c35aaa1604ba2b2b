use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix of environment variables read by [`load_config`].
pub const ENV_PREFIX: &str = "SAMPLEFIT_";

/// Load configuration from an optional file with environment variable
/// overrides. A path that was given but does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
profile = "polyend_tracker"

[batch]
failure_threshold = 0.2

[batch.plan.overrides]
sample_rate = "48k"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.profile, Some(ProfileKind::PolyendTracker));
        assert_eq!(config.batch.failure_threshold, 0.2);
        assert_eq!(config.batch.plan.overrides.sample_rate, Some(48000));
        assert!(config.converter.create_missing_dirs);
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.profile, None);
        assert_eq!(config.batch.failure_threshold, 0.05);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_from_str_unknown_profile() {
        let result = load_config_from_str(r#"profile = "mpc""#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/samplefit.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
profile = "rample"

[converter]
create_missing_dirs = false

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.profile, Some(ProfileKind::Rample));
        assert!(!config.converter.create_missing_dirs);
        assert_eq!(config.logging.format, super::super::LogFormat::Json);
    }
}
