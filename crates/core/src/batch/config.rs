//! Configuration for the batch module.

use serde::{Deserialize, Serialize};

use crate::planner::PlanOptions;

/// Settings for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Failure ratio above which the rest of the batch is abandoned.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: f64,

    /// Convert files that already match the profile.
    #[serde(default)]
    pub convert_all: bool,

    /// Plan and report without writing anything.
    #[serde(default)]
    pub dry_run: bool,

    /// Path policy and overrides handed to the planner.
    #[serde(default)]
    pub plan: PlanOptions,
}

fn default_failure_threshold() -> f64 {
    0.05
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            convert_all: false,
            dry_run: false,
            plan: PlanOptions::default(),
        }
    }
}

impl BatchConfig {
    /// Sets the failure threshold.
    pub fn with_failure_threshold(mut self, threshold: f64) -> Self {
        self.failure_threshold = threshold;
        self
    }

    /// Sets whether matching files are converted anyway.
    pub fn with_convert_all(mut self, convert_all: bool) -> Self {
        self.convert_all = convert_all;
        self
    }

    /// Sets dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the planner options.
    pub fn with_plan(mut self, plan: PlanOptions) -> Self {
        self.plan = plan;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();
        assert_eq!(config.failure_threshold, 0.05);
        assert!(!config.convert_all);
        assert!(!config.dry_run);
        assert!(!config.plan.replace_in_place);
    }

    #[test]
    fn test_config_from_toml() {
        let config: BatchConfig = toml::from_str(
            r#"
failure_threshold = 0.25
convert_all = true

[plan]
rename_token = "smp"

[plan.overrides]
force_mono = true
"#,
        )
        .unwrap();
        assert_eq!(config.failure_threshold, 0.25);
        assert!(config.convert_all);
        assert_eq!(config.plan.rename_token.as_deref(), Some("smp"));
        assert!(config.plan.overrides.force_mono);
    }
}
