//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use samplefit_core::config::Config;
use samplefit_core::planner::{parse_bit_depth, parse_sample_rate};

/// Convert WAV samples to the format a hardware sampler expects.
#[derive(Debug, Parser)]
#[command(name = "samplefit", author, version, about, long_about = None)]
pub struct Args {
    /// Target profile: octatrack (octa), polyend_tracker (tracker, track),
    /// rample or hyperion. Falls back to `profile` in the config file.
    pub profile: Option<String>,

    /// Directory to scan recursively for samples
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Write converted files below this directory, mirroring the input tree
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Token appended to converted filenames (defaults to the profile short name)
    #[arg(long)]
    pub rename_token: Option<String>,

    /// Target sample rate, e.g. 44100, 44.1k or 48kHz
    #[arg(short = 'r', long, value_parser = parse_sample_rate)]
    pub sample_rate: Option<u32>,

    /// Target bit depth: 8, 16, 24 or 32
    #[arg(short, long, value_parser = parse_bit_depth)]
    pub bit_depth: Option<u16>,

    /// Down-mix to a single channel
    #[arg(short, long)]
    pub mono: bool,

    /// Overwrite the source files
    #[arg(long, conflicts_with_all = ["output_dir", "rename_token"])]
    pub in_place: bool,

    /// Convert files that already match the profile
    #[arg(short = 'a', long)]
    pub convert_all: bool,

    /// Abort once failures exceed this fraction of attempted files
    #[arg(long)]
    pub failure_threshold: Option<f64>,

    /// Plan and list conversions without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Show debug logs and per-file error details
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file
    #[arg(short, long, env = "SAMPLEFIT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Applies the flags that were given on top of `config`.
    pub fn apply_to(&self, config: &mut Config) {
        let batch = &mut config.batch;
        let plan = &mut batch.plan;

        plan.input_dir = Some(self.dir.clone());
        if let Some(output_dir) = &self.output_dir {
            plan.output_dir = Some(output_dir.clone());
        }
        if let Some(token) = &self.rename_token {
            plan.rename_token = Some(token.clone());
        }
        if self.in_place {
            plan.replace_in_place = true;
        }
        if let Some(rate) = self.sample_rate {
            plan.overrides.sample_rate = Some(rate);
        }
        if let Some(depth) = self.bit_depth {
            plan.overrides.bit_depth = Some(depth);
        }
        if self.mono {
            plan.overrides.force_mono = true;
        }

        if self.convert_all {
            batch.convert_all = true;
        }
        if let Some(threshold) = self.failure_threshold {
            batch.failure_threshold = threshold;
        }
        if self.dry_run {
            batch.dry_run = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["samplefit", "octa"]).unwrap();
        assert_eq!(args.profile.as_deref(), Some("octa"));
        assert_eq!(args.dir, PathBuf::from("."));
        assert!(!args.mono);
    }

    #[test]
    fn test_parse_aliases() {
        let args = Args::try_parse_from([
            "samplefit", "track", "/samples", "-r", "44.1k", "-b", "24bit", "--mono",
        ])
        .unwrap();
        assert_eq!(args.sample_rate, Some(44100));
        assert_eq!(args.bit_depth, Some(24));
        assert!(args.mono);
    }

    #[test]
    fn test_parse_rejects_bad_depth() {
        assert!(Args::try_parse_from(["samplefit", "octa", "-b", "12"]).is_err());
    }

    #[test]
    fn test_in_place_conflicts_with_output_dir() {
        let result =
            Args::try_parse_from(["samplefit", "octa", "--in-place", "--output-dir", "/out"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let args = Args::try_parse_from([
            "samplefit",
            "rample",
            "/in",
            "-o",
            "/out",
            "--convert-all",
            "--failure-threshold",
            "0.5",
        ])
        .unwrap();
        let mut config = Config::default();
        config.batch.plan.rename_token = Some("kept".to_string());
        args.apply_to(&mut config);

        let batch = &config.batch;
        assert_eq!(batch.plan.input_dir, Some(PathBuf::from("/in")));
        assert_eq!(batch.plan.output_dir, Some(PathBuf::from("/out")));
        assert_eq!(batch.plan.rename_token.as_deref(), Some("kept"));
        assert!(batch.convert_all);
        assert_eq!(batch.failure_threshold, 0.5);
        assert!(!batch.dry_run);
    }
}
