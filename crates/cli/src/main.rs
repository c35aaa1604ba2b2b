mod args;
mod output;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use samplefit_core::batch::BatchRunner;
use samplefit_core::config::{load_config, validate_config, LogFormat, LoggingConfig};
use samplefit_core::converter::WavConverter;
use samplefit_core::profile::{resolve, resolve_name, Profile};

use args::Args;

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("samplefit: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(config: &LoggingConfig, verbose: bool) {
    let default_directive = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so `--json` output stays parseable.
    match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load config from environment".to_string(),
    })?;
    args.apply_to(&mut config);

    init_logging(&config.logging, args.verbose);

    validate_config(&config).context("Configuration validation failed")?;
    debug!(config = ?config, "Configuration loaded");

    let profile: Profile = match (&args.profile, config.profile) {
        (Some(name), _) => resolve_name(name)?,
        (None, Some(kind)) => resolve(kind),
        (None, None) => {
            return Err(anyhow!(
                "no profile given; pass one of octatrack, polyend_tracker, rample, hyperion"
            ))
        }
    };
    info!(profile = %profile, dir = %args.dir.display(), "Converting samples");

    let converter = WavConverter::new(config.converter.clone());
    let runner = BatchRunner::new(config.batch.clone(), converter);
    let report = runner
        .run_dir(&args.dir, &profile)
        .with_context(|| format!("Cannot scan {}", args.dir.display()))?;

    let stdout = std::io::stdout().lock();
    if args.json {
        output::write_json(&report, args.verbose, stdout)?;
    } else {
        output::write_text(&report, args.verbose, stdout)?;
    }

    Ok(())
}
