//! Report rendering.

use anyhow::{Context, Result};
use std::io::Write;

use samplefit_core::batch::BatchReport;

/// Writes `report` to `out` as pretty JSON. Per-file error details are
/// included only when `verbose`.
pub fn write_json(report: &BatchReport, verbose: bool, mut out: impl Write) -> Result<()> {
    let mut value = serde_json::to_value(report).context("Failed to serialize report")?;
    if !verbose {
        if let Some(fields) = value.as_object_mut() {
            fields.remove("errors");
        }
    }
    serde_json::to_writer_pretty(&mut out, &value).context("Failed to write report")?;
    writeln!(out)?;
    Ok(())
}

/// Writes the human-readable report: planned files for a dry run, the
/// summary line, failed paths, and error details when `verbose`.
pub fn write_text(report: &BatchReport, verbose: bool, mut out: impl Write) -> Result<()> {
    if report.dry_run {
        for file in &report.converted {
            writeln!(
                out,
                "would convert {} -> {} ({} -> {})",
                file.source.display(),
                file.output.display(),
                file.source_format,
                file.target_format
            )?;
        }
    }

    writeln!(out, "{}", report.summary())?;

    if report.has_failures() {
        writeln!(out, "failed:")?;
        if verbose {
            for failure in &report.errors {
                writeln!(
                    out,
                    "  {} [{}] {}",
                    failure.path.display(),
                    failure.stage,
                    failure.error
                )?;
            }
        } else {
            for path in &report.failed {
                writeln!(out, "  {}", path.display())?;
            }
        }
    }
    Ok(())
}
