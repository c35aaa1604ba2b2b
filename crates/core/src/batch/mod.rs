//! Batch runner.
//!
//! Plans and converts a list of files sequentially, one file fully finished
//! before the next. Per-file errors are captured in an append-only
//! [`BatchReport`]; a failure-ratio circuit breaker stops the run early
//! without rolling back files that were already converted.
//!
//! # Example
//!
//! ```ignore
//! use samplefit_core::batch::{BatchConfig, BatchRunner};
//! use samplefit_core::converter::WavConverter;
//! use samplefit_core::profile::Profile;
//!
//! let runner = BatchRunner::new(BatchConfig::default(), WavConverter::with_defaults());
//! let report = runner.run_dir(Path::new("/samples"), &Profile::octatrack())?;
//! println!("{}", report.summary());
//! ```

mod config;
mod error;
mod runner;
mod types;

pub use config::BatchConfig;
pub use error::BatchError;
pub use runner::{should_abort, BatchRunner};
pub use types::{
    BatchReport, BatchSummary, ConvertedFile, FailureStage, FileFailure, SkipReason, SkippedFile,
};
