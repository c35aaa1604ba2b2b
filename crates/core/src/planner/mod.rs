//! Conversion planning.
//!
//! Given a source file, a profile and the batch-wide [`PlanOptions`], the
//! planner reads the source header and resolves the target: format values
//! from the profile defaults and overrides, output path from the in-place,
//! output directory and rename token policy.
//!
//! # Example
//!
//! ```ignore
//! use samplefit_core::planner::{plan, PlanOptions, PlanOutcome};
//! use samplefit_core::profile::{resolve, ProfileKind};
//!
//! let profile = resolve(ProfileKind::PolyendTracker);
//! match plan(Path::new("/samples/kick.wav"), &profile, &PlanOptions::default())? {
//!     PlanOutcome::Ready(plan) => println!("-> {}", plan.descriptor.output_path.display()),
//!     PlanOutcome::AlreadyTagged { .. } => println!("already converted"),
//! }
//! ```

mod error;
mod overrides;
mod path;
mod plan;
mod types;

pub use error::PlanError;
pub use overrides::{parse_bit_depth, parse_sample_rate, PlanOverrides, MAX_SAMPLE_RATE};
pub use path::{append_token_before_extension, rebase, TOKEN_SEPARATOR};
pub use plan::plan;
pub use types::{ConversionPlan, ConversionTarget, PlanOptions, PlanOutcome};
