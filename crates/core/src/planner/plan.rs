//! Resolution of a conversion target for one source file.

use std::path::Path;
use tracing::debug;

use crate::audio_file::AudioFile;
use crate::profile::Profile;

use super::error::PlanError;
use super::path::{append_token_before_extension, rebase, TOKEN_SEPARATOR};
use super::types::{ConversionPlan, ConversionTarget, PlanOptions, PlanOutcome};

/// Plans the conversion of `source` to `profile`.
///
/// Reads the source header once. The returned target uses the profile
/// defaults with the overrides applied; its path follows the in-place,
/// output directory and rename token policy of `options`.
pub fn plan(source: &Path, profile: &Profile, options: &PlanOptions) -> Result<PlanOutcome, PlanError> {
    let mut existing = AudioFile::open(source, profile.clone())?;
    existing.refresh_from_disk()?;

    let overrides = &options.overrides;
    let target_profile = overrides.apply(profile)?;
    let channels = if overrides.force_mono {
        1
    } else if target_profile.allows_channel_count(existing.channel_count()) {
        existing.channel_count()
    } else {
        target_profile.default_channel_count()
    };
    let mut target = AudioFile::open(source, target_profile)?;
    target.set_channel_count(channels)?;

    if !options.replace_in_place {
        let mut output = source.to_path_buf();
        if let Some(output_dir) = &options.output_dir {
            match &options.input_dir {
                Some(input_dir) if input_dir != output_dir => {
                    output = rebase(source, input_dir, output_dir)?;
                }
                Some(_) => {}
                None => {
                    if let Some(file_name) = source.file_name() {
                        output = output_dir.join(file_name);
                    }
                }
            }
        }

        let token = options
            .rename_token
            .as_deref()
            .unwrap_or_else(|| profile.short_name());
        match append_token_before_extension(&output, token, TOKEN_SEPARATOR, true) {
            Some(path) => target.set_path(path)?,
            None => {
                debug!(path = %source.display(), token, "Already tagged, skipping");
                return Ok(PlanOutcome::AlreadyTagged {
                    path: source.to_path_buf(),
                    token: token.to_string(),
                });
            }
        }
    }

    let descriptor =
        ConversionTarget::from_target(&target, overrides.force_mono, options.replace_in_place);
    debug!(
        source = %source.display(),
        output = %descriptor.output_path.display(),
        from = %existing.format(),
        to = %descriptor.format(),
        "Planned conversion"
    );
    Ok(PlanOutcome::Ready(Box::new(ConversionPlan {
        existing,
        target,
        descriptor,
    })))
}
