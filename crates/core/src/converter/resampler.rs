//! Band-limited sinc resampling backed by rubato.

use rubato::{
    Resampler as _, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
    WindowFunction,
};
use tracing::trace;

use super::config::ResamplerConfig;
use super::error::ConverterError;
use super::traits::Resampler;
use super::types::PcmBuffer;

/// Sinc interpolation resampler.
#[derive(Debug, Clone, Default)]
pub struct SincResampler {
    config: ResamplerConfig,
}

impl SincResampler {
    pub fn new(config: ResamplerConfig) -> Self {
        Self { config }
    }

    fn parameters(&self) -> SincInterpolationParameters {
        SincInterpolationParameters {
            sinc_len: self.config.sinc_len,
            f_cutoff: self.config.f_cutoff,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: self.config.oversampling_factor,
            window: WindowFunction::BlackmanHarris2,
        }
    }
}

fn append(output: &mut [Vec<f64>], chunk: Vec<Vec<f64>>) {
    for (plane, produced) in output.iter_mut().zip(chunk) {
        plane.extend(produced);
    }
}

impl Resampler for SincResampler {
    fn name(&self) -> &str {
        "sinc"
    }

    fn resample(&self, input: &PcmBuffer, target_rate: u32) -> Result<PcmBuffer, ConverterError> {
        if target_rate == 0 {
            return Err(ConverterError::invalid_target("sample rate of 0 Hz"));
        }
        if input.sample_rate == target_rate {
            return Ok(input.clone());
        }

        let channels = input.channel_count();
        let frames = input.frames();
        if channels == 0 || frames == 0 {
            return Ok(PcmBuffer::empty(target_rate, channels));
        }

        let ratio = f64::from(target_rate) / f64::from(input.sample_rate);
        let chunk_size = self.config.chunk_size.max(1);
        let mut resampler =
            SincFixedIn::<f64>::new(ratio, 1.0, self.parameters(), chunk_size, channels)
                .map_err(|e| ConverterError::resample_failed(e.to_string()))?;

        let delay = resampler.output_delay();
        let expected = (frames as f64 * ratio).round() as usize;
        let mut output = vec![Vec::with_capacity(expected + delay); channels];

        let mut position = 0;
        while position + chunk_size <= frames {
            let slices: Vec<&[f64]> = input
                .channels
                .iter()
                .map(|plane| &plane[position..position + chunk_size])
                .collect();
            let produced = resampler
                .process(&slices, None)
                .map_err(|e| ConverterError::resample_failed(e.to_string()))?;
            append(&mut output, produced);
            position += chunk_size;
        }

        if position < frames {
            let slices: Vec<&[f64]> = input
                .channels
                .iter()
                .map(|plane| &plane[position..])
                .collect();
            let produced = resampler
                .process_partial(Some(slices.as_slice()), None)
                .map_err(|e| ConverterError::resample_failed(e.to_string()))?;
            append(&mut output, produced);
        }

        // Drain the filter until the delayed tail is out.
        while output[0].len() < expected + delay {
            let produced = resampler
                .process_partial(None::<&[Vec<f64>]>, None)
                .map_err(|e| ConverterError::resample_failed(e.to_string()))?;
            if produced.first().map_or(true, Vec::is_empty) {
                break;
            }
            append(&mut output, produced);
        }

        for plane in &mut output {
            plane.drain(..delay.min(plane.len()));
            plane.truncate(expected);
        }

        let achieved = (f64::from(input.sample_rate) * ratio).round() as u32;
        trace!(
            from = input.sample_rate,
            to = achieved,
            frames_in = frames,
            frames_out = output[0].len(),
            "Resampled buffer"
        );

        Ok(PcmBuffer::new(achieved, output))
    }
}
