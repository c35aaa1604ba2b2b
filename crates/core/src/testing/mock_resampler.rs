//! Resampler doubles.

use crate::converter::{ConverterError, PcmBuffer, Resampler};

/// Resampler that reports a fixed output rate regardless of the request.
///
/// Frames are repeated or dropped by nearest neighbour so lengths still
/// follow the requested ratio.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateResampler {
    achieved_rate: u32,
}

impl FixedRateResampler {
    pub fn new(achieved_rate: u32) -> Self {
        Self { achieved_rate }
    }
}

impl Resampler for FixedRateResampler {
    fn name(&self) -> &str {
        "fixed-rate"
    }

    fn resample(&self, input: &PcmBuffer, target_rate: u32) -> Result<PcmBuffer, ConverterError> {
        let ratio = f64::from(target_rate) / f64::from(input.sample_rate.max(1));
        let frames = (input.frames() as f64 * ratio).round() as usize;
        let channels = input
            .channels
            .iter()
            .map(|plane| {
                (0..frames)
                    .filter_map(|n| plane.get((n as f64 / ratio) as usize).copied())
                    .collect()
            })
            .collect();
        Ok(PcmBuffer::new(self.achieved_rate, channels))
    }
}
