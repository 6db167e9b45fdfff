//! Lo-fi degradation stage
//!
//! Drops the buffer to a randomly chosen working sample rate and coarsens
//! the amplitude grid to multiples of 256 (a 16-bit signal reduced to an
//! effective 8 bits). The working rate persists until the final restore.

use rand::Rng;

use crate::dsp::resample::resample;
use crate::engine::AudioBuffer;
use crate::error::{Result, RotError};

/// Amplitude quantization step on the full-scale grid.
const QUANT_STEP: f32 = 256.0;

/// Resample to a working rate drawn uniformly from `min_rate..=max_rate`
/// and quantize every sample to the nearest multiple of 256.
///
/// Returns the degraded buffer and the working rate it now plays at.
pub fn lofi_crush(
    buffer: &AudioBuffer,
    min_rate: u32,
    max_rate: u32,
    rng: &mut impl Rng,
) -> Result<(AudioBuffer, u32)> {
    if min_rate == 0 {
        return Err(RotError::invalid_parameter(
            "lo-fi",
            "min_rate must be positive",
        ));
    }
    if min_rate > max_rate {
        return Err(RotError::invalid_parameter(
            "lo-fi",
            format!("min_rate {} exceeds max_rate {}", min_rate, max_rate),
        ));
    }

    let working_rate = rng.gen_range(min_rate..=max_rate);
    let mut degraded = resample(buffer, buffer.sample_rate, working_rate)?;

    for channel in &mut degraded.samples {
        for sample in channel.iter_mut() {
            *sample = (*sample / QUANT_STEP).round() * QUANT_STEP;
        }
    }

    Ok((degraded, working_rate))
}
