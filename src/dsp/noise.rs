//! Noise burst stage
//!
//! Adds short windows of Gaussian noise at random positions, the crackle
//! of damaged media. Bursts are additive and may overlap; trials run
//! strictly in sequence so a seeded generator fixes the result.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::engine::AudioBuffer;
use crate::error::{Result, RotError};

/// Length of one noise burst in frames.
const BURST_FRAMES: usize = 500;

/// Apply `frames / density` noise-burst trials in place.
///
/// Per trial: one index draw in `[0, frames - 500)`, then independent
/// `Normal(0, amplitude)` samples added over the 500-frame window, drawn
/// frame-major (all channels of a frame before the next frame).
///
/// # Errors
/// `InvalidParameter` when `density` is zero, `amplitude` is negative, or
/// the buffer has no room for the index range (500 frames or fewer).
pub fn noise_bursts(
    buffer: &mut AudioBuffer,
    density: usize,
    amplitude: f32,
    rng: &mut impl Rng,
) -> Result<()> {
    if density == 0 {
        return Err(RotError::invalid_parameter(
            "noise-bursts",
            "density must be positive",
        ));
    }

    let normal = Normal::new(0.0_f64, amplitude as f64).map_err(|e| {
        RotError::invalid_parameter("noise-bursts", format!("bad amplitude {}: {}", amplitude, e))
    })?;

    let frames = buffer.len();
    if frames <= BURST_FRAMES {
        return Err(RotError::invalid_parameter(
            "noise-bursts",
            format!(
                "buffer of {} frames is too short (need more than {})",
                frames, BURST_FRAMES
            ),
        ));
    }

    let channels = buffer.channels();
    let trials = frames / density;
    for _ in 0..trials {
        let start = rng.gen_range(0..frames - BURST_FRAMES);
        for frame in start..start + BURST_FRAMES {
            for ch in 0..channels {
                buffer.samples[ch][frame] += normal.sample(rng) as f32;
            }
        }
    }

    Ok(())
}
