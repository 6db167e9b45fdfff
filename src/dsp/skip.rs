//! Skipping stage
//!
//! Random dropout and stutter trials over the buffer: half the trials
//! silence a run of frames, the other half tile a 10-frame snippet across
//! the run like a looping, damaged playback head. Trials run strictly in
//! sequence and may overlap; later trials compound on earlier ones.

use rand::Rng;

use crate::engine::AudioBuffer;
use crate::error::{Result, RotError};

/// Frames kept clear at the end of the buffer when picking a trial start.
const START_MARGIN: usize = 2000;

/// Length of the snippet tiled across a stutter run.
const SNIPPET_FRAMES: usize = 10;

/// Bounds of the per-trial run length draw (inclusive).
const RUN_MIN: usize = 100;
const RUN_MAX: usize = 800;

/// Apply `frames / density` skip trials in place.
///
/// Per trial the draws are, in order: start in `[0, frames - 2000)`, run
/// length in `[100, 800]`, then a coin flip between silencing the run and
/// tiling the snippet at `start` across it. Draws happen once per trial and
/// apply to every channel.
///
/// # Errors
/// `InvalidParameter` when `density` is zero or the buffer has no room for
/// the start range (2000 frames or fewer).
pub fn skipping(buffer: &mut AudioBuffer, density: usize, rng: &mut impl Rng) -> Result<()> {
    if density == 0 {
        return Err(RotError::invalid_parameter(
            "skipping",
            "density must be positive",
        ));
    }

    let frames = buffer.len();
    if frames <= START_MARGIN {
        return Err(RotError::invalid_parameter(
            "skipping",
            format!(
                "buffer of {} frames is too short (need more than {})",
                frames, START_MARGIN
            ),
        ));
    }

    let trials = frames / density;
    for _ in 0..trials {
        let start = rng.gen_range(0..frames - START_MARGIN);
        let run_len = rng.gen_range(RUN_MIN..=RUN_MAX);

        if rng.gen::<f64>() < 0.5 {
            // Dropout: silence the run
            for channel in &mut buffer.samples {
                channel[start..start + run_len].fill(0.0);
            }
        } else {
            // Stutter: tile the snippet at `start` in 10-frame blocks.
            // The snippet is captured before writing; the final block may
            // overshoot the nominal run end by up to 9 frames.
            for channel in &mut buffer.samples {
                let snippet: Vec<f32> = channel[start..start + SNIPPET_FRAMES].to_vec();
                let mut i = start;
                while i < start + run_len {
                    channel[i..i + SNIPPET_FRAMES].copy_from_slice(&snippet);
                    i += SNIPPET_FRAMES;
                }
            }
        }
    }

    Ok(())
}
