//! Wow & flutter stage
//!
//! Splits the buffer into consecutive windows and scales each by a gain
//! drawn from an independent pitch deviation in cents. Deviations are
//! deliberately discontinuous across windows; the result is the jittery
//! warble of an unstable playback mechanism rather than a smooth vibrato.

use rand::Rng;

use crate::engine::AudioBuffer;
use crate::error::{Result, RotError};

/// Apply per-window flutter gains in place.
///
/// Each non-overlapping `window_frames` window (the final one may be
/// shorter) is scaled by `2^(d / 1200)` where `d` is drawn uniformly from
/// `[-depth_cents, depth_cents]`. One draw per window, shared across
/// channels.
pub fn wow_flutter(
    buffer: &mut AudioBuffer,
    depth_cents: f32,
    window_frames: usize,
    rng: &mut impl Rng,
) -> Result<()> {
    if window_frames == 0 {
        return Err(RotError::invalid_parameter(
            "wow-flutter",
            "window_frames must be positive",
        ));
    }
    if depth_cents < 0.0 {
        return Err(RotError::invalid_parameter(
            "wow-flutter",
            format!("depth_cents must be non-negative, got {}", depth_cents),
        ));
    }

    let frames = buffer.len();
    let depth = depth_cents as f64;

    let mut start = 0;
    while start < frames {
        let end = (start + window_frames).min(frames);
        let deviation = rng.gen_range(-depth..=depth);
        let scale = (2.0_f64).powf(deviation / 1200.0) as f32;

        for channel in &mut buffer.samples {
            for sample in &mut channel[start..end] {
                *sample *= scale;
            }
        }
        start = end;
    }

    Ok(())
}
