//! Resampling engine
//!
//! Band-limited windowed-sinc interpolation between two sample rates. Used
//! twice per run: once to drop to the randomly chosen working rate and once
//! to restore the original rate. The degrade/restore round trip is
//! intentionally lossy; what the engine does guarantee is the output length:
//! exactly `round(frames * target_rate / source_rate)` frames.

use std::f64::consts::PI;

use crate::engine::AudioBuffer;
use crate::error::{Result, RotError};

/// Sinc half-width in input samples at unity cutoff. Widened by the cutoff
/// ratio when downsampling so the anti-aliasing sinc keeps enough lobes.
const SINC_HALF_WIDTH: f64 = 32.0;

/// Resample a buffer from `source_rate` to `target_rate`.
///
/// Preserves channel count. Output length is
/// `round(frames * target_rate / source_rate)`.
///
/// # Errors
/// `InvalidParameter` on a zero rate or a zero-length output.
pub fn resample(buffer: &AudioBuffer, source_rate: u32, target_rate: u32) -> Result<AudioBuffer> {
    if source_rate == 0 || target_rate == 0 {
        return Err(RotError::invalid_parameter(
            "resample",
            format!("rates must be positive, got {} -> {}", source_rate, target_rate),
        ));
    }

    let source_len = buffer.len();
    let ratio = target_rate as f64 / source_rate as f64;
    let target_len = (source_len as f64 * ratio).round() as usize;
    if target_len == 0 {
        return Err(RotError::invalid_parameter(
            "resample",
            format!(
                "target length is zero ({} frames at {} -> {} Hz)",
                source_len, source_rate, target_rate
            ),
        ));
    }

    if source_rate == target_rate {
        let mut output = buffer.clone();
        output.sample_rate = target_rate;
        return Ok(output);
    }

    // Anti-aliasing: when downsampling, the sinc cutoff drops to the target
    // Nyquist and the window widens to keep the same number of lobes.
    let cutoff = ratio.min(1.0);
    let half_width = (SINC_HALF_WIDTH / cutoff).ceil();
    let step = source_rate as f64 / target_rate as f64;

    let mut output = AudioBuffer {
        samples: Vec::with_capacity(buffer.channels()),
        sample_rate: target_rate,
    };

    for channel in &buffer.samples {
        let mut resampled = Vec::with_capacity(target_len);
        for i in 0..target_len {
            let pos = i as f64 * step;
            let j_min = ((pos - half_width).ceil() as isize).max(0);
            let j_max = ((pos + half_width).floor() as isize).min(source_len as isize - 1);

            let mut acc = 0.0_f64;
            for j in j_min..=j_max {
                let d = pos - j as f64;
                acc += channel[j as usize] as f64 * cutoff * sinc(cutoff * d) * hann(d / half_width);
            }
            resampled.push(acc as f32);
        }
        output.samples.push(resampled);
    }

    Ok(output)
}

/// Normalized sinc: sin(pi x) / (pi x).
#[inline]
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Hann window over [-1, 1].
#[inline]
fn hann(x: f64) -> f64 {
    if x.abs() >= 1.0 {
        0.0
    } else {
        0.5 * (1.0 + (PI * x).cos())
    }
}
