//! Low-pass filter stage
//!
//! 4th-order Butterworth low-pass built from two cascaded biquad sections,
//! coefficients from the Audio EQ Cookbook formulas.
//! Reference: https://www.w3.org/2011/audio/audio-eq-cookbook.html

use std::f64::consts::PI;

use crate::engine::AudioBuffer;
use crate::error::{Result, RotError};

/// Q values of the two sections of a 4th-order Butterworth cascade:
/// 1 / (2 cos(pi/8)) and 1 / (2 cos(3 pi/8)).
const BUTTERWORTH_Q: [f64; 2] = [0.541196100146197, 1.3065629648763764];

/// Biquad filter coefficients, normalized by a0.
/// Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
#[derive(Debug, Clone, Copy)]
struct BiquadCoeffs {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl BiquadCoeffs {
    fn low_pass(normalized_cutoff: f64, q: f64) -> Self {
        let w0 = PI * normalized_cutoff;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);

        let b0 = (1.0 - cos_w0) / 2.0;
        let b1 = 1.0 - cos_w0;
        let b2 = (1.0 - cos_w0) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_w0;
        let a2 = 1.0 - alpha;

        BiquadCoeffs {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Biquad filter state for one channel (Direct Form II)
#[derive(Debug, Clone, Copy, Default)]
struct BiquadState {
    w1: f64,
    w2: f64,
}

impl BiquadState {
    #[inline]
    fn process(&mut self, input: f64, c: &BiquadCoeffs) -> f64 {
        let w0 = input - c.a1 * self.w1 - c.a2 * self.w2;
        let output = c.b0 * w0 + c.b1 * self.w1 + c.b2 * self.w2;
        self.w2 = self.w1;
        self.w1 = w0;
        output
    }
}

/// Apply a 4th-order Butterworth low-pass to the whole buffer.
///
/// Returns a new buffer of identical length. The same coefficients are used
/// for every channel; filter state starts at zero per channel (single causal
/// pass over the buffer).
///
/// # Errors
/// `InvalidParameter` when `cutoff_hz / (sample_rate / 2)` is not strictly
/// inside (0, 1).
pub fn low_pass(buffer: &AudioBuffer, cutoff_hz: f32, sample_rate: u32) -> Result<AudioBuffer> {
    if sample_rate == 0 {
        return Err(RotError::invalid_parameter(
            "low-pass",
            "sample rate must be positive",
        ));
    }

    let nyquist = sample_rate as f64 / 2.0;
    let normalized = cutoff_hz as f64 / nyquist;
    if normalized <= 0.0 || normalized >= 1.0 {
        return Err(RotError::invalid_parameter(
            "low-pass",
            format!(
                "cutoff {} Hz is outside (0, {} Hz) at {} Hz sample rate",
                cutoff_hz, nyquist, sample_rate
            ),
        ));
    }

    // Coefficients depend only on cutoff and rate: computed once, shared by
    // both channels.
    let sections: Vec<BiquadCoeffs> = BUTTERWORTH_Q
        .iter()
        .map(|&q| BiquadCoeffs::low_pass(normalized, q))
        .collect();

    let mut output = buffer.clone();
    for channel in &mut output.samples {
        for coeffs in &sections {
            let mut state = BiquadState::default();
            for sample in channel.iter_mut() {
                *sample = state.process(*sample as f64, coeffs) as f32;
            }
        }
    }

    Ok(output)
}
