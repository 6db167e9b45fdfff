//! Stereo misalignment stage
//!
//! Circularly rotates the left channel by a random frame count while the
//! right channel stays put, smearing the stereo image with inter-channel
//! phase error. Mono buffers pass through untouched and consume no
//! randomness.

use rand::Rng;

use crate::engine::AudioBuffer;
use crate::error::{Result, RotError};

/// Rotate the left channel by a draw from `[-shift_range, shift_range]`.
/// Positive shifts move samples toward later frames (wrapping at the end).
pub fn stereo_shift(
    buffer: &mut AudioBuffer,
    shift_range: i64,
    rng: &mut impl Rng,
) -> Result<()> {
    if shift_range < 0 {
        return Err(RotError::invalid_parameter(
            "stereo-shift",
            format!("shift_range must be non-negative, got {}", shift_range),
        ));
    }

    if buffer.channels() != 2 {
        return Ok(());
    }

    let frames = buffer.len();
    if frames == 0 {
        return Ok(());
    }

    let shift = rng.gen_range(-shift_range..=shift_range);
    let rotation = shift.rem_euclid(frames as i64) as usize;
    buffer.channel_mut(0).rotate_right(rotation);

    Ok(())
}
