//! Byte Corruption Engine
//!
//! The one stage that works on the encoded container instead of samples:
//! random byte overwrites simulating storage and transmission bit rot,
//! including damage to the file structure itself. Only a short header
//! prefix is spared so the container stays recognizable.

use rand::Rng;

use crate::error::{Result, RotError};

/// Upper bound on the protected header prefix in bytes.
const MAX_HEADER_BYTES: usize = 4096;

/// Length of the protected header region for a container of `total_len`
/// bytes: `min(4096, total_len / 20)`.
pub fn header_region_len(total_len: usize) -> usize {
    MAX_HEADER_BYTES.min(total_len / 20)
}

/// Overwrite random bytes of an encoded artifact in place.
///
/// Performs exactly `floor((len - header) * fraction)` write attempts, each
/// picking a position uniformly from the corruptible region with
/// replacement (a position may be rewritten more than once) and storing a
/// uniformly random byte. Returns the number of write attempts.
///
/// # Errors
/// `InvalidParameter` when `fraction` is outside [0, 1].
pub fn corrupt_bytes(data: &mut [u8], fraction: f64, rng: &mut impl Rng) -> Result<usize> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(RotError::invalid_parameter(
            "byte-corruption",
            format!("fraction must be within [0, 1], got {}", fraction),
        ));
    }

    let total_len = data.len();
    let header_len = header_region_len(total_len);
    let corruptible_len = total_len - header_len;

    let attempts = (corruptible_len as f64 * fraction).floor() as usize;
    for _ in 0..attempts {
        let index = rng.gen_range(header_len..total_len);
        data[index] = rng.gen::<u8>();
    }

    Ok(attempts)
}
