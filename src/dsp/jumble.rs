//! Chunk jumbling stage
//!
//! Partitions the buffer into fixed-size chunks and rebuilds it with some
//! chunks dropped, duplicated or replaced by random chunks of the original
//! partition — the sound of a file reassembled from damaged storage.
//! Output length is whatever survives; callers must recompute it.

use rand::Rng;

use crate::engine::AudioBuffer;
use crate::error::{Result, RotError};

/// Per-chunk outcome thresholds on a uniform draw in [0, 1).
const P_DROP: f64 = 0.05;
const P_DUPLICATE: f64 = 0.15;
const P_SUBSTITUTE: f64 = 0.25;

/// Rebuild the buffer from jumbled chunks.
///
/// Per original chunk, one uniform draw decides: drop (< 0.05), emit twice
/// (< 0.15), emit a uniformly random chunk of the *original* partition
/// instead (< 0.25, fresh index draw each time, with replacement), or keep.
/// Chunks are `chunk_frames` long; the final chunk may be shorter, and a
/// substituted chunk keeps its own length.
pub fn chunk_jumble(
    buffer: &AudioBuffer,
    chunk_frames: usize,
    rng: &mut impl Rng,
) -> Result<AudioBuffer> {
    if chunk_frames == 0 {
        return Err(RotError::invalid_parameter(
            "chunk-jumble",
            "chunk_frames must be positive",
        ));
    }

    let frames = buffer.len();
    let chunks: Vec<(usize, usize)> = (0..frames)
        .step_by(chunk_frames)
        .map(|start| (start, (start + chunk_frames).min(frames)))
        .collect();

    let mut emitted: Vec<(usize, usize)> = Vec::with_capacity(chunks.len());
    for &chunk in &chunks {
        let r = rng.gen::<f64>();
        if r < P_DROP {
            continue;
        } else if r < P_DUPLICATE {
            emitted.push(chunk);
            emitted.push(chunk);
        } else if r < P_SUBSTITUTE {
            emitted.push(chunks[rng.gen_range(0..chunks.len())]);
        } else {
            emitted.push(chunk);
        }
    }

    let out_frames: usize = emitted.iter().map(|&(start, end)| end - start).sum();
    let mut output = AudioBuffer {
        samples: Vec::with_capacity(buffer.channels()),
        sample_rate: buffer.sample_rate,
    };
    for channel in &buffer.samples {
        let mut rebuilt = Vec::with_capacity(out_frames);
        for &(start, end) in &emitted {
            rebuilt.extend_from_slice(&channel[start..end]);
        }
        output.samples.push(rebuilt);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ChannelLayout;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ramp_buffer(frames: usize, layout: ChannelLayout) -> AudioBuffer {
        let mut buffer = AudioBuffer::new(frames, layout, 44100);
        for channel in &mut buffer.samples {
            for (i, sample) in channel.iter_mut().enumerate() {
                *sample = i as f32;
            }
        }
        buffer
    }

    #[test]
    fn test_output_is_concatenation_of_original_chunks() {
        let buffer = ramp_buffer(16384, ChannelLayout::Mono);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let jumbled = chunk_jumble(&buffer, 1024, &mut rng).unwrap();

        // Every emitted chunk must start on an original chunk boundary and
        // be internally contiguous
        let samples = jumbled.channel(0);
        let mut i = 0;
        while i < samples.len() {
            let first = samples[i] as usize;
            assert_eq!(first % 1024, 0, "chunk starts off-boundary at {}", first);
            let chunk_len = 1024.min(16384 - first);
            for k in 0..chunk_len {
                assert_eq!(samples[i + k], (first + k) as f32);
            }
            i += chunk_len;
        }
    }

    #[test]
    fn test_length_varies_with_seed() {
        let buffer = ramp_buffer(65536, ChannelLayout::Mono);
        let lengths: Vec<usize> = (0..8)
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                chunk_jumble(&buffer, 1024, &mut rng).unwrap().len()
            })
            .collect();
        assert!(
            lengths.iter().any(|&l| l != lengths[0]),
            "drop/duplicate never changed the length across seeds: {:?}",
            lengths
        );
    }

    #[test]
    fn test_deterministic_under_seed() {
        let buffer = ramp_buffer(32768, ChannelLayout::Mono);
        let mut rng_a = ChaCha8Rng::seed_from_u64(33);
        let mut rng_b = ChaCha8Rng::seed_from_u64(33);
        let a = chunk_jumble(&buffer, 1024, &mut rng_a).unwrap();
        let b = chunk_jumble(&buffer, 1024, &mut rng_b).unwrap();
        assert_eq!(a.samples, b.samples);
    }

    #[test]
    fn test_channels_jumbled_identically() {
        let buffer = ramp_buffer(32768, ChannelLayout::Stereo);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let jumbled = chunk_jumble(&buffer, 1024, &mut rng).unwrap();
        assert_eq!(jumbled.channel(0), jumbled.channel(1));
    }

    #[test]
    fn test_short_final_chunk_kept() {
        // 2100 frames with 1024-frame chunks: partition is 1024/1024/52
        let buffer = ramp_buffer(2100, ChannelLayout::Mono);
        // A seed whose draws keep everything gives exactly the input back
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let jumbled = chunk_jumble(&buffer, 1024, &mut rng).unwrap();
            if jumbled.samples == buffer.samples {
                return;
            }
        }
        panic!("no seed in 0..64 left a 3-chunk buffer unchanged");
    }

    #[test]
    fn test_zero_chunk_frames_is_invalid() {
        let buffer = ramp_buffer(2048, ChannelLayout::Mono);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            chunk_jumble(&buffer, 0, &mut rng),
            Err(RotError::InvalidParameter { .. })
        ));
    }
}
