//! Degradation pipeline
//!
//! Runs the stages in their fixed order, threading the working sample rate
//! from the lo-fi stage through to the final restore. Disabled stages leave
//! the buffer bit-identical and consume no randomness, so seeded runs stay
//! comparable across configurations.

use log::{debug, info};
use rand::Rng;

use crate::config::RotConfig;
use crate::dsp::{
    chunk_jumble, lofi_crush, low_pass, noise_bursts, resample, skipping, stereo_shift,
    wow_flutter,
};
use crate::engine::AudioBuffer;
use crate::error::Result;

/// Result of a pipeline run.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Restored, clipped and integer-quantized buffer at the original rate.
    pub buffer: AudioBuffer,
    /// The working rate the buffer spent stages 3-7 at (equals the original
    /// rate when lo-fi was disabled).
    pub working_rate: u32,
}

/// Run the full degradation chain over one buffer.
///
/// Stage order is fixed: low-pass, lo-fi, wow/flutter, skipping, noise
/// bursts, stereo shift, chunk jumbling, then the mandatory restore to the
/// original rate with a clip to the signed 16-bit range.
pub fn degrade(
    buffer: AudioBuffer,
    config: &RotConfig,
    rng: &mut impl Rng,
) -> Result<PipelineOutput> {
    config.validate()?;

    let original_rate = buffer.sample_rate;
    let mut buffer = buffer;

    if config.lowpass.enabled {
        info!("Running stage 1: low-pass filter at {} Hz", config.lowpass.cutoff_hz);
        buffer = low_pass(&buffer, config.lowpass.cutoff_hz, original_rate)?;
    } else {
        debug!("Skipping stage 1 (low-pass)");
    }

    let working_rate = if config.lofi.enabled {
        let (degraded, rate) = lofi_crush(&buffer, config.lofi.min_rate, config.lofi.max_rate, rng)?;
        info!("Running stage 2: lo-fi degradation, working rate {} Hz", rate);
        buffer = degraded;
        rate
    } else {
        debug!("Skipping stage 2 (lo-fi)");
        original_rate
    };

    if config.wow_flutter.enabled {
        info!("Running stage 3: wow and flutter");
        wow_flutter(
            &mut buffer,
            config.wow_flutter.depth_cents,
            config.wow_flutter.window_frames,
            rng,
        )?;
    } else {
        debug!("Skipping stage 3 (wow/flutter)");
    }

    if config.skipping.enabled {
        info!("Running stage 4: skipping effects");
        skipping(&mut buffer, config.skipping.density, rng)?;
    } else {
        debug!("Skipping stage 4 (skipping)");
    }

    if config.noise_bursts.enabled {
        info!("Running stage 5: noise bursts");
        noise_bursts(
            &mut buffer,
            config.noise_bursts.density,
            config.noise_bursts.amplitude,
            rng,
        )?;
    } else {
        debug!("Skipping stage 5 (noise bursts)");
    }

    if config.stereo_shift.enabled {
        info!("Running stage 6: stereo shift");
        stereo_shift(&mut buffer, config.stereo_shift.shift_range, rng)?;
    } else {
        debug!("Skipping stage 6 (stereo shift)");
    }

    if config.chunk_jumble.enabled {
        info!("Running stage 7: chunk jumbling");
        buffer = chunk_jumble(&buffer, config.chunk_jumble.chunk_frames, rng)?;
    } else {
        debug!("Skipping stage 7 (chunk jumbling)");
    }

    info!("Running stage 8: restoring {} Hz", original_rate);
    buffer = resample(&buffer, working_rate, original_rate)?;
    buffer.clip_and_quantize();

    Ok(PipelineOutput {
        buffer,
        working_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{generate_stereo_test_tone, generate_test_tone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Config with every stage off and no corruption.
    fn all_off() -> RotConfig {
        let mut config = RotConfig::default();
        config.lowpass.enabled = false;
        config.lofi.enabled = false;
        config.wow_flutter.enabled = false;
        config.skipping.enabled = false;
        config.noise_bursts.enabled = false;
        config.stereo_shift.enabled = false;
        config.chunk_jumble.enabled = false;
        config.corruption.fraction = 0.0;
        config
    }

    #[test]
    fn test_all_stages_disabled_only_quantizes() {
        let mut tone = generate_test_tone(440.0, 16000.0, 0.5, 44100);
        tone.clip_and_quantize();
        let expected = tone.clone();

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let out = degrade(tone, &all_off(), &mut rng).unwrap();

        assert_eq!(out.working_rate, 44100);
        assert_eq!(out.buffer.samples, expected.samples);

        // And nothing touched the RNG
        let mut fresh = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(rng.gen::<u64>(), fresh.gen::<u64>());
    }

    #[test]
    fn test_lofi_end_to_end_lengths() {
        // 1 second mono tone, lo-fi pinned to 11025 Hz: 11025 working
        // frames, 44100 +/- 1 after restore.
        let tone = generate_test_tone(440.0, 16000.0, 1.0, 44100);
        assert_eq!(tone.len(), 44100);

        let mut config = all_off();
        config.lofi.enabled = true;
        config.lofi.min_rate = 11025;
        config.lofi.max_rate = 11025;

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let (working, rate) = lofi_crush(&tone, 11025, 11025, &mut rng).unwrap();
        assert_eq!(rate, 11025);
        assert_eq!(working.len(), 11025);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let out = degrade(tone, &config, &mut rng).unwrap();
        assert_eq!(out.working_rate, 11025);
        let diff = out.buffer.len() as i64 - 44100;
        assert!(diff.abs() <= 1, "restored length off by {}", diff);
    }

    #[test]
    fn test_length_invariant_without_jumble() {
        let tone = generate_stereo_test_tone(440.0, 660.0, 14000.0, 1.0, 44100);
        let input_len = tone.len();

        let mut config = RotConfig::default();
        config.chunk_jumble.enabled = false;
        config.lofi.min_rate = 22050;
        config.lofi.max_rate = 22050;

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let out = degrade(tone, &config, &mut rng).unwrap();

        let diff = out.buffer.len() as i64 - input_len as i64;
        assert!(diff.abs() <= 1, "length drifted by {} frames", diff);
        assert_eq!(out.buffer.channels(), 2);
        assert_eq!(out.buffer.sample_rate, 44100);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let tone = generate_stereo_test_tone(440.0, 660.0, 14000.0, 1.0, 44100);
        let config = RotConfig::default();

        let mut rng_a = ChaCha8Rng::seed_from_u64(1234);
        let out_a = degrade(tone.clone(), &config, &mut rng_a).unwrap();
        let mut rng_b = ChaCha8Rng::seed_from_u64(1234);
        let out_b = degrade(tone, &config, &mut rng_b).unwrap();

        assert_eq!(out_a.working_rate, out_b.working_rate);
        assert_eq!(out_a.buffer.samples, out_b.buffer.samples);
    }

    #[test]
    fn test_different_seeds_differ() {
        let tone = generate_test_tone(440.0, 16000.0, 1.0, 44100);
        let config = RotConfig::default();

        let mut rng_a = ChaCha8Rng::seed_from_u64(1);
        let out_a = degrade(tone.clone(), &config, &mut rng_a).unwrap();
        let mut rng_b = ChaCha8Rng::seed_from_u64(2);
        let out_b = degrade(tone, &config, &mut rng_b).unwrap();

        assert_ne!(out_a.buffer.samples, out_b.buffer.samples);
    }

    #[test]
    fn test_output_is_integer_quantized_and_clipped() {
        let tone = generate_test_tone(440.0, 30000.0, 0.5, 44100);
        let config = RotConfig::default();

        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let out = degrade(tone, &config, &mut rng).unwrap();

        for channel in &out.buffer.samples {
            for &sample in channel {
                assert_eq!(sample, sample.round());
                assert!((-32768.0..=32767.0).contains(&sample));
            }
        }
    }

    #[test]
    fn test_mono_survives_stereo_shift_stage() {
        let tone = generate_test_tone(440.0, 16000.0, 0.5, 44100);

        let mut config = all_off();
        config.stereo_shift.enabled = true;
        config.stereo_shift.shift_range = 200;

        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let out = degrade(tone.clone(), &config, &mut rng).unwrap();

        let mut expected = tone;
        expected.clip_and_quantize();
        assert_eq!(out.buffer.samples, expected.samples);
    }

    #[test]
    fn test_invalid_stage_parameter_aborts_run() {
        let tone = generate_test_tone(440.0, 16000.0, 0.5, 44100);
        let mut config = all_off();
        config.lowpass.enabled = true;
        config.lowpass.cutoff_hz = 30000.0; // above Nyquist at 44.1 kHz

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(degrade(tone, &config, &mut rng).is_err());
    }
}
