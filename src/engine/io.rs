//! Audio file I/O for Wavrot
//!
//! The codec adapter around the degradation core: decodes a WAV file into
//! an [`AudioBuffer`] and encodes a processed buffer back to 16-bit PCM.
//! The source's native sample rate is preserved on import — the pipeline
//! itself decides when to resample.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::engine::buffer::{AudioBuffer, ChannelLayout, SAMPLE_MAX, SAMPLE_MIN};
use crate::error::{Result, RotError};

/// Import an audio file as a buffer on the 16-bit full-scale grid.
///
/// # Errors
/// * `SourceNotFound` - If the file does not exist
/// * `DecodeFailure` - If the file is not a readable mono/stereo WAV
pub fn import_audio(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(RotError::SourceNotFound {
            path: path.display().to_string(),
        });
    }

    let reader = WavReader::open(path).map_err(|e| RotError::DecodeFailure {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;

    let layout = ChannelLayout::from_count(channels).ok_or_else(|| RotError::DecodeFailure {
        reason: format!("{}-channel audio (only mono/stereo supported)", channels),
        source: None,
    })?;

    let interleaved = read_samples_full_scale(reader, spec.bits_per_sample, spec.sample_format)?;
    if interleaved.is_empty() {
        return Err(RotError::DecodeFailure {
            reason: "Audio contains no samples".to_string(),
            source: None,
        });
    }

    AudioBuffer::from_interleaved(&interleaved, layout, spec.sample_rate)
}

/// Export a buffer as 16-bit signed PCM at the buffer's sample rate.
///
/// The buffer is expected to already sit on the integer grid (see
/// [`AudioBuffer::clip_and_quantize`]); samples are clamped defensively all
/// the same so a stray float cannot wrap during the cast.
pub fn export_audio(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    let spec = WavSpec {
        channels: buffer.channels() as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| RotError::EncodeFailure {
        reason: format!("Failed to create {}: {}", path.display(), e),
    })?;

    for sample in buffer.to_interleaved() {
        let value = sample.clamp(SAMPLE_MIN, SAMPLE_MAX) as i16;
        writer
            .write_sample(value)
            .map_err(|e| RotError::EncodeFailure {
                reason: format!("Failed to write sample: {}", e),
            })?;
    }

    writer.finalize().map_err(|e| RotError::EncodeFailure {
        reason: format!("Failed to finalize {}: {}", path.display(), e),
    })?;

    Ok(())
}

/// Derive the two output paths for a run from the source file's base name.
///
/// `song.flac` + `20260806_120000` becomes
/// `song_intermediate_20260806_120000.wav` (post-DSP, pre-corruption) and
/// `song_rotted_20260806_120000.wav` (final artifact), next to the source.
pub fn output_paths(src: &Path, timestamp: &str) -> (PathBuf, PathBuf) {
    let stem = src
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let dir = src.parent().unwrap_or_else(|| Path::new(""));

    let intermediate = dir.join(format!("{}_intermediate_{}.wav", stem, timestamp));
    let rotted = dir.join(format!("{}_rotted_{}.wav", stem, timestamp));
    (intermediate, rotted)
}

/// Generate a mono sine test tone on the full-scale grid.
pub fn generate_test_tone(
    frequency: f32,
    amplitude: f32,
    duration_secs: f32,
    sample_rate: u32,
) -> AudioBuffer {
    let num_frames = (duration_secs * sample_rate as f32).round() as usize;
    let mut buffer = AudioBuffer::new(num_frames, ChannelLayout::Mono, sample_rate);

    let angular_freq = 2.0 * std::f32::consts::PI * frequency / sample_rate as f32;
    for (i, sample) in buffer.channel_mut(0).iter_mut().enumerate() {
        *sample = amplitude * (angular_freq * i as f32).sin();
    }

    buffer
}

/// Generate a stereo test tone with a different frequency per channel.
pub fn generate_stereo_test_tone(
    freq_left: f32,
    freq_right: f32,
    amplitude: f32,
    duration_secs: f32,
    sample_rate: u32,
) -> AudioBuffer {
    let num_frames = (duration_secs * sample_rate as f32).round() as usize;
    let mut buffer = AudioBuffer::new(num_frames, ChannelLayout::Stereo, sample_rate);

    for (ch, freq) in [freq_left, freq_right].iter().enumerate() {
        let angular_freq = 2.0 * std::f32::consts::PI * freq / sample_rate as f32;
        for (i, sample) in buffer.channel_mut(ch).iter_mut().enumerate() {
            *sample = amplitude * (angular_freq * i as f32).sin();
        }
    }

    buffer
}

/// Read samples from a WAV reader onto the 16-bit full-scale float grid.
fn read_samples_full_scale<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    fn decode_err(reason: String, e: hound::Error) -> RotError {
        RotError::DecodeFailure {
            reason,
            source: Some(Box::new(e)),
        }
    }

    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(|v| v * 32768.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| decode_err(format!("Failed to read float samples: {}", e), e)),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 * 256.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| decode_err(format!("Failed to read 8-bit samples: {}", e), e)),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| decode_err(format!("Failed to read 16-bit samples: {}", e), e)),
            24 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 256.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| decode_err(format!("Failed to read 24-bit samples: {}", e), e)),
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 65536.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| decode_err(format!("Failed to read 32-bit samples: {}", e), e)),
            _ => Err(RotError::DecodeFailure {
                reason: format!("{}-bit integer audio is not supported", bits_per_sample),
                source: None,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generate_test_tone() {
        let buffer = generate_test_tone(440.0, 16000.0, 1.0, 44100);
        assert_eq!(buffer.len(), 44100);
        assert_eq!(buffer.channels(), 1);

        // Peak should approach the requested amplitude
        let peak = buffer
            .channel(0)
            .iter()
            .map(|s| s.abs())
            .fold(0.0_f32, f32::max);
        assert!(peak > 15900.0 && peak <= 16000.0);
    }

    #[test]
    fn test_generate_stereo_test_tone() {
        let buffer = generate_stereo_test_tone(440.0, 880.0, 16000.0, 0.5, 44100);
        assert_eq!(buffer.len(), 22050);
        assert_eq!(buffer.channels(), 2);

        // Left and right channels should be different
        assert!((buffer.channel(0)[100] - buffer.channel(1)[100]).abs() > 1.0);
    }

    #[test]
    fn test_round_trip_mono() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone_mono.wav");

        let mut original = generate_test_tone(440.0, 16000.0, 0.5, 44100);
        original.clip_and_quantize();

        export_audio(&original, &path).unwrap();
        let imported = import_audio(&path).unwrap();

        assert_eq!(imported.len(), original.len());
        assert_eq!(imported.channels(), 1);
        assert_eq!(imported.sample_rate, 44100);

        // 16-bit integers survive the trip exactly
        for (orig, imp) in original.channel(0).iter().zip(imported.channel(0)) {
            assert_eq!(orig, imp);
        }
    }

    #[test]
    fn test_round_trip_stereo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone_stereo.wav");

        let mut original = generate_stereo_test_tone(440.0, 880.0, 12000.0, 0.25, 22050);
        original.clip_and_quantize();

        export_audio(&original, &path).unwrap();
        let imported = import_audio(&path).unwrap();

        assert_eq!(imported.len(), original.len());
        assert_eq!(imported.channels(), 2);
        assert_eq!(imported.sample_rate, 22050);

        for ch in 0..2 {
            for (orig, imp) in original.channel(ch).iter().zip(imported.channel(ch)) {
                assert_eq!(orig, imp);
            }
        }
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_audio(Path::new("/nonexistent/path/audio.wav"));
        match result.unwrap_err() {
            RotError::SourceNotFound { path } => assert!(path.contains("nonexistent")),
            other => panic!("Expected SourceNotFound, got: {:?}", other),
        }
    }

    #[test]
    fn test_import_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("not_audio.wav");
        std::fs::write(&path, b"definitely not a RIFF container").unwrap();

        let result = import_audio(&path);
        assert!(matches!(result, Err(RotError::DecodeFailure { .. })));
    }

    #[test]
    fn test_output_paths() {
        let (intermediate, rotted) =
            output_paths(Path::new("/music/song.flac"), "20260806_120000");
        assert_eq!(
            intermediate,
            PathBuf::from("/music/song_intermediate_20260806_120000.wav")
        );
        assert_eq!(
            rotted,
            PathBuf::from("/music/song_rotted_20260806_120000.wav")
        );
    }
}
