//! Audio Buffer Management
//!
//! Core buffer type for the degradation pipeline. Samples are stored
//! non-interleaved (one `Vec<f32>` per channel) and live on the 16-bit
//! full-scale grid: the lo-fi quantizer, the noise amplitude parameter and
//! the final clip are all defined in terms of that range, so decode scales
//! every input bit depth onto it rather than normalizing to [-1, 1].

use crate::error::{Result, RotError};

/// Most positive value a sample may hold after final quantization.
pub const SAMPLE_MAX: f32 = i16::MAX as f32;

/// Most negative value a sample may hold after final quantization.
pub const SAMPLE_MIN: f32 = i16::MIN as f32;

/// Audio channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Single channel (mono)
    Mono,
    /// Two channels (stereo: left, right)
    Stereo,
}

impl ChannelLayout {
    /// Returns the number of channels for this layout
    pub fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    /// Create a ChannelLayout from a channel count
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }
}

/// Core audio buffer type for all processing in Wavrot
///
/// Stores audio as non-interleaved 32-bit floating point samples on the
/// 16-bit full-scale grid. Each channel is a separate `Vec<f32>`; every
/// channel holds the same number of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample data: outer Vec is channels, inner Vec is frames
    pub samples: Vec<Vec<f32>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Create a silent buffer with the given frame count and layout.
    pub fn new(num_frames: usize, layout: ChannelLayout, sample_rate: u32) -> Self {
        Self {
            samples: vec![vec![0.0_f32; num_frames]; layout.num_channels()],
            sample_rate,
        }
    }

    /// Create a buffer from interleaved sample data (L, R, L, R, ... for stereo).
    pub fn from_interleaved(
        interleaved: &[f32],
        layout: ChannelLayout,
        sample_rate: u32,
    ) -> Result<Self> {
        let num_channels = layout.num_channels();

        if interleaved.len() % num_channels != 0 {
            return Err(RotError::DecodeFailure {
                reason: format!(
                    "Interleaved data length {} is not divisible by channel count {}",
                    interleaved.len(),
                    num_channels
                ),
                source: None,
            });
        }

        let num_frames = interleaved.len() / num_channels;
        let mut samples = vec![Vec::with_capacity(num_frames); num_channels];
        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Convert the buffer to interleaved order (L, R, L, R, ... for stereo).
    pub fn to_interleaved(&self) -> Vec<f32> {
        let num_channels = self.channels();
        let num_frames = self.len();
        let mut interleaved = Vec::with_capacity(num_channels * num_frames);
        for frame in 0..num_frames {
            for channel in &self.samples {
                interleaved.push(channel[frame]);
            }
        }
        interleaved
    }

    /// Get the number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Get the number of frames per channel
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer holds no frames
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Get the channel layout
    pub fn layout(&self) -> Option<ChannelLayout> {
        ChannelLayout::from_count(self.channels())
    }

    /// Immutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    /// Mutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.samples[index]
    }

    /// Check that all samples are finite (no NaN/Inf)
    pub fn is_finite(&self) -> bool {
        self.samples
            .iter()
            .flat_map(|ch| ch.iter())
            .all(|s| s.is_finite())
    }

    /// Clip every sample to the signed 16-bit range and round to the
    /// integer grid. Run once, after the restore resample, before encode.
    pub fn clip_and_quantize(&mut self) {
        for channel in &mut self.samples {
            for sample in channel.iter_mut() {
                *sample = sample.clamp(SAMPLE_MIN, SAMPLE_MAX).round();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_buffer(samples: Vec<Vec<f32>>) -> AudioBuffer {
        AudioBuffer {
            samples,
            sample_rate: 44100,
        }
    }

    #[test]
    fn test_channel_layout() {
        assert_eq!(ChannelLayout::Mono.num_channels(), 1);
        assert_eq!(ChannelLayout::Stereo.num_channels(), 2);
        assert_eq!(ChannelLayout::from_count(1), Some(ChannelLayout::Mono));
        assert_eq!(ChannelLayout::from_count(2), Some(ChannelLayout::Stereo));
        assert_eq!(ChannelLayout::from_count(6), None);
    }

    #[test]
    fn test_buffer_new() {
        let buffer = AudioBuffer::new(1000, ChannelLayout::Stereo, 44100);
        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.len(), 1000);
        assert_eq!(buffer.sample_rate, 44100);
    }

    #[test]
    fn test_buffer_duration() {
        let buffer = AudioBuffer::new(22050, ChannelLayout::Mono, 44100);
        assert!((buffer.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_buffer_from_interleaved_stereo() {
        let interleaved = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let buffer =
            AudioBuffer::from_interleaved(&interleaved, ChannelLayout::Stereo, 44100).unwrap();

        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.channel(0), &[0.1, 0.3, 0.5]);
        assert_eq!(buffer.channel(1), &[0.2, 0.4, 0.6]);
    }

    #[test]
    fn test_buffer_from_interleaved_invalid() {
        // 5 samples can't be evenly split into stereo
        let interleaved = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        let result = AudioBuffer::from_interleaved(&interleaved, ChannelLayout::Stereo, 44100);
        assert!(result.is_err());
    }

    #[test]
    fn test_buffer_interleaved_roundtrip() {
        let original = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];
        let buffer =
            AudioBuffer::from_interleaved(&original, ChannelLayout::Stereo, 44100).unwrap();
        assert_eq!(buffer.to_interleaved(), original);
    }

    #[test]
    fn test_buffer_is_finite() {
        let buffer = create_test_buffer(vec![vec![0.5; 100]]);
        assert!(buffer.is_finite());

        let buffer_nan = create_test_buffer(vec![vec![f32::NAN; 100]]);
        assert!(!buffer_nan.is_finite());
    }

    #[test]
    fn test_clip_and_quantize() {
        let mut buffer = create_test_buffer(vec![vec![-40000.0, -0.4, 0.6, 1000.2, 40000.0]]);
        buffer.clip_and_quantize();
        assert_eq!(
            buffer.channel(0),
            &[-32768.0, 0.0, 1.0, 1000.0, 32767.0]
        );
    }
}
