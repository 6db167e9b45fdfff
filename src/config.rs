//! Run configuration
//!
//! One record per degradation stage, plus the byte-corruption fraction.
//! A config is built once (CLI flags or a JSON file), validated once at the
//! boundary, and read-only for the rest of the run. Defaults reproduce the
//! suggested settings of the interactive front end.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RotError};

/// Stage 1: low-pass filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowpassConfig {
    pub enabled: bool,
    /// Cutoff frequency in Hz; must lie strictly between 0 and Nyquist.
    pub cutoff_hz: f32,
}

/// Stage 2: lo-fi downsampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LofiConfig {
    pub enabled: bool,
    /// Lower bound of the working sample rate draw (inclusive).
    pub min_rate: u32,
    /// Upper bound of the working sample rate draw (inclusive).
    pub max_rate: u32,
}

/// Stage 3: wow & flutter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WowFlutterConfig {
    pub enabled: bool,
    /// Maximum pitch deviation per window, in musical cents.
    pub depth_cents: f32,
    /// Window length in frames; deviations are drawn per window.
    pub window_frames: usize,
}

/// Stage 4: skipping (dropouts and stutter loops).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippingConfig {
    pub enabled: bool,
    /// Trial count is `frames / density`; lower density means more skips.
    pub density: usize,
}

/// Stage 5: noise bursts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseBurstConfig {
    pub enabled: bool,
    /// Trial count is `frames / density`.
    pub density: usize,
    /// Standard deviation of the Gaussian noise, in full-scale sample units.
    pub amplitude: f32,
}

/// Stage 6: stereo channel misalignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StereoShiftConfig {
    pub enabled: bool,
    /// The left channel is rotated by a draw from `[-shift_range, shift_range]`.
    pub shift_range: i64,
}

/// Stage 7: chunk jumbling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkJumbleConfig {
    pub enabled: bool,
    /// Chunk length in frames.
    pub chunk_frames: usize,
}

/// Byte-level corruption of the encoded artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorruptionConfig {
    /// Fraction of the corruptible region to overwrite, in [0, 1].
    pub fraction: f64,
}

/// Full configuration for one degradation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotConfig {
    pub lowpass: LowpassConfig,
    pub lofi: LofiConfig,
    pub wow_flutter: WowFlutterConfig,
    pub skipping: SkippingConfig,
    pub noise_bursts: NoiseBurstConfig,
    pub stereo_shift: StereoShiftConfig,
    pub chunk_jumble: ChunkJumbleConfig,
    pub corruption: CorruptionConfig,
}

impl Default for RotConfig {
    fn default() -> Self {
        Self {
            lowpass: LowpassConfig {
                enabled: true,
                cutoff_hz: 7000.0,
            },
            lofi: LofiConfig {
                enabled: true,
                min_rate: 8000,
                max_rate: 11025,
            },
            wow_flutter: WowFlutterConfig {
                enabled: true,
                depth_cents: 150.0,
                window_frames: 512,
            },
            skipping: SkippingConfig {
                enabled: true,
                density: 8000,
            },
            noise_bursts: NoiseBurstConfig {
                enabled: true,
                density: 8000,
                amplitude: 4000.0,
            },
            stereo_shift: StereoShiftConfig {
                enabled: true,
                shift_range: 200,
            },
            chunk_jumble: ChunkJumbleConfig {
                enabled: true,
                chunk_frames: 1024,
            },
            corruption: CorruptionConfig { fraction: 0.001 },
        }
    }
}

impl RotConfig {
    /// One-time boundary validation. Rate-dependent domains (cutoff vs.
    /// Nyquist, buffer-length minima) are re-checked by the stages
    /// themselves once the decoded buffer is known.
    pub fn validate(&self) -> Result<()> {
        if self.lowpass.enabled && self.lowpass.cutoff_hz <= 0.0 {
            return Err(RotError::invalid_parameter(
                "low-pass",
                format!("cutoff must be positive, got {}", self.lowpass.cutoff_hz),
            ));
        }

        if self.lofi.enabled {
            if self.lofi.min_rate == 0 {
                return Err(RotError::invalid_parameter(
                    "lo-fi",
                    "min_rate must be positive",
                ));
            }
            if self.lofi.min_rate > self.lofi.max_rate {
                return Err(RotError::invalid_parameter(
                    "lo-fi",
                    format!(
                        "min_rate {} exceeds max_rate {}",
                        self.lofi.min_rate, self.lofi.max_rate
                    ),
                ));
            }
        }

        if self.wow_flutter.enabled {
            if self.wow_flutter.window_frames == 0 {
                return Err(RotError::invalid_parameter(
                    "wow-flutter",
                    "window_frames must be positive",
                ));
            }
            if self.wow_flutter.depth_cents < 0.0 {
                return Err(RotError::invalid_parameter(
                    "wow-flutter",
                    format!(
                        "depth_cents must be non-negative, got {}",
                        self.wow_flutter.depth_cents
                    ),
                ));
            }
        }

        if self.skipping.enabled && self.skipping.density == 0 {
            return Err(RotError::invalid_parameter(
                "skipping",
                "density must be positive",
            ));
        }

        if self.noise_bursts.enabled {
            if self.noise_bursts.density == 0 {
                return Err(RotError::invalid_parameter(
                    "noise-bursts",
                    "density must be positive",
                ));
            }
            if self.noise_bursts.amplitude < 0.0 {
                return Err(RotError::invalid_parameter(
                    "noise-bursts",
                    format!(
                        "amplitude must be non-negative, got {}",
                        self.noise_bursts.amplitude
                    ),
                ));
            }
        }

        if self.stereo_shift.enabled && self.stereo_shift.shift_range < 0 {
            return Err(RotError::invalid_parameter(
                "stereo-shift",
                format!(
                    "shift_range must be non-negative, got {}",
                    self.stereo_shift.shift_range
                ),
            ));
        }

        if self.chunk_jumble.enabled && self.chunk_jumble.chunk_frames == 0 {
            return Err(RotError::invalid_parameter(
                "chunk-jumble",
                "chunk_frames must be positive",
            ));
        }

        if !(0.0..=1.0).contains(&self.corruption.fraction) {
            return Err(RotError::invalid_parameter(
                "byte-corruption",
                format!(
                    "fraction must be within [0, 1], got {}",
                    self.corruption.fraction
                ),
            ));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: RotConfig = serde_json::from_str(&text)?;
        Ok(config)
    }
}
