//! Error handling for Wavrot
//!
//! Every error is terminal for the run: no retries, no silent clamping.
//! Parameter validation happens once at the boundary; the offending stage
//! still raises `InvalidParameter` for rate-dependent domains it alone can
//! check (e.g. cutoff vs. Nyquist).

use thiserror::Error;

/// Result type alias for Wavrot operations
pub type Result<T> = std::result::Result<T, RotError>;

/// Main error type for Wavrot operations
#[derive(Error, Debug)]
pub enum RotError {
    /// A stage received an out-of-domain numeric argument.
    #[error("Invalid parameter in {stage}: {reason}")]
    InvalidParameter { stage: &'static str, reason: String },

    /// The input path does not exist.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: String },

    /// The input file exists but could not be decoded.
    #[error("Failed to decode audio: {reason}")]
    DecodeFailure {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Writing an output container failed.
    #[error("Failed to encode audio: {reason}")]
    EncodeFailure { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl RotError {
    /// Shorthand for the most common error in the DSP layer.
    pub fn invalid_parameter(stage: &'static str, reason: impl Into<String>) -> Self {
        RotError::InvalidParameter {
            stage,
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            RotError::InvalidParameter { .. } => "INVALID_PARAMETER",
            RotError::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            RotError::DecodeFailure { .. } => "DECODE_FAILURE",
            RotError::EncodeFailure { .. } => "ENCODE_FAILURE",
            RotError::Io(_) => "IO_ERROR",
            RotError::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = RotError::SourceNotFound {
            path: "missing.wav".to_string(),
        };
        assert_eq!(err.error_code(), "SOURCE_NOT_FOUND");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = RotError::invalid_parameter("low-pass", "cutoff 30000 Hz is at or above Nyquist");
        let msg = err.to_string();
        assert!(msg.contains("low-pass"));
        assert!(msg.contains("30000"));
    }
}
