//! Error handling for wavlib
//!
//! Every fallible operation returns [`Result`]. Errors carry a recovery hint
//! so callers can decide whether re-invoking with different input makes sense.

use thiserror::Error;

/// Result type alias for wavlib operations
pub type Result<T> = std::result::Result<T, WavError>;

/// Main error type for wavlib operations
#[derive(Error, Debug)]
pub enum WavError {
    // Stream errors
    #[error("Failed to open stream: {path}")]
    StreamOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Container errors
    #[error("Invalid WAV container: {reason}")]
    Format { reason: String },

    #[error("Unsupported bit depth: {bits} (expected 8..=32)")]
    UnsupportedBitDepth { bits: u16 },

    #[error("Payload of {samples} samples x {width} bytes does not fit a 32-bit data size")]
    PayloadTooLarge { samples: usize, width: usize },

    // Codec errors
    #[error("Unsupported sample width: {width} bytes (expected 1..=4)")]
    UnsupportedSampleWidth { width: usize },

    #[error("Unsupported integer width: {width} bytes (expected 1, 2, 4 or 8)")]
    UnsupportedIntegerWidth { width: usize },

    #[error("Truncated sample frame: expected {expected} bytes, got {actual}")]
    TruncatedFrame { expected: usize, actual: usize },

    // DSP errors
    #[error("Invalid window length: {length} (minimum 1)")]
    WindowLength { length: usize },

    #[error("Padding {pad:?} out of range for input of length {len}")]
    PaddingRange { pad: [usize; 2], len: usize },

    // Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Generic I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WavError {
    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::StreamOpen { .. } => "Check that the path exists and is readable/writable",
            Self::Format { .. } => "Provide a RIFF/WAVE file with a PCM format chunk",
            Self::UnsupportedBitDepth { .. } => "Convert the audio to 8, 16, 24 or 32-bit PCM",
            Self::PayloadTooLarge { .. } => "Split the audio into files under 4 GiB",
            Self::UnsupportedSampleWidth { .. } | Self::UnsupportedIntegerWidth { .. } => {
                "Use one of the supported byte widths"
            }
            Self::TruncatedFrame { .. } => "Supply a full sample frame",
            Self::WindowLength { .. } => "Request a window of at least one sample",
            Self::PaddingRange { .. } => "Reduce the padding or lengthen the input",
            Self::InvalidConfig { .. } => "Fix the configuration value and reload",
            _ => "Check the error details and try again",
        }
    }
}
