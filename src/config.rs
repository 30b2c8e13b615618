//! Configuration
//!
//! Tunables for chunked WAV streaming and default window shapes. Every field
//! has a default, so partial JSON documents are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WavError};

/// Samples per scratch chunk when streaming payloads (1024 x 1024)
pub const DEFAULT_CHUNK_SAMPLES: usize = 1024 * 1024;

/// Default Hamming coefficients
pub const DEFAULT_HAMMING_ALPHA: f32 = 0.54;
pub const DEFAULT_HAMMING_BETA: f32 = 0.46;

/// Default Kaiser shape parameter
pub const DEFAULT_KAISER_BETA: f32 = 12.0;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub io: IoConfig,
    pub window: WindowConfig,
}

/// Streaming I/O settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Number of samples decoded or encoded per scratch buffer fill.
    /// Memory use during load/dump is `chunk_samples * sample_width` bytes.
    pub chunk_samples: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        IoConfig {
            chunk_samples: DEFAULT_CHUNK_SAMPLES,
        }
    }
}

impl IoConfig {
    /// Create an I/O config with the given chunk size
    pub fn with_chunk_samples(chunk_samples: usize) -> Self {
        IoConfig { chunk_samples }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_samples == 0 {
            return Err(WavError::InvalidConfig {
                reason: "io.chunk_samples must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Default shape parameters for parameterised windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub hamming_alpha: f32,
    pub hamming_beta: f32,
    pub kaiser_beta: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            hamming_alpha: DEFAULT_HAMMING_ALPHA,
            hamming_beta: DEFAULT_HAMMING_BETA,
            kaiser_beta: DEFAULT_KAISER_BETA,
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| WavError::StreamOpen {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.io.validate()?;
        if !self.window.kaiser_beta.is_finite() {
            return Err(WavError::InvalidConfig {
                reason: "window.kaiser_beta must be finite".to_string(),
            });
        }
        Ok(())
    }
}
