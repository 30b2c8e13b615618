//! wavlib - PCM WAV codec and spectral preprocessing primitives
//!
//! Reads and writes canonical RIFF/WAVE PCM files at 8, 16, 24 and 32 bits,
//! widening every sample to `i32`, and generates the analysis windows and
//! padded buffers a spectral transform stage consumes.
//!
//! # Modules
//! - `codec`: endian-aware integers and PCM sample widening
//! - `audio`: `AudioBuffer` and WAV load/dump over streams or paths
//! - `dsp`: window functions and padding
//! - `config`: chunk sizes and default window parameters
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod audio;
pub mod codec;
pub mod config;
pub mod dsp;
pub mod error;

// Re-export commonly used types
pub use audio::{dump_wav, load_wav, AudioBuffer, WavFormat};
pub use config::Config;
pub use dsp::{ComplexBuffer, PadMode, WindowKind};
pub use error::{Result, WavError};
