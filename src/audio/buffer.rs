//! Audio buffer implementation
//!
//! `AudioBuffer` holds the header scalars of a PCM WAV file together with its
//! decoded samples. Samples stay interleaved and are widened to `i32` no
//! matter the source bit depth.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::sample::sample_width;
use crate::error::{Result, WavError};

/// WAVE format code for linear PCM
pub const FORMAT_PCM: u16 = 1;

/// Header scalars of a WAV format chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WavFormat {
    /// Type of format (1 is PCM)
    pub format_code: u16,
    /// Number of interleaved channels
    pub channels: u16,
    /// Frames per second
    pub sample_rate: u32,
    /// Bytes per second as stored in the header
    pub byte_rate: u32,
    /// Bits per single-channel sample (8..=32)
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Linear PCM format with the byte rate derived from the other fields.
    ///
    /// A byte rate too large for the header field is clamped to `u32::MAX`.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        let byte_rate = sample_rate as u64 * channels as u64 * bits_per_sample as u64 / 8;
        let byte_rate = u32::try_from(byte_rate).unwrap_or(u32::MAX);
        WavFormat {
            format_code: FORMAT_PCM,
            channels,
            sample_rate,
            byte_rate,
            bits_per_sample,
        }
    }

    /// Bytes per interleaved frame, as written to the header (clamped to `u16::MAX`)
    pub fn block_align(&self) -> u16 {
        let align = self.bits_per_sample as u32 * self.channels as u32 / 8;
        u16::try_from(align).unwrap_or(u16::MAX)
    }

    /// Bytes per single-channel sample
    pub fn sample_width(&self) -> Result<usize> {
        sample_width(self.bits_per_sample)
    }

    pub fn is_pcm(&self) -> bool {
        self.format_code == FORMAT_PCM
    }
}

impl fmt::Display for WavFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_pcm() { "PCM" } else { "Unknown" };
        write!(
            f,
            "{} ({:#06x}), {} ch, {} Hz, {}-bit, {} B/s",
            kind,
            self.format_code,
            self.channels,
            self.sample_rate,
            self.bits_per_sample,
            self.byte_rate
        )
    }
}

/// Encoded payload size of `samples` samples of `width` bytes each
fn payload_size(samples: usize, width: usize) -> Result<u32> {
    samples
        .checked_mul(width)
        .and_then(|bytes| u32::try_from(bytes).ok())
        .ok_or(WavError::PayloadTooLarge { samples, width })
}

/// Decoded PCM audio with its header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    format: WavFormat,
    /// Size of the data payload in bytes
    data_size: u32,
    /// Interleaved samples, sign-extended to 32 bits
    samples: Vec<i32>,
}

impl AudioBuffer {
    /// Build a buffer from interleaved samples.
    ///
    /// `data_size` is derived from the sample count so the length invariant
    /// holds from the start.
    ///
    /// # Errors
    /// * `UnsupportedBitDepth` - bits per sample outside 8..=32
    /// * `PayloadTooLarge` - the encoded payload would not fit the 32-bit size field
    pub fn from_samples(format: WavFormat, samples: Vec<i32>) -> Result<Self> {
        let width = format.sample_width()?;
        let data_size = payload_size(samples.len(), width)?;
        Ok(Self {
            format,
            data_size,
            samples,
        })
    }

    /// Buffer with a header but no payload
    pub fn empty(format: WavFormat) -> Self {
        Self {
            format,
            data_size: 0,
            samples: Vec::new(),
        }
    }

    /// Assemble a buffer from already-validated parts
    pub(crate) fn from_parts(format: WavFormat, data_size: u32, samples: Vec<i32>) -> Self {
        Self {
            format,
            data_size,
            samples,
        }
    }

    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    pub fn format_code(&self) -> u16 {
        self.format.format_code
    }

    pub fn channels(&self) -> u16 {
        self.format.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    pub fn byte_rate(&self) -> u32 {
        self.format.byte_rate
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.format.bits_per_sample
    }

    /// Size of the data payload in bytes
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Mutable access to the samples. The count cannot change, so the
    /// data size stays consistent.
    pub fn samples_mut(&mut self) -> &mut [i32] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<i32> {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of frames (samples per channel)
    pub fn num_frames(&self) -> usize {
        match self.format.channels {
            0 => 0,
            ch => self.samples.len() / ch as usize,
        }
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.format.sample_rate as f64
    }

    /// Samples for a specific channel (0-indexed)
    pub fn channel_samples(&self, channel: u16) -> Vec<i32> {
        if channel >= self.format.channels {
            return Vec::new();
        }
        self.samples
            .iter()
            .skip(channel as usize)
            .step_by(self.format.channels as usize)
            .copied()
            .collect()
    }
}
