//! PCM sample codec
//!
//! Widens 1-4 byte little-endian PCM samples into `i32` with sign extension,
//! and narrows them back by truncating to the original width.

use crate::codec::endian::{self, ByteOrder};
use crate::error::{Result, WavError};

/// Largest supported sample width in bytes
pub const MAX_SAMPLE_WIDTH: usize = 4;

/// Bit depths accepted by the WAV container
pub const MIN_BITS_PER_SAMPLE: u16 = 8;
pub const MAX_BITS_PER_SAMPLE: u16 = 32;

#[inline]
fn check_width(width: usize) -> Result<()> {
    if (1..=MAX_SAMPLE_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(WavError::UnsupportedSampleWidth { width })
    }
}

/// Byte width of one sample for a given bit depth.
///
/// Bit depths that are not a multiple of eight round down, matching the
/// container's `bits_per_sample / 8` grouping.
pub fn sample_width(bits_per_sample: u16) -> Result<usize> {
    if !(MIN_BITS_PER_SAMPLE..=MAX_BITS_PER_SAMPLE).contains(&bits_per_sample) {
        return Err(WavError::UnsupportedBitDepth {
            bits: bits_per_sample,
        });
    }
    Ok(bits_per_sample as usize / 8)
}

/// Decode one little-endian sample of `width` bytes into an `i32`.
///
/// The bytes fill the low end of a four-byte word; the remaining high bytes
/// are all ones when the top supplied byte has its sign bit set, zeros
/// otherwise.
#[inline]
pub fn decode_sample(frame: &[u8], width: usize) -> Result<i32> {
    check_width(width)?;
    if frame.len() < width {
        return Err(WavError::TruncatedFrame {
            expected: width,
            actual: frame.len(),
        });
    }

    let mut word = [0u8; MAX_SAMPLE_WIDTH];
    word[..width].copy_from_slice(&frame[..width]);
    let fill = if frame[width - 1] & 0x80 != 0 { 0xFF } else { 0x00 };
    word[width..].fill(fill);

    Ok(endian::decode::<i32>(&word, ByteOrder::Little))
}

/// Encode `value` into the first `width` bytes of `out`, little endian
#[inline]
pub fn encode_sample(value: i32, width: usize, out: &mut [u8]) -> Result<()> {
    check_width(width)?;
    if out.len() < width {
        return Err(WavError::TruncatedFrame {
            expected: width,
            actual: out.len(),
        });
    }

    let word = endian::encode(value, ByteOrder::Little);
    out[..width].copy_from_slice(&word[..width]);
    Ok(())
}

/// Decode every complete `width`-byte group in `bytes`, appending to `out`.
///
/// A partial trailing group is ignored. Returns the number of samples added.
pub fn decode_samples_into(bytes: &[u8], width: usize, out: &mut Vec<i32>) -> Result<usize> {
    check_width(width)?;
    let before = out.len();
    out.reserve(bytes.len() / width);
    for frame in bytes.chunks_exact(width) {
        out.push(decode_sample(frame, width)?);
    }
    Ok(out.len() - before)
}

/// Encode `samples` back to back into `out`, which must hold
/// `samples.len() * width` bytes. Returns the number of bytes written.
pub fn encode_samples_into(samples: &[i32], width: usize, out: &mut [u8]) -> Result<usize> {
    check_width(width)?;
    let needed = samples.len() * width;
    if out.len() < needed {
        return Err(WavError::TruncatedFrame {
            expected: needed,
            actual: out.len(),
        });
    }
    for (&sample, frame) in samples.iter().zip(out.chunks_exact_mut(width)) {
        encode_sample(sample, width, frame)?;
    }
    Ok(needed)
}
