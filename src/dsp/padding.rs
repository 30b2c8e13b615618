//! Buffer padding
//!
//! Extends a sample sequence on both sides before framing, so the first and
//! last analysis windows are centred on real samples.

use std::iter;

use crate::error::{Result, WavError};

/// How the padded region is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadMode<T> {
    /// Mirror around the edge sample, which is not repeated
    Reflection,
    /// Fill with a fixed value
    Constant(T),
    /// Repeat the edge sample
    Replication,
}

/// Pad `input` by `pad = [left, right]` samples into `out`.
///
/// `out` is cleared first and left empty on error.
///
/// # Errors
/// * `PaddingRange` - reflection with `left` or `right` >= input length, or
///   replication of an empty input with non-zero padding
pub fn pad<T: Copy>(
    mode: PadMode<T>,
    input: &[T],
    pad: [usize; 2],
    out: &mut Vec<T>,
) -> Result<()> {
    out.clear();
    let [left, right] = pad;
    let n = input.len();

    match mode {
        PadMode::Reflection => {
            // Reflection skips the edge sample, so only n - 1 values exist per side
            if (left > 0 && left >= n) || (right > 0 && right >= n) {
                return Err(WavError::PaddingRange { pad, len: n });
            }
            out.reserve(left + n + right);
            if left > 0 {
                out.extend(input[1..=left].iter().rev());
            }
            out.extend_from_slice(input);
            if right > 0 {
                out.extend(input[n - 1 - right..n - 1].iter().rev());
            }
        }
        PadMode::Constant(value) => extend_constant(input, pad, value, out),
        PadMode::Replication => {
            let (Some(&first), Some(&last)) = (input.first(), input.last()) else {
                if left == 0 && right == 0 {
                    return Ok(());
                }
                return Err(WavError::PaddingRange { pad, len: n });
            };
            out.reserve(left + n + right);
            out.extend(iter::repeat(first).take(left));
            out.extend_from_slice(input);
            out.extend(iter::repeat(last).take(right));
        }
    }
    Ok(())
}

/// Append `[value; left] ++ input ++ [value; right]` to `out`
fn extend_constant<T: Copy>(input: &[T], pad: [usize; 2], value: T, out: &mut Vec<T>) {
    let [left, right] = pad;
    out.reserve(left + input.len() + right);
    out.extend(iter::repeat(value).take(left));
    out.extend_from_slice(input);
    out.extend(iter::repeat(value).take(right));
}

/// Reflection padding: `reverse(in[1..=left]) ++ in ++ reverse(in[n-1-right..n-1])`
pub fn reflection<T: Copy>(input: &[T], pad_width: [usize; 2]) -> Result<Vec<T>> {
    let mut out = Vec::new();
    pad(PadMode::Reflection, input, pad_width, &mut out)?;
    Ok(out)
}

/// Constant padding: `[value; left] ++ in ++ [value; right]`
pub fn constant<T: Copy>(input: &[T], pad_width: [usize; 2], value: T) -> Vec<T> {
    let mut out = Vec::new();
    extend_constant(input, pad_width, value, &mut out);
    out
}

/// Edge replication: `[in[0]; left] ++ in ++ [in[n-1]; right]`
pub fn replication<T: Copy>(input: &[T], pad_width: [usize; 2]) -> Result<Vec<T>> {
    let mut out = Vec::new();
    pad(PadMode::Replication, input, pad_width, &mut out)?;
    Ok(out)
}
