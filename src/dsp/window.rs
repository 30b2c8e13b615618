//! Analysis window generation
//!
//! Closed-form Hann, Hamming, Blackman, Bartlett and Kaiser windows written
//! into the real part of a complex buffer, ready for a spectral transform.
//! All arithmetic is single precision so output is bit-for-bit reproducible.

use rustfft::num_complex::Complex32;
use serde::{Deserialize, Serialize};

use crate::config::{
    WindowConfig, DEFAULT_HAMMING_ALPHA, DEFAULT_HAMMING_BETA, DEFAULT_KAISER_BETA,
};
use crate::error::{Result, WavError};

// ============================================================================
// Constants
// ============================================================================

/// Single-precision pi (3.1415927410125732 when widened to f64)
pub const PI: f32 = 3.141_592_7;

/// Upper bound on Bessel series terms; I0(x) for |x| <= 50 converges well before this
const BESSEL_MAX_TERMS: u32 = 128;

/// Modified Bessel function of the first kind, order zero.
///
/// Evaluated with the power series `sum(((x/2)^k / k!)^2)` until the next
/// term no longer changes the f32 sum.
pub fn bessel_i0(x: f32) -> f32 {
    let half_sq = (x * 0.5) * (x * 0.5);
    let mut sum = 1.0f32;
    let mut term = 1.0f32;
    for k in 1..=BESSEL_MAX_TERMS {
        let k = k as f32;
        term *= half_sq / (k * k);
        sum += term;
        if term < sum * f32::EPSILON {
            break;
        }
    }
    sum
}

// ============================================================================
// Window Kinds
// ============================================================================

/// Window shape with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowKind {
    Hann,
    /// `alpha - beta * cos(2*pi*i/N')`
    Hamming { alpha: f32, beta: f32 },
    Blackman,
    /// Triangular window reaching zero at both ends
    Bartlett,
    /// `I0(beta * sqrt(1 - r^2)) / I0(beta)` with `r` running from -1 to 1
    Kaiser { beta: f32 },
}

impl WindowKind {
    /// Hamming window with the classic 0.54 / 0.46 coefficients
    pub fn hamming() -> Self {
        WindowKind::Hamming {
            alpha: DEFAULT_HAMMING_ALPHA,
            beta: DEFAULT_HAMMING_BETA,
        }
    }

    /// Kaiser window with beta = 12
    pub fn kaiser() -> Self {
        WindowKind::Kaiser {
            beta: DEFAULT_KAISER_BETA,
        }
    }

    /// Hamming window using configured coefficients
    pub fn hamming_from(config: &WindowConfig) -> Self {
        WindowKind::Hamming {
            alpha: config.hamming_alpha,
            beta: config.hamming_beta,
        }
    }

    /// Kaiser window using the configured beta
    pub fn kaiser_from(config: &WindowConfig) -> Self {
        WindowKind::Kaiser {
            beta: config.kaiser_beta,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WindowKind::Hann => "hann",
            WindowKind::Hamming { .. } => "hamming",
            WindowKind::Blackman => "blackman",
            WindowKind::Bartlett => "bartlett",
            WindowKind::Kaiser { .. } => "kaiser",
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

#[inline]
fn fill_real(window: &mut [Complex32], f: impl Fn(f32) -> f32) {
    for (i, slot) in window.iter_mut().enumerate() {
        slot.re = f(i as f32);
    }
}

/// Write a window of `length` samples into the real parts of `out`.
///
/// `out` grows to `length` if it is shorter (new slots start at zero) and is
/// never shrunk. Imaginary parts and slots past `length` are left as they
/// were. A periodic window is computed over `N' = length`, a symmetric one
/// over `N' = length - 1`.
///
/// # Errors
/// * `WindowLength` - if `length` is zero
pub fn generate_window(
    kind: WindowKind,
    out: &mut Vec<Complex32>,
    length: usize,
    periodic: bool,
) -> Result<()> {
    if length == 0 {
        return Err(WavError::WindowLength { length });
    }
    if out.len() < length {
        out.resize(length, Complex32::new(0.0, 0.0));
    }

    let window = &mut out[..length];
    if length == 1 {
        window[0].re = 1.0;
        return Ok(());
    }

    let n = (if periodic { length } else { length - 1 }) as f32;

    match kind {
        WindowKind::Hann => fill_real(window, |i| 0.5 * (1.0 - (2.0 * PI * i / n).cos())),
        WindowKind::Hamming { alpha, beta } => {
            fill_real(window, |i| alpha - beta * (2.0 * PI * i / n).cos())
        }
        WindowKind::Blackman => fill_real(window, |i| {
            0.42 - 0.5 * (2.0 * PI * i / n).cos() + 0.08 * (4.0 * PI * i / n).cos()
        }),
        WindowKind::Bartlett => fill_real(window, |i| {
            if i <= n / 2.0 {
                2.0 * i / n
            } else {
                2.0 - 2.0 * i / n
            }
        }),
        WindowKind::Kaiser { beta } => {
            let denom = bessel_i0(beta);
            let half = n / 2.0;
            fill_real(window, |i| {
                let r = (i - half) / half;
                bessel_i0(beta * (1.0 - r * r).max(0.0).sqrt()) / denom
            })
        }
    }
    Ok(())
}

/// Allocate a zeroed buffer and generate a window into it
pub fn window(kind: WindowKind, length: usize, periodic: bool) -> Result<Vec<Complex32>> {
    let mut out = Vec::with_capacity(length);
    generate_window(kind, &mut out, length, periodic)?;
    Ok(out)
}
