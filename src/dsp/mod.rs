//! Spectral preprocessing primitives
//!
//! Window generation and padding. Both produce buffers for a downstream
//! transform stage (DFT/STFT and friends), which consumes [`ComplexBuffer`].

pub mod padding;
pub mod window;

use rustfft::num_complex::Complex32;

/// Complex-valued sample sequence handed to spectral transforms
pub type ComplexBuffer = Vec<Complex32>;

pub use padding::{constant, pad, reflection, replication, PadMode};
pub use window::{bessel_i0, generate_window, window, WindowKind};
