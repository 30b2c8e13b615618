//! DSP Tests
//!
//! Window and padding behaviour through the public API, including a small
//! framing pass over decoded audio.

use approx::assert_abs_diff_eq;
use rustfft::num_complex::Complex32;

use wavlib::config::Config;
use wavlib::dsp::{constant, generate_window, pad, reflection, window, ComplexBuffer};
use wavlib::{AudioBuffer, PadMode, WavError, WavFormat, WindowKind};

fn real(buffer: &[Complex32]) -> Vec<f32> {
    buffer.iter().map(|c| c.re).collect()
}

#[test]
fn test_hann_periodic_starts_at_zero() {
    let w = window(WindowKind::Hann, 8, true).unwrap();
    assert_eq!(w.len(), 8);
    assert_eq!(w[0].re, 0.0);
}

#[test]
fn test_every_kind_of_length_one_is_unity() {
    let config = Config::default();
    for kind in [
        WindowKind::Hann,
        WindowKind::hamming_from(&config.window),
        WindowKind::Blackman,
        WindowKind::Bartlett,
        WindowKind::kaiser_from(&config.window),
    ] {
        for periodic in [false, true] {
            assert_eq!(real(&window(kind, 1, periodic).unwrap()), vec![1.0], "{}", kind.name());
        }
    }
}

#[test]
fn test_bartlett_symmetric_for_even_n_prime() {
    for length in [3usize, 5, 9, 17, 33] {
        // symmetric windows use N' = length - 1, which is even here
        let w = real(&window(WindowKind::Bartlett, length, false).unwrap());
        for i in 0..length {
            assert_abs_diff_eq!(w[i], w[length - 1 - i], epsilon = 1e-6);
        }
        assert_abs_diff_eq!(w[length / 2], 1.0, epsilon = 1e-6);
    }
}

#[test]
fn test_windows_are_bounded() {
    for kind in [
        WindowKind::Hann,
        WindowKind::hamming(),
        WindowKind::Blackman,
        WindowKind::Bartlett,
        WindowKind::kaiser(),
    ] {
        let w = real(&window(kind, 256, true).unwrap());
        assert!(
            w.iter().all(|&x| (-1e-6..=1.0 + 1e-6).contains(&x)),
            "{} out of range",
            kind.name()
        );
    }
}

#[test]
fn test_window_length_error() {
    let mut out: ComplexBuffer = Vec::new();
    let result = generate_window(WindowKind::Blackman, &mut out, 0, false);
    assert!(matches!(result, Err(WavError::WindowLength { .. })));
}

#[test]
fn test_padding_examples() {
    assert_eq!(
        reflection(&[1, 2, 3, 4, 5], [2, 2]).unwrap(),
        vec![3, 2, 1, 2, 3, 4, 5, 4, 3]
    );
    assert_eq!(constant(&[1, 2, 3], [1, 1], 0), vec![0, 1, 2, 3, 0]);
}

#[test]
fn test_padding_range_error() {
    let mut out = Vec::new();
    let result = pad(PadMode::Reflection, &[1, 2, 3, 4, 5], [5, 0], &mut out);
    assert!(matches!(result, Err(WavError::PaddingRange { len: 5, .. })));
}

#[test]
fn test_frame_decoded_audio() {
    // Centre-padded framing of one decoded channel, the way a transform stage would
    let format = WavFormat::pcm(1, 8000, 16);
    let samples: Vec<i32> = (0..64).map(|i| (i - 32) * 1000).collect();
    let buffer = AudioBuffer::from_samples(format, samples).unwrap();

    let frame_len = 16;
    let hop = 8;
    let padded = reflection(buffer.samples(), [frame_len / 2, frame_len / 2]).unwrap();
    assert_eq!(padded.len(), 64 + frame_len);

    let mut win: ComplexBuffer = vec![Complex32::new(0.0, 0.0); frame_len];
    generate_window(WindowKind::Hann, &mut win, frame_len, true).unwrap();

    let frames: Vec<ComplexBuffer> = padded
        .windows(frame_len)
        .step_by(hop)
        .map(|frame| {
            frame
                .iter()
                .zip(&win)
                .map(|(&s, w)| Complex32::new(s as f32 * w.re, 0.0))
                .collect()
        })
        .collect();

    assert_eq!(frames.len(), (padded.len() - frame_len) / hop + 1);
    // First frame is centred on sample 0; Hann peak lands on it
    assert_eq!(frames[0][frame_len / 2].re, buffer.samples()[0] as f32);
}
