//! WAV File Tests
//!
//! End-to-end load/dump through the filesystem, cross-checked against hound.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use test_case::test_case;

use wavlib::audio::{dump_wav_with_config, load_wav_with_config};
use wavlib::config::IoConfig;
use wavlib::{dump_wav, load_wav, AudioBuffer, WavError, WavFormat};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic full-scale test signal for a given bit depth
fn test_signal(bits: u16, channels: u16, frames: usize) -> Vec<i32> {
    let max = ((1i64 << (bits - 1)) - 1) as f64;
    (0..frames * channels as usize)
        .map(|i| {
            let t = (i / channels as usize) as f64 / 100.0;
            let phase = (i % channels as usize) as f64;
            ((t * 2.0 * std::f64::consts::PI + phase).sin() * max) as i32
        })
        .collect()
}

fn write_with_hound(path: &Path, bits: u16, channels: u16, samples: &[i32]) {
    let spec = WavSpec {
        channels,
        sample_rate: 44100,
        bits_per_sample: bits,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for &s in samples {
        if bits == 16 {
            writer.write_sample(s as i16).unwrap();
        } else {
            writer.write_sample(s).unwrap();
        }
    }
    writer.finalize().unwrap();
}

#[test_case(8 ; "8-bit")]
#[test_case(16 ; "16-bit")]
#[test_case(24 ; "24-bit")]
#[test_case(32 ; "32-bit")]
fn test_file_round_trip_is_byte_identical(bits: u16) {
    init_tracing();
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.wav");
    let second = dir.path().join("second.wav");

    let samples = test_signal(bits, 2, 2_000);
    let original = AudioBuffer::from_samples(WavFormat::pcm(2, 44100, bits), samples).unwrap();
    let config = IoConfig::with_chunk_samples(333);

    dump_wav_with_config(&first, &original, &config).unwrap();
    let loaded = load_wav_with_config(&first, &config).unwrap();
    assert_eq!(loaded, original);

    dump_wav(&second, &loaded).unwrap();
    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_file_size_is_header_plus_payload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("size.wav");
    let buffer =
        AudioBuffer::from_samples(WavFormat::pcm(1, 8000, 24), test_signal(24, 1, 100)).unwrap();

    dump_wav(&path, &buffer).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 44 + 300);
    assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 300 + 44);
}

#[test_case(16, 1 ; "16-bit mono")]
#[test_case(16, 2 ; "16-bit stereo")]
#[test_case(24, 2 ; "24-bit stereo")]
#[test_case(32, 1 ; "32-bit mono")]
fn test_loads_files_written_by_hound(bits: u16, channels: u16) {
    init_tracing();
    let dir = tempdir().unwrap();
    let path = dir.path().join("hound.wav");
    let samples = test_signal(bits, channels, 1_500);
    write_with_hound(&path, bits, channels, &samples);

    let loaded = load_wav(&path).unwrap();
    assert_eq!(loaded.channels(), channels);
    assert_eq!(loaded.sample_rate(), 44100);
    assert_eq!(loaded.bits_per_sample(), bits);
    assert_eq!(loaded.samples(), &samples[..]);
    assert_eq!(loaded.data_size() as usize, samples.len() * bits as usize / 8);
}

#[test]
fn test_hound_reads_dumped_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ours.wav");
    let samples = test_signal(16, 2, 1_000);
    let buffer = AudioBuffer::from_samples(WavFormat::pcm(2, 48000, 16), samples.clone()).unwrap();
    dump_wav(&path, &buffer).unwrap();

    let mut reader = WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.bits_per_sample, 16);

    let decoded: Vec<i32> = reader.samples::<i32>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, samples);
}

#[test]
fn test_missing_file_is_stream_open_error() {
    let dir = tempdir().unwrap();
    let result = load_wav(dir.path().join("nonexistent.wav"));
    match result {
        Err(WavError::StreamOpen { path, .. }) => assert!(path.ends_with("nonexistent.wav")),
        other => panic!("expected StreamOpen, got {:?}", other),
    }
}

#[test]
fn test_dump_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let buffer = AudioBuffer::from_samples(WavFormat::pcm(1, 8000, 16), vec![0; 4]).unwrap();
    let result = dump_wav(dir.path().join("no/such/dir.wav"), &buffer);
    assert!(matches!(result, Err(WavError::StreamOpen { .. })));
}

#[test]
fn test_rifx_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rifx.wav");
    let buffer = AudioBuffer::from_samples(WavFormat::pcm(1, 8000, 16), vec![1, 2]).unwrap();
    dump_wav(&path, &buffer).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes[..4].copy_from_slice(b"RIFX");
    std::fs::write(&path, &bytes).unwrap();

    let result = load_wav(&path);
    assert!(matches!(result, Err(WavError::Format { .. })));
}
