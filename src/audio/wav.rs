//! WAV container I/O
//!
//! Parses and writes the RIFF/WAVE header and streams the PCM payload through
//! the sample codec in bounded chunks. Loading is lenient about what follows
//! the format fields: the data chunk is located by scanning for its tag, and
//! a short payload yields the samples that were present.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::audio::buffer::{AudioBuffer, WavFormat};
use crate::codec::endian::{ReadEndianExt, WriteEndianExt};
use crate::codec::sample::{
    decode_samples_into, encode_samples_into, sample_width, MAX_BITS_PER_SAMPLE,
    MIN_BITS_PER_SAMPLE,
};
use crate::config::IoConfig;
use crate::error::{Result, WavError};

const RIFF_TAG: &[u8; 4] = b"RIFF";
const WAVE_TAG: &[u8; 4] = b"WAVE";
const FMT_TAG: &[u8; 4] = b"fmt ";
const DATA_TAG: &[u8; 4] = b"data";

/// Length of the canonical PCM header written by [`dump_to_writer`]
pub const CANONICAL_HEADER_LEN: u32 = 44;

/// Length of a plain PCM format chunk body
const PCM_FMT_CHUNK_LEN: u32 = 16;

// ============================================================================
// Helper Functions
// ============================================================================

/// Map an I/O failure while reading the fixed header fields
fn header_error(e: io::Error) -> WavError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        WavError::Format {
            reason: "header ended before the format fields".to_string(),
        }
    } else {
        WavError::Io(e)
    }
}

fn expect_tag<R: Read>(reader: &mut R, expected: &[u8; 4]) -> Result<()> {
    let tag = reader.read_tag().map_err(header_error)?;
    if &tag != expected {
        return Err(WavError::Format {
            reason: format!(
                "expected {:?} tag, found {:?}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(&tag)
            ),
        });
    }
    Ok(())
}

/// Read until `buf` is full or the stream ends. Returns the bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

// ============================================================================
// Load
// ============================================================================

/// Parse everything up to and including bits-per-sample.
///
/// The `fmt ` chunk id and length are skipped without being checked; the
/// format fields are assumed to follow `WAVE` directly.
fn read_format<R: Read>(reader: &mut R) -> Result<WavFormat> {
    expect_tag(reader, RIFF_TAG)?;
    // Overall RIFF size, not validated
    reader.skip_bytes(4).map_err(header_error)?;
    expect_tag(reader, WAVE_TAG)?;
    reader.skip_bytes(8).map_err(header_error)?;

    let format_code = reader.read_u16_le().map_err(header_error)?;
    let channels = reader.read_u16_le().map_err(header_error)?;
    let sample_rate = reader.read_u32_le().map_err(header_error)?;
    let byte_rate = reader.read_u32_le().map_err(header_error)?;
    // Block align is recomputed on dump
    reader.skip_bytes(2).map_err(header_error)?;
    let bits_per_sample = reader.read_u16_le().map_err(header_error)?;

    if !(MIN_BITS_PER_SAMPLE..=MAX_BITS_PER_SAMPLE).contains(&bits_per_sample) {
        return Err(WavError::UnsupportedBitDepth {
            bits: bits_per_sample,
        });
    }

    Ok(WavFormat {
        format_code,
        channels,
        sample_rate,
        byte_rate,
        bits_per_sample,
    })
}

/// Slide a four-byte window forward one byte at a time until it reads
/// `data`, then return the chunk's size field.
///
/// Returns `None` when the stream ends first.
fn find_data_chunk<R: Read>(reader: &mut R) -> Result<Option<u32>> {
    let mut window = [0u8; 4];
    if read_full(reader, &mut window)? < window.len() {
        return Ok(None);
    }

    let mut skipped: u64 = 0;
    while &window != DATA_TAG {
        let mut next = [0u8; 1];
        if read_full(reader, &mut next)? == 0 {
            return Ok(None);
        }
        window.copy_within(1.., 0);
        window[3] = next[0];
        skipped += 1;
    }

    let mut size = [0u8; 4];
    if read_full(reader, &mut size)? < size.len() {
        warn!("data chunk size field is truncated");
        return Ok(None);
    }
    let data_size = u32::from_le_bytes(size);
    debug!(data_size, skipped, "located data chunk");
    Ok(Some(data_size))
}

/// Stream `data_size` payload bytes through the sample codec.
///
/// Returns the samples and the number of payload bytes actually received.
fn read_payload<R: Read>(
    reader: &mut R,
    data_size: u32,
    width: usize,
    chunk_samples: usize,
) -> Result<(Vec<i32>, u32)> {
    let expected_samples = data_size as usize / width;
    let mut samples = Vec::with_capacity(expected_samples.min(chunk_samples));
    let scratch_len = chunk_samples.saturating_mul(width).min(data_size as usize);
    let mut scratch = vec![0u8; scratch_len];

    let mut received: u64 = 0;
    while received < data_size as u64 {
        let want = (data_size as u64 - received).min(scratch.len() as u64) as usize;
        let got = read_full(reader, &mut scratch[..want])?;
        decode_samples_into(&scratch[..got], width, &mut samples)?;
        received += got as u64;
        trace!(chunk_bytes = got, received, "decoded payload chunk");

        if got < want {
            warn!(
                expected = data_size,
                received, "data payload truncated, keeping decoded samples"
            );
            break;
        }
    }

    if received % width as u64 != 0 {
        warn!(
            trailing_bytes = received % width as u64,
            "dropping partial trailing sample"
        );
    }

    Ok((samples, received as u32))
}

/// Load a WAV stream with the default I/O configuration
pub fn load_from_reader<R: Read>(reader: R) -> Result<AudioBuffer> {
    load_from_reader_with_config(reader, &IoConfig::default())
}

/// Load a WAV stream.
///
/// # Errors
/// * `Format` - RIFF/WAVE magic mismatch or header cut short
/// * `UnsupportedBitDepth` - bits per sample outside 8..=32
///
/// A missing `data` chunk yields an empty buffer, and a payload shorter
/// than its declared size yields the samples that were present.
pub fn load_from_reader_with_config<R: Read>(
    mut reader: R,
    config: &IoConfig,
) -> Result<AudioBuffer> {
    config.validate()?;

    let format = read_format(&mut reader)?;
    debug!(%format, "parsed WAV format");
    let width = sample_width(format.bits_per_sample)?;

    let Some(data_size) = find_data_chunk(&mut reader)? else {
        warn!("no data chunk found, returning empty buffer");
        return Ok(AudioBuffer::empty(format));
    };

    let (samples, received) = read_payload(&mut reader, data_size, width, config.chunk_samples)?;
    Ok(AudioBuffer::from_parts(format, received, samples))
}

/// Load a WAV file with the default I/O configuration
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    load_wav_with_config(path, &IoConfig::default())
}

/// Load a WAV file
pub fn load_wav_with_config<P: AsRef<Path>>(path: P, config: &IoConfig) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| WavError::StreamOpen {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!(path = %path.display(), "loading WAV file");
    load_from_reader_with_config(BufReader::new(file), config)
}

// ============================================================================
// Dump
// ============================================================================

fn write_header<W: Write>(writer: &mut W, format: &WavFormat, data_size: u32) -> io::Result<()> {
    writer.write_all(RIFF_TAG)?;
    writer.write_u32_le(data_size.wrapping_add(CANONICAL_HEADER_LEN))?;
    writer.write_all(WAVE_TAG)?;
    writer.write_all(FMT_TAG)?;
    writer.write_u32_le(PCM_FMT_CHUNK_LEN)?;
    writer.write_u16_le(format.format_code)?;
    writer.write_u16_le(format.channels)?;
    writer.write_u32_le(format.sample_rate)?;
    writer.write_u32_le(format.byte_rate)?;
    writer.write_u16_le(format.block_align())?;
    writer.write_u16_le(format.bits_per_sample)?;
    writer.write_all(DATA_TAG)?;
    writer.write_u32_le(data_size)
}

/// Write a buffer as a WAV stream with the default I/O configuration
pub fn dump_to_writer<W: Write>(writer: W, buffer: &AudioBuffer) -> Result<()> {
    dump_to_writer_with_config(writer, buffer, &IoConfig::default())
}

/// Write a buffer as a canonical 44-byte-header WAV stream.
///
/// Samples are re-encoded to the buffer's bit depth one chunk at a time, so
/// the scratch memory is bounded by `config.chunk_samples`.
pub fn dump_to_writer_with_config<W: Write>(
    mut writer: W,
    buffer: &AudioBuffer,
    config: &IoConfig,
) -> Result<()> {
    config.validate()?;
    let format = buffer.format();
    let width = format.sample_width()?;

    write_header(&mut writer, format, buffer.data_size())?;

    let samples = buffer.samples();
    let mut scratch = vec![0u8; config.chunk_samples.min(samples.len()) * width];
    for chunk in samples.chunks(config.chunk_samples) {
        let len = encode_samples_into(chunk, width, &mut scratch)?;
        writer.write_all(&scratch[..len])?;
        trace!(chunk_samples = chunk.len(), "encoded payload chunk");
    }
    writer.flush()?;

    debug!(
        %format,
        data_size = buffer.data_size(),
        samples = samples.len(),
        "wrote WAV stream"
    );
    Ok(())
}

/// Write a buffer to a WAV file with the default I/O configuration
pub fn dump_wav<P: AsRef<Path>>(path: P, buffer: &AudioBuffer) -> Result<()> {
    dump_wav_with_config(path, buffer, &IoConfig::default())
}

/// Write a buffer to a WAV file, replacing any existing file
pub fn dump_wav_with_config<P: AsRef<Path>>(
    path: P,
    buffer: &AudioBuffer,
    config: &IoConfig,
) -> Result<()> {
    let path = path.as_ref();
    // Reject before touching the filesystem
    buffer.format().sample_width()?;

    let file = File::create(path).map_err(|e| WavError::StreamOpen {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!(path = %path.display(), "dumping WAV file");
    dump_to_writer_with_config(BufWriter::new(file), buffer, config)
}
