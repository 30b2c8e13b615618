//! Endian-aware integer codec
//!
//! Converts byte sequences to and from fixed-width integers in a requested
//! byte order. The host byte order is probed once per process and cached.

use std::io::{self, Read, Write};
use std::sync::OnceLock;

use tracing::trace;

use crate::error::{Result, WavError};

static HOST_ORDER: OnceLock<ByteOrder> = OnceLock::new();

/// Byte order of a serialized integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first (RIFF/WAVE on disk)
    Little,
    /// Most significant byte first
    Big,
}

impl ByteOrder {
    /// Byte order of the running machine.
    ///
    /// Computed on first access and immutable afterwards, so concurrent
    /// readers need no synchronization.
    pub fn host() -> ByteOrder {
        *HOST_ORDER.get_or_init(|| {
            let order = if 1u16.to_ne_bytes()[0] == 1 {
                ByteOrder::Little
            } else {
                ByteOrder::Big
            };
            trace!(?order, "probed host byte order");
            order
        })
    }

    /// Whether bytes in this order must be reversed to match the host
    #[inline]
    pub fn is_foreign(self) -> bool {
        self != ByteOrder::host()
    }
}

/// Fixed-width integer that can be reinterpreted from native-order bytes
pub trait EndianInt: Copy {
    /// Width in bytes
    const WIDTH: usize;

    /// Native byte representation (`[u8; WIDTH]`)
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default + Copy;

    fn from_ne(bytes: Self::Bytes) -> Self;

    fn to_ne(self) -> Self::Bytes;
}

macro_rules! impl_endian_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl EndianInt for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();
                type Bytes = [u8; std::mem::size_of::<$t>()];

                #[inline]
                fn from_ne(bytes: Self::Bytes) -> Self {
                    <$t>::from_ne_bytes(bytes)
                }

                #[inline]
                fn to_ne(self) -> Self::Bytes {
                    self.to_ne_bytes()
                }
            }
        )*
    };
}

impl_endian_int!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Decode an integer from `bytes` stored in `order`.
///
/// Only the first `T::WIDTH` bytes are used. A shorter input is zero-padded
/// on its high-order side (after the bytes for little endian, before them for
/// big endian). No sign handling happens here.
pub fn decode<T: EndianInt>(bytes: &[u8], order: ByteOrder) -> T {
    let mut buf = T::Bytes::default();
    let window = buf.as_mut();
    let n = bytes.len().min(T::WIDTH);

    match order {
        ByteOrder::Little => window[..n].copy_from_slice(&bytes[..n]),
        ByteOrder::Big => window[T::WIDTH - n..].copy_from_slice(&bytes[..n]),
    }

    // window now holds the value in `order`; flip it into host order
    if order.is_foreign() {
        window.reverse();
    }
    T::from_ne(buf)
}

/// Encode `value` as exactly `T::WIDTH` bytes in `order`
pub fn encode<T: EndianInt>(value: T, order: ByteOrder) -> T::Bytes {
    let mut buf = value.to_ne();
    if order.is_foreign() {
        buf.as_mut().reverse();
    }
    buf
}

/// Decode an unsigned integer whose width is only known at runtime
pub fn decode_unsigned(bytes: &[u8], width: usize, order: ByteOrder) -> Result<u64> {
    match width {
        1 => Ok(decode::<u8>(bytes, order) as u64),
        2 => Ok(decode::<u16>(bytes, order) as u64),
        4 => Ok(decode::<u32>(bytes, order) as u64),
        8 => Ok(decode::<u64>(bytes, order)),
        _ => Err(WavError::UnsupportedIntegerWidth { width }),
    }
}

/// Decode a signed integer whose width is only known at runtime
pub fn decode_signed(bytes: &[u8], width: usize, order: ByteOrder) -> Result<i64> {
    match width {
        1 => Ok(decode::<i8>(bytes, order) as i64),
        2 => Ok(decode::<i16>(bytes, order) as i64),
        4 => Ok(decode::<i32>(bytes, order) as i64),
        8 => Ok(decode::<i64>(bytes, order)),
        _ => Err(WavError::UnsupportedIntegerWidth { width }),
    }
}

// ============================================================================
// Stream Extensions
// ============================================================================

/// Typed integer reads on any [`Read`]
pub trait ReadEndianExt: Read {
    fn read_int<T: EndianInt>(&mut self, order: ByteOrder) -> io::Result<T> {
        let mut buf = T::Bytes::default();
        self.read_exact(buf.as_mut())?;
        Ok(decode(buf.as_ref(), order))
    }

    fn read_u16_le(&mut self) -> io::Result<u16> {
        self.read_int(ByteOrder::Little)
    }

    fn read_u32_le(&mut self) -> io::Result<u32> {
        self.read_int(ByteOrder::Little)
    }

    /// Read a four-byte chunk identifier
    fn read_tag(&mut self) -> io::Result<[u8; 4]> {
        let mut tag = [0u8; 4];
        self.read_exact(&mut tag)?;
        Ok(tag)
    }

    /// Discard exactly `count` bytes
    fn skip_bytes(&mut self, count: u64) -> io::Result<()> {
        let skipped = io::copy(&mut Read::take(&mut *self, count), &mut io::sink())?;
        if skipped < count {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected to skip {} bytes, stream ended after {}", count, skipped),
            ));
        }
        Ok(())
    }
}

impl<R: Read + ?Sized> ReadEndianExt for R {}

/// Typed integer writes on any [`Write`]
pub trait WriteEndianExt: Write {
    fn write_int<T: EndianInt>(&mut self, value: T, order: ByteOrder) -> io::Result<()> {
        self.write_all(encode(value, order).as_ref())
    }

    fn write_u16_le(&mut self, value: u16) -> io::Result<()> {
        self.write_int(value, ByteOrder::Little)
    }

    fn write_u32_le(&mut self, value: u32) -> io::Result<()> {
        self.write_int(value, ByteOrder::Little)
    }
}

impl<W: Write + ?Sized> WriteEndianExt for W {}
