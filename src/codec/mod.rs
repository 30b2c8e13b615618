//! Byte-level codecs
//!
//! Endian-aware integer conversion and PCM sample widening/narrowing.

pub mod endian;
pub mod sample;

pub use endian::{decode, decode_signed, decode_unsigned, encode, ByteOrder, EndianInt};
pub use endian::{ReadEndianExt, WriteEndianExt};
pub use sample::{decode_sample, encode_sample, sample_width};
