//! Byte order handling for TIFF files
//!
//! TIFF files declare their endianness in the first two bytes of the
//! header. This module implements the Strategy pattern for reading
//! integers in either byte order, plus the in-place normalization applied
//! to decoded value buffers.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian, ReadBytesExt};
use std::io::{self, Result};

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::{TiffError, TiffResult};

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the TIFF magic bytes
    ///
    /// A short read here means the file cannot even hold a TIFF header,
    /// which is reported as an unsupported format rather than bad data.
    pub fn detect(reader: &mut dyn SeekableReader) -> TiffResult<Self> {
        let magic = reader
            .read_u16::<LittleEndian>()
            .map_err(|_| TiffError::TruncatedHeader)?;
        match magic {
            0x4949 => Ok(ByteOrder::LittleEndian), // "II" (Intel)
            0x4D4D => Ok(ByteOrder::BigEndian),    // "MM" (Motorola)
            _ => Err(TiffError::InvalidByteOrder(magic)),
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Returns true for big-endian (MM) files
    pub fn is_big_endian(&self) -> bool {
        matches!(self, ByteOrder::BigEndian)
    }

    /// Decodes an unsigned integer from a raw 1-8 byte slice
    ///
    /// Used to reinterpret an entry's fixed value/offset field as an
    /// absolute file offset when the value is stored out of line.
    pub fn decode_uint(&self, bytes: &[u8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => LittleEndian::read_uint(bytes, bytes.len()),
            ByteOrder::BigEndian => BigEndian::read_uint(bytes, bytes.len()),
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order reading strategies
///
/// `read_uint` is the width-parameterized read used for all fields whose
/// size depends on the classic/BigTIFF mode: entry counts, value counts
/// and directory offsets. The width is decided once per parse and
/// threaded through every subsequent read.
pub trait ByteOrderHandler {
    /// Read a u16 value
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    /// Read a u64 value
    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64>;

    /// Read an unsigned integer of the given byte width (1, 2, 4 or 8)
    fn read_uint(&self, reader: &mut dyn SeekableReader, width: u8) -> Result<u64> {
        match width {
            1 => reader.read_u8().map(u64::from),
            2 => self.read_u16(reader).map(u64::from),
            4 => self.read_u32(reader).map(u64::from),
            8 => self.read_u64(reader),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unsupported integer width: {}", width),
            )),
        }
    }
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<LittleEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<LittleEndian>()
    }

    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64> {
        reader.read_u64::<LittleEndian>()
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<BigEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<BigEndian>()
    }

    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64> {
        reader.read_u64::<BigEndian>()
    }
}

/// Normalizes a decoded value buffer to little-endian element order
///
/// Value buffers are kept little-endian in memory so the typed accessors
/// can decode them without consulting the file's byte order again.
/// One-byte elements are a no-op.
pub fn normalize_to_le(buffer: &mut [u8], element_width: usize, byte_order: ByteOrder) {
    if element_width <= 1 || !byte_order.is_big_endian() {
        return;
    }
    for element in buffer.chunks_exact_mut(element_width) {
        element.reverse();
    }
}
