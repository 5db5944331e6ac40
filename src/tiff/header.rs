//! TIFF/BigTIFF header parsing
//!
//! The header determines everything the rest of the parse depends on:
//! byte order, offset width (4 bytes classic, 8 bytes BigTIFF) and the
//! offset of the first directory. Every failure here is a format-level
//! rejection, not bad data.

use log::debug;
use std::io::SeekFrom;

use crate::io::byte_order::ByteOrder;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};

/// Decoded TIFF header
#[derive(Debug, Clone, Copy)]
pub struct TiffHeader {
    /// Byte order declared by the magic bytes
    pub byte_order: ByteOrder,
    /// Whether the file uses the BigTIFF layout (8-byte offsets)
    pub big_tiff: bool,
    /// Absolute offset of the first directory
    pub first_dir_offset: u64,
}

impl TiffHeader {
    /// Offset width for this file: 4 bytes classic, 8 bytes BigTIFF
    pub fn offset_width(&self) -> u8 {
        if self.big_tiff {
            8
        } else {
            4
        }
    }
}

/// Reads and validates the TIFF header at the start of the file
///
/// # Arguments
/// * `reader` - The seekable reader, repositioned to offset 0
///
/// # Returns
/// The decoded header, or a format-unsupported error
pub fn read_header(reader: &mut dyn SeekableReader) -> TiffResult<TiffHeader> {
    reader
        .seek(SeekFrom::Start(0))
        .map_err(|_| TiffError::TruncatedHeader)?;

    let byte_order = ByteOrder::detect(reader)?;
    debug!("Detected byte order: {}", byte_order.name());

    let handler = byte_order.create_handler();
    let version = handler
        .read_u16(reader)
        .map_err(|_| TiffError::TruncatedHeader)?;
    debug!("TIFF version: {}", version);

    let big_tiff = match version {
        header::TIFF_VERSION => false,
        header::BIG_TIFF_VERSION => {
            // BigTIFF carries two extra header fields: the offset size
            // (always 8) and a reserved zero pad.
            let offset_size = handler
                .read_u16(reader)
                .map_err(|_| TiffError::TruncatedHeader)?;
            let pad = handler
                .read_u16(reader)
                .map_err(|_| TiffError::TruncatedHeader)?;
            if offset_size != header::BIGTIFF_OFFSET_SIZE || pad != 0 {
                return Err(TiffError::InvalidBigTiffHeader);
            }
            true
        }
        _ => return Err(TiffError::UnsupportedVersion(version)),
    };

    let offset_width = if big_tiff { 8 } else { 4 };
    let first_dir_offset = handler
        .read_uint(reader, offset_width)
        .map_err(|_| TiffError::TruncatedHeader)?;
    debug!("First directory offset: {}", first_dir_offset);

    Ok(TiffHeader {
        byte_order,
        big_tiff,
        first_dir_offset,
    })
}
