//! TIFF/BigTIFF directory chain reader
//!
//! Walks the singly-linked chain of Image File Directories, decoding
//! every tagged entry along the way. The walk is all-or-nothing: any
//! failure discards everything built so far, so a `TiffFile` is either
//! fully constructed or not constructed at all.
//!
//! Hostile input is bounded by loop detection on directory offsets,
//! checked length arithmetic before any allocation, and value reads that
//! never exceed what the file can actually provide.

use log::{debug, info};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, SeekFrom};
use std::path::Path;

use crate::io::byte_order::{normalize_to_le, ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::directory::{element_width, is_rational, Directory, Item};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::header;
use crate::tiff::types::TiffFile;

/// Reader for TIFF and BigTIFF directory chains
pub struct TiffReader {
    /// Byte order reading strategy for this file
    handler: Box<dyn ByteOrderHandler>,
    /// Byte order declared in the header
    byte_order: ByteOrder,
    /// Whether the file uses the BigTIFF layout
    big_tiff: bool,
}

impl TiffReader {
    /// Parses the directory chain of the file at the given path
    ///
    /// # Arguments
    /// * `path` - Path to the TIFF or BigTIFF file
    ///
    /// # Returns
    /// The fully decoded directory chain
    pub fn open(path: &Path) -> TiffResult<TiffFile> {
        info!("Loading TIFF file: {}", path.display());
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(64 * 1024, file);
        Self::read(&mut reader)
    }

    /// Parses the directory chain from the given reader
    ///
    /// The reader is repositioned to offset 0 before the header is read.
    pub fn read(reader: &mut dyn SeekableReader) -> TiffResult<TiffFile> {
        let header = header::read_header(reader)?;
        let parser = TiffReader {
            handler: header.byte_order.create_handler(),
            byte_order: header.byte_order,
            big_tiff: header.big_tiff,
        };

        // The loop detector lives exactly as long as this walk
        let mut visited: HashSet<u64> = HashSet::new();
        let mut directories = Vec::new();
        let mut dir_offset = header.first_dir_offset;

        while dir_offset != 0 {
            // Offsets above i64::MAX would be negative in a signed file
            // position and can never be seeked to
            if dir_offset > i64::MAX as u64 {
                return Err(TiffError::BadData(format!("bad offset {}", dir_offset)));
            }
            if !visited.insert(dir_offset) {
                return Err(TiffError::BadData(format!(
                    "loop detected at offset {}",
                    dir_offset
                )));
            }
            debug!("Reading directory at offset {}", dir_offset);
            let (directory, next_offset) = parser.read_directory(reader, dir_offset)?;
            directories.push(directory);
            dir_offset = next_offset;
        }

        if directories.is_empty() {
            return Err(TiffError::BadData("TIFF contains no directories".to_string()));
        }

        info!("Read {} directories", directories.len());
        Ok(TiffFile::new(
            header.byte_order,
            header.big_tiff,
            directories,
        ))
    }

    fn offset_width(&self) -> u8 {
        if self.big_tiff {
            8
        } else {
            4
        }
    }

    /// Reads one directory and the offset of the next one
    fn read_directory(
        &self,
        reader: &mut dyn SeekableReader,
        offset: u64,
    ) -> TiffResult<(Directory, u64)> {
        reader
            .seek(SeekFrom::Start(offset))
            .map_err(|_| TiffError::BadData("cannot seek to directory offset".to_string()))?;

        let entry_count = self
            .handler
            .read_uint(reader, if self.big_tiff { 8 } else { 2 })
            .map_err(|_| TiffError::BadData("cannot read directory entry count".to_string()))?;
        debug!("Directory entry count: {}", entry_count);

        let mut directory = Directory::new(offset);
        for _ in 0..entry_count {
            let (tag, item) = self.read_entry(reader)?;
            directory.insert(tag, item);
        }

        let next_offset = self
            .handler
            .read_uint(reader, self.offset_width())
            .map_err(|_| TiffError::BadData("cannot read next directory offset".to_string()))?;
        debug!("Next directory offset: {}", next_offset);

        Ok((directory, next_offset))
    }

    /// Decodes a single directory entry into a tag and its item
    fn read_entry(&self, reader: &mut dyn SeekableReader) -> TiffResult<(u16, Item)> {
        let bad = |msg: &str| TiffError::BadData(msg.to_string());

        let tag = self
            .handler
            .read_u16(reader)
            .map_err(|_| bad("cannot read tag, type, and count"))?;
        let field_type = self
            .handler
            .read_u16(reader)
            .map_err(|_| bad("cannot read tag, type, and count"))?;
        let mut count = self
            .handler
            .read_uint(reader, if self.big_tiff { 8 } else { 4 })
            .map_err(|_| bad("cannot read tag, type, and count"))?;

        // The fixed value-or-offset field: its bytes ARE the value when
        // it fits, otherwise they encode an absolute offset
        let mut field = vec![0u8; self.offset_width() as usize];
        reader
            .read_exact(&mut field)
            .map_err(|_| bad("cannot read value/offset"))?;

        let width = element_width(field_type)
            .ok_or_else(|| TiffError::BadData(format!("unknown type encountered: {}", field_type)))?;
        if is_rational(field_type) {
            // Numerator and denominator are stored as separate halves
            count = count
                .checked_mul(2)
                .ok_or_else(|| bad("cannot read value"))?;
        }

        let total_len = count
            .checked_mul(width as u64)
            .and_then(|len| usize::try_from(len).ok())
            .ok_or_else(|| bad("cannot read value"))?;

        let mut value = if total_len <= field.len() {
            // Inline storage
            field[..total_len].to_vec()
        } else {
            let value_offset = self.byte_order.decode_uint(&field);
            self.read_out_of_line(reader, value_offset, total_len)?
        };
        normalize_to_le(&mut value, width, self.byte_order);

        Ok((tag, Item::new(field_type, count, value)))
    }

    /// Reads an out-of-line value, preserving the current stream position
    fn read_out_of_line(
        &self,
        reader: &mut dyn SeekableReader,
        offset: u64,
        length: usize,
    ) -> TiffResult<Vec<u8>> {
        let bad = || TiffError::BadData("cannot read value".to_string());

        let saved_position = reader.seek(SeekFrom::Current(0)).map_err(|_| bad())?;
        reader.seek(SeekFrom::Start(offset)).map_err(|_| bad())?;

        // Read through `take` so a hostile declared length cannot force
        // an allocation beyond what the file can provide
        let mut value = Vec::new();
        let read = (&mut *reader)
            .take(length as u64)
            .read_to_end(&mut value)
            .map_err(|_| bad())?;
        if read != length {
            return Err(bad());
        }

        reader
            .seek(SeekFrom::Start(saved_position))
            .map_err(|_| bad())?;
        Ok(value)
    }
}
