//! The decoded TIFF-like structure and its typed accessors
//!
//! A `TiffFile` is the value store produced by one successful parse: an
//! ordered sequence of directories, immutable once constructed. Accessor
//! failures (absent tag, type mismatch, out-of-range index or directory)
//! are local and non-fatal; they return `None` rather than an error so
//! callers can apply their own fallback.

use std::fmt;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::field_types;
use crate::tiff::directory::{Directory, Item};

/// A parsed TIFF/BigTIFF directory chain
#[derive(Debug)]
pub struct TiffFile {
    /// Directories in discovery order
    directories: Vec<Directory>,
    /// Byte order the file was encoded with
    byte_order: ByteOrder,
    /// Whether the file uses the BigTIFF layout
    big_tiff: bool,
}

impl TiffFile {
    pub(crate) fn new(byte_order: ByteOrder, big_tiff: bool, directories: Vec<Directory>) -> Self {
        TiffFile {
            directories,
            byte_order,
            big_tiff,
        }
    }

    /// Whether this file is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.big_tiff
    }

    /// Byte order the file was encoded with
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Number of directories in the chain
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Gets a directory by its position in the chain
    pub fn directory(&self, dir: usize) -> Option<&Directory> {
        self.directories.get(dir)
    }

    fn item(&self, dir: usize, tag: u16) -> Option<&Item> {
        self.directories.get(dir)?.get(tag)
    }

    /// Raw element count of a tag, or 0 when the directory or tag is absent
    ///
    /// Rational kinds report twice their logical count, since numerator
    /// and denominator halves are stored as separate elements.
    pub fn value_count(&self, dir: usize, tag: u16) -> u64 {
        self.item(dir, tag).map_or(0, |item| item.count)
    }

    /// Unsigned integer accessor for byte/short/long/ifd/long8/ifd8 items
    ///
    /// # Arguments
    /// * `dir` - Directory position in the chain
    /// * `tag` - Tag identifier
    /// * `index` - Element index within the value
    ///
    /// # Returns
    /// The value, or `None` on absent tag, type mismatch or range error
    pub fn get_uint(&self, dir: usize, tag: u16, index: u64) -> Option<u64> {
        self.item(dir, tag)?.uint_at(index)
    }

    /// Signed integer accessor for sbyte/sshort/slong/slong8 items
    pub fn get_sint(&self, dir: usize, tag: u16, index: u64) -> Option<i64> {
        self.item(dir, tag)?.sint_at(index)
    }

    /// Floating-point accessor for float/double/rational/srational items
    ///
    /// Rational values are the native float division of the pair at raw
    /// positions 2·index and 2·index+1; a zero denominator follows IEEE
    /// semantics (infinity or NaN) and still counts as success.
    pub fn get_float(&self, dir: usize, tag: u16, index: u64) -> Option<f64> {
        self.item(dir, tag)?.float_at(index)
    }

    /// Raw buffer accessor for ascii/undefined items
    ///
    /// The slice is exactly the declared byte count. ASCII values are not
    /// guaranteed null-terminated.
    pub fn get_buffer(&self, dir: usize, tag: u16) -> Option<&[u8]> {
        self.item(dir, tag)?.buffer()
    }
}

fn write_item_values(f: &mut fmt::Formatter<'_>, item: &Item) -> fmt::Result {
    match item.field_type {
        field_types::ASCII => {
            // Only the first string is shown if there are multiple
            if let Some(buf) = item.buffer() {
                if buf.last() == Some(&0) {
                    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
                    write!(f, " {}", String::from_utf8_lossy(&buf[..end]))?;
                } else {
                    write!(f, " <not null-terminated>")?;
                }
            }
        }
        field_types::UNDEFINED => {
            if let Some(buf) = item.buffer() {
                for byte in buf {
                    write!(f, " {}", byte)?;
                }
            }
        }
        field_types::BYTE | field_types::SHORT | field_types::LONG | field_types::LONG8 => {
            for i in 0..item.count {
                if let Some(value) = item.uint_at(i) {
                    write!(f, " {}", value)?;
                }
            }
        }
        field_types::IFD | field_types::IFD8 => {
            for i in 0..item.count {
                if let Some(value) = item.uint_at(i) {
                    write!(f, " {:016x}", value)?;
                }
            }
        }
        field_types::SBYTE | field_types::SSHORT | field_types::SLONG | field_types::SLONG8 => {
            for i in 0..item.count {
                if let Some(value) = item.sint_at(i) {
                    write!(f, " {}", value)?;
                }
            }
        }
        field_types::FLOAT | field_types::DOUBLE => {
            for i in 0..item.count {
                if let Some(value) = item.float_at(i) {
                    write!(f, " {}", value)?;
                }
            }
        }
        field_types::RATIONAL | field_types::SRATIONAL => {
            // Raw count holds numerator/denominator halves
            for i in 0..item.count / 2 {
                if let Some(value) = item.float_at(i) {
                    write!(f, " {}", value)?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// Diagnostic dump: per directory, each tag in sorted order with its
/// type, count and decoded values. For human inspection only.
impl fmt::Display for TiffFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, directory) in self.directories.iter().enumerate() {
            writeln!(f, "Directory {}", n)?;
            for tag in directory.sorted_tags() {
                if let Some(item) = directory.get(tag) {
                    writeln!(
                        f,
                        " {}: type: {}, count: {}",
                        tag, item.field_type, item.count
                    )?;
                    write!(f, " ")?;
                    write_item_values(f, item)?;
                    writeln!(f)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
