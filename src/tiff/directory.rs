//! Directory and item structures
//!
//! A directory maps 16-bit tag identifiers to decoded items. Each item
//! owns its value buffer outright; the buffer is normalized to
//! little-endian element order at decode time so the typed accessors
//! never consult the file's byte order.

use byteorder::{ByteOrder as _, LittleEndian};
use log::trace;
use std::collections::HashMap;

use crate::tiff::constants::field_types;

/// Byte width of a single element of the given field type
///
/// Returns `None` for types outside the 14 kinds defined by TIFF6 and
/// BigTIFF. Rational kinds report the width of one raw half (4 bytes);
/// the entry decoder doubles their count instead.
pub fn element_width(field_type: u16) -> Option<usize> {
    match field_type {
        field_types::BYTE | field_types::ASCII | field_types::SBYTE | field_types::UNDEFINED => {
            Some(1)
        }
        field_types::SHORT | field_types::SSHORT => Some(2),
        field_types::LONG | field_types::SLONG | field_types::FLOAT | field_types::IFD => Some(4),
        field_types::RATIONAL | field_types::SRATIONAL => Some(4),
        field_types::DOUBLE | field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => {
            Some(8)
        }
        _ => None,
    }
}

/// Whether the type stores numerator/denominator pairs of raw halves
pub fn is_rational(field_type: u16) -> bool {
    matches!(
        field_type,
        field_types::RATIONAL | field_types::SRATIONAL
    )
}

/// One decoded directory entry
///
/// `count` is the raw element count: for rational kinds it is twice the
/// logical count, since numerators and denominators are stored as
/// separate 4-byte halves. The invariant
/// `value.len() == element_width(field_type) * count` holds for every
/// item that survives decoding.
#[derive(Debug, Clone)]
pub struct Item {
    /// Field type, one of the 14 TIFF/BigTIFF kinds
    pub field_type: u16,
    /// Raw element count (doubled for rational kinds)
    pub count: u64,
    /// Owned value buffer, little-endian element order
    value: Vec<u8>,
}

impl Item {
    pub(crate) fn new(field_type: u16, count: u64, value: Vec<u8>) -> Self {
        Item {
            field_type,
            count,
            value,
        }
    }

    /// Fetches the little-endian element slice at `index`, if in range
    fn element(&self, index: u64, width: usize) -> Option<&[u8]> {
        if index >= self.count {
            return None;
        }
        let start = usize::try_from(index).ok()?.checked_mul(width)?;
        self.value.get(start..start.checked_add(width)?)
    }

    /// Unsigned integer at `index` for byte/short/long/ifd/long8/ifd8
    pub fn uint_at(&self, index: u64) -> Option<u64> {
        match self.field_type {
            field_types::BYTE => self.element(index, 1).map(|e| u64::from(e[0])),
            field_types::SHORT => self
                .element(index, 2)
                .map(|e| u64::from(LittleEndian::read_u16(e))),
            field_types::LONG | field_types::IFD => self
                .element(index, 4)
                .map(|e| u64::from(LittleEndian::read_u32(e))),
            field_types::LONG8 | field_types::IFD8 => {
                self.element(index, 8).map(LittleEndian::read_u64)
            }
            _ => None,
        }
    }

    /// Signed integer at `index` for sbyte/sshort/slong/slong8
    pub fn sint_at(&self, index: u64) -> Option<i64> {
        match self.field_type {
            field_types::SBYTE => self.element(index, 1).map(|e| i64::from(e[0] as i8)),
            field_types::SSHORT => self
                .element(index, 2)
                .map(|e| i64::from(LittleEndian::read_i16(e))),
            field_types::SLONG => self
                .element(index, 4)
                .map(|e| i64::from(LittleEndian::read_i32(e))),
            field_types::SLONG8 => self.element(index, 8).map(LittleEndian::read_i64),
            _ => None,
        }
    }

    /// Floating-point value at `index`
    ///
    /// Rational kinds divide the pair at raw positions 2i and 2i+1 with
    /// native float semantics: a zero denominator yields infinity or NaN,
    /// not a failure. A pair whose second half falls outside the buffer
    /// is a failure.
    pub fn float_at(&self, index: u64) -> Option<f64> {
        match self.field_type {
            field_types::FLOAT => self
                .element(index, 4)
                .map(|e| f64::from(LittleEndian::read_f32(e))),
            field_types::DOUBLE => self.element(index, 8).map(LittleEndian::read_f64),
            field_types::RATIONAL => {
                let pair = index.checked_mul(2)?;
                let numerator = self.element(pair, 4).map(LittleEndian::read_u32)?;
                let denominator = self.element(pair + 1, 4).map(LittleEndian::read_u32)?;
                Some(f64::from(numerator) / f64::from(denominator))
            }
            field_types::SRATIONAL => {
                let pair = index.checked_mul(2)?;
                let numerator = self.element(pair, 4).map(LittleEndian::read_i32)?;
                let denominator = self.element(pair + 1, 4).map(LittleEndian::read_i32)?;
                Some(f64::from(numerator) / f64::from(denominator))
            }
            _ => None,
        }
    }

    /// Raw byte buffer for ascii/undefined types
    ///
    /// ASCII values are returned at exactly their declared length and are
    /// not guaranteed to be null-terminated; callers must check the final
    /// byte themselves.
    pub fn buffer(&self) -> Option<&[u8]> {
        match self.field_type {
            field_types::ASCII | field_types::UNDEFINED => Some(&self.value),
            _ => None,
        }
    }
}

/// One Image File Directory: a tag-to-item mapping
///
/// Tag keys are unique; a repeated tag silently overwrites the earlier
/// entry (last occurrence wins). Iteration order carries no meaning, but
/// diagnostic display sorts by tag.
#[derive(Debug, Clone)]
pub struct Directory {
    /// Absolute file offset this directory was read from
    offset: u64,
    /// Decoded items keyed by tag
    items: HashMap<u16, Item>,
}

impl Directory {
    pub(crate) fn new(offset: u64) -> Self {
        Directory {
            offset,
            items: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, tag: u16, item: Item) {
        if self.items.insert(tag, item).is_some() {
            trace!(
                "Duplicate tag {} in directory at offset {}, keeping last",
                tag,
                self.offset
            );
        }
    }

    /// File offset this directory was read from
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Gets an item by tag
    pub fn get(&self, tag: u16) -> Option<&Item> {
        self.items.get(&tag)
    }

    /// Checks whether the directory contains a tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.items.contains_key(&tag)
    }

    /// Number of distinct tags in this directory
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the directory holds no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Tags in sorted order, for diagnostic display
    pub fn sorted_tags(&self) -> Vec<u16> {
        let mut tags: Vec<u16> = self.items.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}
