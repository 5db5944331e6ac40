//! Property extraction and level hashing
//!
//! Walks the well-known descriptive tags of one directory into a string
//! property map and computes the quickhash over another directory's
//! tile or strip data. The set of hashed properties and their order are
//! fixed: the digest is only comparable across runs if logically
//! identical content always feeds the hash identically.

use log::debug;
use std::collections::HashMap;
use std::path::Path;

use crate::hash::QuickHash;
use crate::tiff::constants::{resolution_unit, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::types::TiffFile;

/// Property key for the generic slide comment
pub const PROPERTY_NAME_COMMENT: &str = "comment";

/// Hashing cost ceiling: 5 MiB of declared tile/strip data
///
/// A level bigger than this is a non-pyramidal image or one with a very
/// large top level; computing its hash could take arbitrarily long, so
/// the hash is disabled instead.
const QUICKHASH_SIZE_LIMIT: u64 = 5 * (1 << 20);

/// Stores an ascii/undefined tag as a string property
///
/// The stored value is the buffer up to its first NUL, interpreted as
/// UTF-8 with lossy replacement. Absent tags are silently skipped.
/// Returns the stored value so it can also be hashed.
fn store_string_property(
    tl: &TiffFile,
    dir: usize,
    properties: &mut HashMap<String, String>,
    name: &str,
    tag: u16,
) -> Option<String> {
    let buf = tl.get_buffer(dir, tag)?;
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let value = String::from_utf8_lossy(&buf[..end]).into_owned();
    properties.insert(name.to_string(), value.clone());
    Some(value)
}

/// Stores a string property and feeds its name and value into the hash
///
/// The name and the value (absent counts as empty) are both fed, so the
/// digest covers which properties existed as well as their content.
fn store_and_hash_string_property(
    tl: &TiffFile,
    dir: usize,
    properties: &mut HashMap<String, String>,
    quickhash: &mut QuickHash,
    name: &str,
    tag: u16,
) {
    quickhash.feed_string(Some(name));
    let value = store_string_property(tl, dir, properties, name, tag);
    quickhash.feed_string(value.as_deref());
}

/// Stores a float tag as a decimal-formatted string property
///
/// Floats are deliberately excluded from hashing: their text formatting
/// is not guaranteed bit-stable across platforms or over time.
fn store_float_property(
    tl: &TiffFile,
    dir: usize,
    properties: &mut HashMap<String, String>,
    name: &str,
    tag: u16,
) {
    if let Some(value) = tl.get_float(dir, tag, 0) {
        properties.insert(name.to_string(), format!("{}", value));
    }
}

/// Populates the property map from one directory's well-known tags
fn store_and_hash_properties(
    tl: &TiffFile,
    dir: usize,
    properties: &mut HashMap<String, String>,
    quickhash: &mut QuickHash,
) {
    // generic comment
    store_string_property(
        tl,
        dir,
        properties,
        PROPERTY_NAME_COMMENT,
        tags::IMAGE_DESCRIPTION,
    );

    // strings to store and hash, in fixed order
    store_and_hash_string_property(
        tl,
        dir,
        properties,
        quickhash,
        "tiff.ImageDescription",
        tags::IMAGE_DESCRIPTION,
    );
    store_and_hash_string_property(tl, dir, properties, quickhash, "tiff.Make", tags::MAKE);
    store_and_hash_string_property(tl, dir, properties, quickhash, "tiff.Model", tags::MODEL);
    store_and_hash_string_property(
        tl,
        dir,
        properties,
        quickhash,
        "tiff.Software",
        tags::SOFTWARE,
    );
    store_and_hash_string_property(
        tl,
        dir,
        properties,
        quickhash,
        "tiff.DateTime",
        tags::DATE_TIME,
    );
    store_and_hash_string_property(tl, dir, properties, quickhash, "tiff.Artist", tags::ARTIST);
    store_and_hash_string_property(
        tl,
        dir,
        properties,
        quickhash,
        "tiff.HostComputer",
        tags::HOST_COMPUTER,
    );
    store_and_hash_string_property(
        tl,
        dir,
        properties,
        quickhash,
        "tiff.Copyright",
        tags::COPYRIGHT,
    );
    store_and_hash_string_property(
        tl,
        dir,
        properties,
        quickhash,
        "tiff.DocumentName",
        tags::DOCUMENT_NAME,
    );

    // floats are stored but never hashed
    store_float_property(tl, dir, properties, "tiff.XResolution", tags::X_RESOLUTION);
    store_float_property(tl, dir, properties, "tiff.YResolution", tags::Y_RESOLUTION);
    store_float_property(tl, dir, properties, "tiff.XPosition", tags::X_POSITION);
    store_float_property(tl, dir, properties, "tiff.YPosition", tags::Y_POSITION);

    // resolution unit, defaulting to inch when unreadable
    let unit = tl
        .get_uint(dir, tags::RESOLUTION_UNIT, 0)
        .unwrap_or(u64::from(resolution_unit::INCH));
    let unit_name = match unit {
        u if u == u64::from(resolution_unit::NONE) => "none",
        u if u == u64::from(resolution_unit::INCH) => "inch",
        u if u == u64::from(resolution_unit::CENTIMETER) => "centimeter",
        _ => "unknown",
    };
    properties.insert("tiff.ResolutionUnit".to_string(), unit_name.to_string());
}

/// Hashes the raw tile/strip data of one directory
///
/// The layout is tiled when a tile-offset tag is present, stripped when a
/// strip-offset tag is; neither is an error. If the declared byte counts
/// sum past the cost ceiling the hash is disabled and the call still
/// succeeds.
pub fn hash_tiff_level(
    quickhash: &mut QuickHash,
    path: &Path,
    tl: &TiffFile,
    dir: usize,
) -> TiffResult<()> {
    let (offset_tag, length_tag) = if tl.value_count(dir, tags::TILE_OFFSETS) != 0 {
        (tags::TILE_OFFSETS, tags::TILE_BYTE_COUNTS)
    } else if tl.value_count(dir, tags::STRIP_OFFSETS) != 0 {
        (tags::STRIP_OFFSETS, tags::STRIP_BYTE_COUNTS)
    } else {
        return Err(TiffError::BadData(format!(
            "directory {} is neither tiled nor stripped",
            dir
        )));
    };

    let count = tl.value_count(dir, offset_tag);
    if count == 0 || count != tl.value_count(dir, length_tag) {
        return Err(TiffError::BadData(format!(
            "invalid tile/strip counts for directory {}",
            dir
        )));
    }

    // check total declared size against the cost ceiling
    let mut total: u64 = 0;
    for i in 0..count {
        total = total.saturating_add(tl.get_uint(dir, length_tag, i).unwrap_or(0));
        if total > QUICKHASH_SIZE_LIMIT {
            debug!(
                "Directory {} declares more than {} bytes, disabling quickhash",
                dir, QUICKHASH_SIZE_LIMIT
            );
            quickhash.disable();
            return Ok(());
        }
    }

    // hash raw data of each tile/strip in declared order
    for i in 0..count {
        let offset = tl.get_uint(dir, offset_tag, i);
        let length = tl.get_uint(dir, length_tag, i);
        let (offset, length) = match (offset, length) {
            (Some(offset), Some(length)) => (offset, length),
            _ => {
                return Err(TiffError::BadData(format!(
                    "invalid tile/strip offset/length for directory {}",
                    dir
                )))
            }
        };
        quickhash
            .hash_file_range(path, offset, length)
            .map_err(|e| TiffError::BadData(format!("cannot hash file range: {}", e)))?;
    }

    Ok(())
}

/// Hashes the lowest-resolution level and populates slide properties
///
/// # Arguments
/// * `tl` - The parsed directory chain
/// * `path` - Path of the file backing `tl`, for raw range hashing
/// * `properties` - Target property map; `None` makes the whole call a no-op
/// * `quickhash` - The running hash accumulator
/// * `lowest_resolution_dir` - Directory whose tile/strip data is hashed
/// * `property_dir` - Directory the properties are read from
pub fn init_properties_and_hash(
    tl: &TiffFile,
    path: &Path,
    properties: Option<&mut HashMap<String, String>>,
    quickhash: &mut QuickHash,
    lowest_resolution_dir: usize,
    property_dir: usize,
) -> TiffResult<()> {
    let properties = match properties {
        Some(properties) => properties,
        None => return Ok(()),
    };

    hash_tiff_level(quickhash, path, tl, lowest_resolution_dir)
        .map_err(|e| TiffError::BadData(format!("cannot hash TIFF tiles: {}", e)))?;

    store_and_hash_properties(tl, property_dir, properties, quickhash);
    Ok(())
}
