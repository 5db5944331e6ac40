//! TIFF/BigTIFF directory parsing
//!
//! This module parses the container's Image File Directory chain without
//! a full TIFF codec: header validation, directory walking with loop
//! detection, entry decoding, typed tag accessors, and the property and
//! quickhash extractor built on top of them.

pub mod constants;
pub mod directory;
pub mod errors;
pub mod header;
pub mod properties;
pub mod reader;
#[cfg(test)]
mod tests;
pub mod types;

pub use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
pub use directory::{Directory, Item};
pub use errors::{ErrorKind, TiffError, TiffResult};
pub use header::TiffHeader;
pub use reader::TiffReader;
pub use types::TiffFile;
