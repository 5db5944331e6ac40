//! TIFF/BigTIFF directory parsing for whole-slide image readers
//!
//! `tifflike` gives slide-format readers random access to arbitrary tag
//! values across the pyramid-level directories of a TIFF-like file,
//! plus a bounded-cost content hash over the lowest-resolution level for
//! fast identity comparison. It decodes directory structure only; pixel
//! data is never touched beyond feeding raw bytes to the hash.

pub mod hash;
pub mod io;
pub mod tiff;

pub use hash::QuickHash;
pub use tiff::{ErrorKind, TiffError, TiffFile, TiffReader, TiffResult};
