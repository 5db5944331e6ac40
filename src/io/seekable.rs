//! Seekable reader trait
//!
//! The byte-source collaborator of the parsing engine: anything that can
//! be read from and repositioned. The engine requires exact-length reads
//! and relies on the position being saved and restored around out-of-line
//! value fetches.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek> SeekableReader for T {}
