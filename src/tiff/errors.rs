//! Custom error types for TIFF directory parsing

use std::fmt;
use std::io;

/// TIFF-specific error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error during parsing
    IoError(io::Error),
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Invalid BigTIFF header
    InvalidBigTiffHeader,
    /// Header too short to be a TIFF file
    TruncatedHeader,
    /// Malformed directory data with message
    BadData(String),
}

/// The two terminal failure classes of a parse
///
/// Header-level problems mean the file is not a TIFF at all; everything
/// past the header is corruption in a file that claimed to be one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file is not a recognizable TIFF or BigTIFF
    FormatUnsupported,
    /// The file is a TIFF but its directory data is unusable
    BadData,
}

impl TiffError {
    /// Classifies this error into one of the two terminal kinds
    pub fn kind(&self) -> ErrorKind {
        match self {
            TiffError::InvalidByteOrder(_)
            | TiffError::UnsupportedVersion(_)
            | TiffError::InvalidBigTiffHeader
            | TiffError::TruncatedHeader => ErrorKind::FormatUnsupported,
            TiffError::IoError(_) | TiffError::BadData(_) => ErrorKind::BadData,
        }
    }
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            TiffError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            TiffError::InvalidBigTiffHeader => write!(f, "Invalid BigTIFF header"),
            TiffError::TruncatedHeader => write!(f, "Cannot read TIFF header"),
            TiffError::BadData(msg) => write!(f, "Bad TIFF data: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;
