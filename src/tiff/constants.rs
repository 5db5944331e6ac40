//! TIFF format constants
//!
//! Constants used throughout the directory parsing code, replacing magic
//! numbers with descriptive names.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43)
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// BigTIFF offset size (8 bytes)
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;
}

/// Field types as defined in the TIFF and BigTIFF specs
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const IFD: u16 = 13;       // 32-bit IFD offset
    pub const LONG8: u16 = 16;     // BigTIFF 64-bit unsigned integer
    pub const SLONG8: u16 = 17;    // BigTIFF 64-bit signed integer
    pub const IFD8: u16 = 18;      // BigTIFF 64-bit IFD offset
}

/// Standard TIFF tags consumed by the property and hash extractor
pub mod tags {
    // Basic image structure tags
    pub const NEW_SUBFILE_TYPE: u16 = 254;   // Subfile data descriptor
    pub const IMAGE_WIDTH: u16 = 256;        // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257;       // Height of the image in pixels

    // Tile/strip layout tags
    pub const STRIP_OFFSETS: u16 = 273;      // Offsets to the data strips
    pub const STRIP_BYTE_COUNTS: u16 = 279;  // Byte counts for strips
    pub const TILE_OFFSETS: u16 = 324;       // Offsets to the data tiles
    pub const TILE_BYTE_COUNTS: u16 = 325;   // Byte counts for tiles

    // Descriptive metadata tags
    pub const DOCUMENT_NAME: u16 = 269;      // Name of the scanned document
    pub const IMAGE_DESCRIPTION: u16 = 270;  // Free-form image description
    pub const MAKE: u16 = 271;               // Scanner manufacturer
    pub const MODEL: u16 = 272;              // Scanner model
    pub const SOFTWARE: u16 = 305;           // Software used to create the image
    pub const DATE_TIME: u16 = 306;          // Date and time of image creation
    pub const ARTIST: u16 = 315;             // Person who created the image
    pub const HOST_COMPUTER: u16 = 316;      // Computer where the image was created
    pub const COPYRIGHT: u16 = 33432;        // Copyright notice

    // Resolution tags
    pub const X_RESOLUTION: u16 = 282;       // Horizontal resolution
    pub const Y_RESOLUTION: u16 = 283;       // Vertical resolution
    pub const X_POSITION: u16 = 286;         // Horizontal offset of the image
    pub const Y_POSITION: u16 = 287;         // Vertical offset of the image
    pub const RESOLUTION_UNIT: u16 = 296;    // Unit of measurement for resolution
}

/// Resolution unit values
pub mod resolution_unit {
    pub const NONE: u16 = 1;              // No meaningful units
    pub const INCH: u16 = 2;              // Inches (default)
    pub const CENTIMETER: u16 = 3;        // Centimeters
}
