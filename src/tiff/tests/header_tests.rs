//! Tests for TIFF/BigTIFF header validation

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::Cursor;

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{ErrorKind, TiffError};
use crate::tiff::header::read_header;
use crate::tiff::tests::test_utils::{create_test_bigtiff_buffer, create_test_tiff_buffer};

#[test]
fn classic_little_endian_header() {
    let mut cursor = create_test_tiff_buffer();
    let header = read_header(&mut cursor).unwrap();
    assert_eq!(header.byte_order, ByteOrder::LittleEndian);
    assert!(!header.big_tiff);
    assert_eq!(header.offset_width(), 4);
    assert_eq!(header.first_dir_offset, 8);
}

#[test]
fn bigtiff_header() {
    let mut cursor = create_test_bigtiff_buffer();
    let header = read_header(&mut cursor).unwrap();
    assert!(header.big_tiff);
    assert_eq!(header.offset_width(), 8);
    assert_eq!(header.first_dir_offset, 16);
}

#[test]
fn big_endian_header() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x4D4D).unwrap(); // "MM"
    buffer.write_u16::<BigEndian>(42).unwrap();
    buffer.write_u32::<BigEndian>(8).unwrap();
    let header = read_header(&mut Cursor::new(buffer)).unwrap();
    assert_eq!(header.byte_order, ByteOrder::BigEndian);
    assert!(!header.big_tiff);
    assert_eq!(header.first_dir_offset, 8);
}

#[test]
fn bad_magic_is_format_unsupported() {
    let buffer = vec![0x4A, 0x4A, 42, 0, 8, 0, 0, 0];
    let err = read_header(&mut Cursor::new(buffer)).unwrap_err();
    assert!(matches!(err, TiffError::InvalidByteOrder(_)));
    assert_eq!(err.kind(), ErrorKind::FormatUnsupported);
}

#[test]
fn bad_version_is_format_unsupported() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(44).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    let err = read_header(&mut Cursor::new(buffer)).unwrap_err();
    assert!(matches!(err, TiffError::UnsupportedVersion(44)));
    assert_eq!(err.kind(), ErrorKind::FormatUnsupported);
}

#[test]
fn bigtiff_wrong_offset_size_rejected() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(43).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap(); // must be 8
    buffer.write_u16::<LittleEndian>(0).unwrap();
    buffer.write_u64::<LittleEndian>(16).unwrap();
    let err = read_header(&mut Cursor::new(buffer)).unwrap_err();
    assert!(matches!(err, TiffError::InvalidBigTiffHeader));
    assert_eq!(err.kind(), ErrorKind::FormatUnsupported);
}

#[test]
fn bigtiff_nonzero_pad_rejected() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(43).unwrap();
    buffer.write_u16::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(1).unwrap(); // must be 0
    buffer.write_u64::<LittleEndian>(16).unwrap();
    let err = read_header(&mut Cursor::new(buffer)).unwrap_err();
    assert!(matches!(err, TiffError::InvalidBigTiffHeader));
}

#[test]
fn empty_file_is_format_unsupported() {
    let err = read_header(&mut Cursor::new(Vec::new())).unwrap_err();
    assert!(matches!(err, TiffError::TruncatedHeader));
    assert_eq!(err.kind(), ErrorKind::FormatUnsupported);
}

#[test]
fn header_cut_short_after_magic() {
    let buffer = vec![0x49, 0x49, 42]; // version truncated
    let err = read_header(&mut Cursor::new(buffer)).unwrap_err();
    assert!(matches!(err, TiffError::TruncatedHeader));
}
