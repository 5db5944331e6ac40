//! Tests for the directory walker and entry decoder

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::Cursor;

use crate::tiff::constants::field_types;
use crate::tiff::errors::{ErrorKind, TiffError};
use crate::tiff::reader::TiffReader;
use crate::tiff::tests::test_utils::{
    create_test_bigtiff_buffer, create_test_tiff_buffer, le_u16s, le_u32s, TestTiff,
};

#[test]
fn single_directory_classic() {
    let mut cursor = create_test_tiff_buffer();
    let tiff = TiffReader::read(&mut cursor).unwrap();
    assert!(!tiff.is_big_tiff());
    assert_eq!(tiff.directory_count(), 1);
    assert_eq!(tiff.get_uint(0, 256, 0), Some(800));
    assert_eq!(tiff.get_uint(0, 257, 0), Some(600));
}

#[test]
fn single_directory_bigtiff() {
    let mut cursor = create_test_bigtiff_buffer();
    let tiff = TiffReader::read(&mut cursor).unwrap();
    assert!(tiff.is_big_tiff());
    assert_eq!(tiff.directory_count(), 1);
    assert_eq!(tiff.get_uint(0, 256, 0), Some(1024));
    assert_eq!(tiff.get_uint(0, 257, 0), Some(768));
}

#[test]
fn entry_fields_round_trip() {
    let mut builder = TestTiff::new();
    builder.entry(256, field_types::LONG, 1, le_u32s(&[4096]));
    builder.entry(258, field_types::SHORT, 3, le_u16s(&[8, 8, 8]));
    builder.entry(270, field_types::ASCII, 12, b"hello world\0".to_vec());
    let tiff = TiffReader::read(&mut builder.cursor()).unwrap();

    let dir = tiff.directory(0).unwrap();
    assert_eq!(dir.len(), 3);

    let width = dir.get(256).unwrap();
    assert_eq!(width.field_type, field_types::LONG);
    assert_eq!(width.count, 1);
    assert_eq!(tiff.get_uint(0, 256, 0), Some(4096));

    assert_eq!(tiff.value_count(0, 258), 3);
    assert_eq!(tiff.get_uint(0, 258, 2), Some(8));

    assert_eq!(tiff.get_buffer(0, 270), Some(&b"hello world\0"[..]));
}

#[test]
fn inline_and_out_of_line_decode_identically() {
    // "hi\0" fits the 4-byte inline slot; padded past the threshold the
    // same logical string is stored out of line
    let mut inline = TestTiff::new();
    inline.entry(270, field_types::ASCII, 3, b"hi\0".to_vec());
    let mut spilled = TestTiff::new();
    spilled.entry(270, field_types::ASCII, 6, b"hi\0\0\0\0".to_vec());

    let a = TiffReader::read(&mut inline.cursor()).unwrap();
    let b = TiffReader::read(&mut spilled.cursor()).unwrap();

    let buf_a = a.get_buffer(0, 270).unwrap();
    let buf_b = b.get_buffer(0, 270).unwrap();
    assert_eq!(buf_a.len(), 3);
    assert_eq!(buf_b.len(), 6);
    assert_eq!(buf_a[..3], buf_b[..3]);
}

#[test]
fn stream_position_restored_after_out_of_line_detour() {
    // An out-of-line entry followed by an inline one: the second decodes
    // correctly only if the detour restored the position
    let mut builder = TestTiff::new();
    builder.entry(270, field_types::ASCII, 10, b"abcdefghi\0".to_vec());
    builder.entry(256, field_types::LONG, 1, le_u32s(&[123]));
    let tiff = TiffReader::read(&mut builder.cursor()).unwrap();
    assert_eq!(tiff.get_uint(0, 256, 0), Some(123));
    assert_eq!(tiff.get_buffer(0, 270).unwrap().len(), 10);
}

#[test]
fn directory_loop_is_rejected() {
    // Single IFD at offset 8 whose next pointer loops back to itself
    let mut builder = TestTiff::new();
    builder.entry(256, field_types::LONG, 1, le_u32s(&[1]));
    builder.next_ifd(8);
    let err = TiffReader::read(&mut builder.cursor()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadData);
    match err {
        TiffError::BadData(msg) => assert!(msg.contains("loop")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn chain_of_three_directories() {
    // Three 1-entry IFDs laid out back to back after the header
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    // each IFD is 2 + 12 + 4 = 18 bytes
    for n in 0..3u32 {
        let next = if n < 2 { 8 + (n + 1) * 18 } else { 0 };
        buffer.write_u16::<LittleEndian>(1).unwrap();
        buffer.write_u16::<LittleEndian>(256).unwrap();
        buffer.write_u16::<LittleEndian>(field_types::LONG).unwrap();
        buffer.write_u32::<LittleEndian>(1).unwrap();
        buffer.write_u32::<LittleEndian>(1000 + n).unwrap();
        buffer.write_u32::<LittleEndian>(next).unwrap();
    }

    let tiff = TiffReader::read(&mut Cursor::new(buffer)).unwrap();
    assert_eq!(tiff.directory_count(), 3);
    assert_eq!(tiff.get_uint(0, 256, 0), Some(1000));
    assert_eq!(tiff.get_uint(1, 256, 0), Some(1001));
    assert_eq!(tiff.get_uint(2, 256, 0), Some(1002));
}

#[test]
fn no_directories_is_bad_data() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(0).unwrap(); // empty chain
    let err = TiffReader::read(&mut Cursor::new(buffer)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadData);
    match err {
        TiffError::BadData(msg) => assert!(msg.contains("no directories")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn unknown_field_type_is_bad_data() {
    let mut builder = TestTiff::new();
    builder.entry(256, 99, 1, le_u32s(&[1]));
    let err = TiffReader::read(&mut builder.cursor()).unwrap_err();
    match err {
        TiffError::BadData(msg) => assert!(msg.contains("unknown type")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn truncated_out_of_line_value_is_bad_data() {
    // Declared count runs far past the end of the file
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(1).unwrap();
    buffer.write_u16::<LittleEndian>(270).unwrap();
    buffer.write_u16::<LittleEndian>(field_types::ASCII).unwrap();
    buffer.write_u32::<LittleEndian>(5000).unwrap(); // count
    buffer.write_u32::<LittleEndian>(26).unwrap(); // offset just past IFD
    buffer.write_u32::<LittleEndian>(0).unwrap();
    buffer.extend_from_slice(b"short");

    let err = TiffReader::read(&mut Cursor::new(buffer)).unwrap_err();
    match err {
        TiffError::BadData(msg) => assert!(msg.contains("cannot read value")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn duplicate_tag_keeps_last_occurrence() {
    let mut builder = TestTiff::new();
    builder.entry(256, field_types::LONG, 1, le_u32s(&[111]));
    builder.entry(256, field_types::LONG, 1, le_u32s(&[222]));
    let tiff = TiffReader::read(&mut builder.cursor()).unwrap();
    assert_eq!(tiff.directory(0).unwrap().len(), 1);
    assert_eq!(tiff.get_uint(0, 256, 0), Some(222));
}

#[test]
fn big_endian_values_are_corrected() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x4D4D).unwrap(); // "MM"
    buffer.write_u16::<BigEndian>(42).unwrap();
    buffer.write_u32::<BigEndian>(8).unwrap();
    buffer.write_u16::<BigEndian>(2).unwrap();
    // SHORT array of 3, stored out of line at offset 38
    buffer.write_u16::<BigEndian>(258).unwrap();
    buffer.write_u16::<BigEndian>(field_types::SHORT).unwrap();
    buffer.write_u32::<BigEndian>(3).unwrap();
    buffer.write_u32::<BigEndian>(38).unwrap();
    // LONG stored inline
    buffer.write_u16::<BigEndian>(256).unwrap();
    buffer.write_u16::<BigEndian>(field_types::LONG).unwrap();
    buffer.write_u32::<BigEndian>(1).unwrap();
    buffer.write_u32::<BigEndian>(70000).unwrap();
    buffer.write_u32::<BigEndian>(0).unwrap(); // next IFD
    buffer.write_u16::<BigEndian>(513).unwrap();
    buffer.write_u16::<BigEndian>(514).unwrap();
    buffer.write_u16::<BigEndian>(515).unwrap();

    let tiff = TiffReader::read(&mut Cursor::new(buffer)).unwrap();
    assert_eq!(tiff.get_uint(0, 256, 0), Some(70000));
    assert_eq!(tiff.get_uint(0, 258, 0), Some(513));
    assert_eq!(tiff.get_uint(0, 258, 1), Some(514));
    assert_eq!(tiff.get_uint(0, 258, 2), Some(515));
}

#[test]
fn zero_count_entry_is_valid() {
    let mut builder = TestTiff::new();
    builder.entry(256, field_types::LONG, 0, Vec::new());
    builder.entry(257, field_types::LONG, 1, le_u32s(&[10]));
    let tiff = TiffReader::read(&mut builder.cursor()).unwrap();
    assert_eq!(tiff.value_count(0, 256), 0);
    assert_eq!(tiff.get_uint(0, 256, 0), None);
    assert_eq!(tiff.get_uint(0, 257, 0), Some(10));
}

#[test]
fn oversized_directory_offset_is_bad_data() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(43).unwrap();
    buffer.write_u16::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(0).unwrap();
    buffer.write_u64::<LittleEndian>(u64::MAX).unwrap(); // unseekable offset
    let err = TiffReader::read(&mut Cursor::new(buffer)).unwrap_err();
    match err {
        TiffError::BadData(msg) => assert!(msg.contains("bad offset")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn directory_offset_past_eof_is_bad_data() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(4096).unwrap(); // nothing there
    let err = TiffReader::read(&mut Cursor::new(buffer)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadData);
}
