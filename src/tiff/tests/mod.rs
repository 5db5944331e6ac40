//! Tests for the TIFF directory parsing engine

mod header_tests;
mod reader_tests;
