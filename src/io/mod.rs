//! I/O abstractions used by the TIFF parsing engine

pub mod byte_order;
pub mod seekable;
