//! BMP writing module
//!
//! This module serializes rendered RGB data into the uncompressed 24-bit
//! BMP container the downstream viewers expect.

mod standard_bmp_writer;
mod writer;

pub use standard_bmp_writer::StandardBmpWriter;
pub use writer::BmpWriter;
