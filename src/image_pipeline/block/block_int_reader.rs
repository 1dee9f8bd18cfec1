//! Block scan reader for the proprietary `.int` detector format.
//!
//! A block file starts with two little-endian 32-bit dimension words (width,
//! then height), followed by 14 reserved 32-bit words carrying acquisition
//! metadata the pipeline does not interpret, followed by `height * width`
//! 32-bit intensity readings in row-major order.

use std::io::Cursor;

use byteorder::{LE, ReadBytesExt};
use tracing::debug;

use crate::image_pipeline::block::reader::GridReader;
use crate::image_pipeline::block::types::RawGrid;
use crate::image_pipeline::common::error::{PipelineError, Result};

/// Reader for raw detector block scans in the `.int` container.
pub struct BlockIntReader;

/// Reserved 32-bit words between the dimension fields and the pixel data.
const RESERVED_HEADER_WORDS: u64 = 14;

/// Bytes per stored reading (and per header word).
const WORD_SIZE: u64 = 4;

impl GridReader for BlockIntReader {
    /// Decodes a block scan from a byte array.
    ///
    /// Dimensions are validated right after the two dimension words, before
    /// any pixel data is touched: a zero width or height is rejected as
    /// [`PipelineError::EmptyGrid`]. Readings are stored as unsigned words on
    /// disk and reinterpreted as signed, matching the acquisition software.
    fn read_grid(&self, data: &[u8]) -> Result<RawGrid> {
        debug!("Decoding block scan, {} bytes", data.len());

        let mut cursor = Cursor::new(data);

        let width = cursor
            .read_u32::<LE>()
            .map_err(|e| PipelineError::DecodeError(format!("missing width field: {e}")))?
            as usize;
        let height = cursor
            .read_u32::<LE>()
            .map_err(|e| PipelineError::DecodeError(format!("missing height field: {e}")))?
            as usize;

        if width == 0 || height == 0 {
            return Err(PipelineError::EmptyGrid(width, height));
        }

        cursor.set_position(cursor.position() + RESERVED_HEADER_WORDS * WORD_SIZE);

        let mut readings = Vec::with_capacity(height * width);
        for _ in 0..height * width {
            let word = cursor.read_u32::<LE>().map_err(|e| {
                PipelineError::DecodeError(format!(
                    "truncated pixel data after {} of {} readings: {e}",
                    readings.len(),
                    height * width
                ))
            })?;
            readings.push(word as i32);
        }

        debug!("Decoded block scan: {}x{}", width, height);

        Ok(RawGrid {
            width,
            height,
            data: readings,
        })
    }
}

#[cfg(test)]
mod tests {
    use byteorder::{LE, WriteBytesExt};

    use super::*;

    fn block_bytes(width: u32, height: u32, readings: &[u32]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_u32::<LE>(width).unwrap();
        buf.write_u32::<LE>(height).unwrap();
        for word in 0..RESERVED_HEADER_WORDS {
            buf.write_u32::<LE>(0xDEAD_0000 | word as u32).unwrap();
        }
        for &r in readings {
            buf.write_u32::<LE>(r).unwrap();
        }
        buf
    }

    #[test]
    fn decodes_dimensions_and_readings() {
        let readings: Vec<u32> = (0..6).map(|v| 2000 + v * 100).collect();
        let bytes = block_bytes(3, 2, &readings);

        let grid = BlockIntReader.read_grid(&bytes).unwrap();

        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.get(0, 0), 2000);
        assert_eq!(grid.get(0, 2), 2200);
        assert_eq!(grid.get(1, 0), 2300);
        assert_eq!(grid.get(1, 2), 2500);
    }

    #[test]
    fn reserved_header_words_are_skipped() {
        // The sentinel pattern in the reserved words must not leak into data.
        let bytes = block_bytes(1, 1, &[42]);
        let grid = BlockIntReader.read_grid(&bytes).unwrap();
        assert_eq!(grid.data, vec![42]);
    }

    #[test]
    fn zero_width_is_rejected_before_pixel_read() {
        let bytes = block_bytes(0, 5, &[]);
        let err = BlockIntReader.read_grid(&bytes).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyGrid(0, 5)));
    }

    #[test]
    fn zero_height_is_rejected_before_pixel_read() {
        let bytes = block_bytes(7, 0, &[]);
        let err = BlockIntReader.read_grid(&bytes).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyGrid(7, 0)));
    }

    #[test]
    fn truncated_pixel_data_is_a_decode_error() {
        let mut bytes = block_bytes(4, 4, &(0..16).collect::<Vec<u32>>());
        bytes.truncate(bytes.len() - 10);

        let err = BlockIntReader.read_grid(&bytes).unwrap_err();
        assert!(matches!(err, PipelineError::DecodeError(_)));
    }

    #[test]
    fn truncated_header_is_a_decode_error() {
        let err = BlockIntReader.read_grid(&[0x10, 0x00]).unwrap_err();
        assert!(matches!(err, PipelineError::DecodeError(_)));
    }

    #[test]
    fn large_unsigned_words_wrap_to_signed() {
        let bytes = block_bytes(1, 1, &[u32::MAX]);
        let grid = BlockIntReader.read_grid(&bytes).unwrap();
        assert_eq!(grid.get(0, 0), -1);
    }
}
