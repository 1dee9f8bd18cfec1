use std::io::Write;

use byteorder::{LE, WriteBytesExt};
use tracing::debug;

use crate::image_pipeline::bmp::writer::BmpWriter;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::render::types::RgbImageData;

const BYTES_PER_PIXEL: usize = 3;
const FILE_HEADER_SIZE: usize = 14;
const INFO_HEADER_SIZE: usize = 40;
const PIXEL_ARRAY_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// Writes uncompressed 24-bit BMP files.
///
/// Each call assembles the whole file into a locally owned buffer. The
/// header declares a positive height and rows are emitted in data order,
/// byte-for-byte what the legacy viewers consume.
pub struct StandardBmpWriter;

impl BmpWriter for StandardBmpWriter {
    fn write_bmp(&self, image: &RgbImageData, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding BMP image: {}x{}", image.width, image.height);

        let expected = image.width * image.height * BYTES_PER_PIXEL;
        if image.data.len() != expected {
            return Err(PipelineError::EncodeError(format!(
                "pixel buffer holds {} bytes, expected {} for {}x{}",
                image.data.len(),
                expected,
                image.width,
                image.height
            )));
        }

        let row_bytes = image.width * BYTES_PER_PIXEL;
        let padding = (4 - row_bytes % 4) % 4;
        let stride = row_bytes + padding;

        let mut buffer = Vec::with_capacity(PIXEL_ARRAY_OFFSET + stride * image.height);
        write_file_header(&mut buffer, image.height, stride)?;
        write_info_header(&mut buffer, image.width, image.height)?;

        let pad = [0u8; 3];
        for row in image.data.chunks_exact(row_bytes) {
            for pixel in row.chunks_exact(BYTES_PER_PIXEL) {
                // pixel order on disk is blue, green, red
                buffer.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
            }
            buffer.extend_from_slice(&pad[..padding]);
        }

        output.write_all(&buffer)?;

        debug!("BMP encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

fn write_file_header(buffer: &mut Vec<u8>, height: usize, stride: usize) -> Result<()> {
    let file_size = PIXEL_ARRAY_OFFSET + stride * height;

    buffer.extend_from_slice(b"BM");
    buffer.write_u32::<LE>(file_size as u32)?;
    buffer.write_u32::<LE>(0)?; // reserved
    buffer.write_u32::<LE>(PIXEL_ARRAY_OFFSET as u32)?;
    Ok(())
}

fn write_info_header(buffer: &mut Vec<u8>, width: usize, height: usize) -> Result<()> {
    buffer.write_u32::<LE>(INFO_HEADER_SIZE as u32)?;
    buffer.write_i32::<LE>(width as i32)?;
    buffer.write_i32::<LE>(height as i32)?;
    buffer.write_u16::<LE>(1)?; // color planes
    buffer.write_u16::<LE>((BYTES_PER_PIXEL * 8) as u16)?;
    buffer.write_u32::<LE>(0)?; // compression
    buffer.write_u32::<LE>(0)?; // image size, zero is allowed when uncompressed
    buffer.write_u32::<LE>(0)?; // horizontal resolution
    buffer.write_u32::<LE>(0)?; // vertical resolution
    buffer.write_u32::<LE>(0)?; // palette size
    buffer.write_u32::<LE>(0)?; // important colors
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: usize, height: usize) -> RgbImageData {
        let data = (0..width * height * BYTES_PER_PIXEL)
            .map(|i| i as u8)
            .collect();
        RgbImageData {
            width,
            height,
            data,
        }
    }

    fn encode(image: &RgbImageData) -> Vec<u8> {
        let mut out = Vec::new();
        StandardBmpWriter.write_bmp(image, &mut out).unwrap();
        out
    }

    #[test]
    fn header_layout_matches_the_container() {
        let bytes = encode(&image(2, 2));

        assert_eq!(&bytes[0..2], b"BM");
        // 2x2 at 24bpp: rows of 6 bytes pad to an 8-byte stride
        let file_size = 54 + 8 * 2;
        assert_eq!(bytes.len(), file_size);
        assert_eq!(
            u32::from_le_bytes(bytes[2..6].try_into().unwrap()),
            file_size as u32
        );
        assert_eq!(u32::from_le_bytes(bytes[10..14].try_into().unwrap()), 54);
        assert_eq!(u32::from_le_bytes(bytes[14..18].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(bytes[18..22].try_into().unwrap()), 2);
        assert_eq!(i32::from_le_bytes(bytes[22..26].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(bytes[26..28].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[28..30].try_into().unwrap()), 24);
    }

    #[test]
    fn pixels_are_emitted_blue_green_red() {
        let source = RgbImageData {
            width: 1,
            height: 1,
            data: vec![10, 20, 30],
        };
        let bytes = encode(&source);

        assert_eq!(&bytes[54..57], &[30, 20, 10]);
    }

    #[test]
    fn rows_pad_to_a_four_byte_stride() {
        let bytes = encode(&image(2, 2));

        // padding bytes at the end of the first row are zero
        assert_eq!(&bytes[60..62], &[0, 0]);
        // second source row (RGB 6,7,8 first) starts one stride in, as BGR
        assert_eq!(&bytes[62..65], &[8, 7, 6]);
    }

    #[test]
    fn aligned_widths_take_no_padding() {
        let bytes = encode(&image(4, 1));
        assert_eq!(bytes.len(), 54 + 4 * BYTES_PER_PIXEL);
    }

    #[test]
    fn mismatched_pixel_buffer_is_an_encode_error() {
        let broken = RgbImageData {
            width: 2,
            height: 2,
            data: vec![0; 5],
        };
        let mut out = Vec::new();
        let err = StandardBmpWriter.write_bmp(&broken, &mut out).unwrap_err();
        assert!(matches!(err, PipelineError::EncodeError(_)));
        assert!(out.is_empty());
    }
}
