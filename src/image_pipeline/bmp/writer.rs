use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::render::types::RgbImageData;

pub trait BmpWriter {
    fn write_bmp(&self, image: &RgbImageData, output: &mut dyn Write) -> Result<()>;
}
