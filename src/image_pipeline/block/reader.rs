use crate::image_pipeline::block::types::RawGrid;
use crate::image_pipeline::common::error::Result;

pub trait GridReader {
    fn read_grid(&self, data: &[u8]) -> Result<RawGrid>;
}
