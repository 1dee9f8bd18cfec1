//! Image processing pipeline module
//!
//! This module provides a structured approach to detector block imaging,
//! with separate modules for block reading, calibration, shading, BMP
//! writing, and conversion orchestration.

pub mod block;
pub mod bmp;
pub mod calibrate;
pub mod common;
pub mod conversions;
pub mod render;

pub use common::{PipelineError, Result};

pub use block::{BlockIntReader, GridReader, RawGrid};

pub use calibrate::{
    CalibratedGrid, CalibrationConfig, CalibrationConfigBuilder, CalibrationEngine, Cell,
    DegenerateDetectorPolicy,
};

pub use render::{NormalizedRenderer, RgbImageData, ThicknessRenderer, to_thickness};

pub use bmp::{BmpWriter, StandardBmpWriter};

pub use conversions::BlockToBmpPipeline;
