//! Flat-field calibration module
//!
//! This module turns a raw detector grid into a calibrated grid via
//! background subtraction, beta-thorne row-reference normalization,
//! detector column-reference normalization, and clamping.

mod engine;
pub mod types;

pub use engine::CalibrationEngine;
pub use types::{
    CalibratedGrid, CalibrationConfig, CalibrationConfigBuilder, Cell, DegenerateDetectorPolicy,
};
