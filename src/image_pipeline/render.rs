//! Shading module
//!
//! This module maps calibrated grids to displayable RGB pixel data, one
//! shader per view: the normalized intensity view and the thickness map.

mod normalized;
mod thickness;
pub mod types;

pub use normalized::NormalizedRenderer;
pub use thickness::{ThicknessRenderer, to_thickness};
pub use types::RgbImageData;
