use tracing::debug;

use crate::image_pipeline::calibrate::types::{CalibratedGrid, Cell};
use crate::image_pipeline::render::types::RgbImageData;

/// Scale from log-attenuation units to display intensity.
const THICKNESS_SCALE: f64 = 25.0;

/// Substitute thickness for non-positive values, where the log is undefined.
const OPAQUE_THICKNESS: f64 = 10.0;

/// Maps one calibrated cell to a thickness display intensity.
///
/// Thickness is `-ln(value)` under a simple exponential attenuation model.
/// The calibration flag plays no role here, unlike in the normalized view.
pub fn to_thickness(cell: &Cell) -> u8 {
    let t = if cell.value > 0.0 {
        -cell.value.ln()
    } else {
        OPAQUE_THICKNESS
    };
    (t * THICKNESS_SCALE).round().clamp(0.0, 255.0) as u8
}

/// Shades the thickness/attenuation map as plain grayscale.
pub struct ThicknessRenderer;

impl ThicknessRenderer {
    pub fn render(&self, grid: &CalibratedGrid) -> RgbImageData {
        debug!("Shading thickness view: {}x{}", grid.width, grid.height);

        let mut data = Vec::with_capacity(grid.width * grid.height * 3);
        for cell in &grid.cells {
            let intensity = to_thickness(cell);
            data.extend_from_slice(&[intensity, intensity, intensity]);
        }

        RgbImageData {
            width: grid.width,
            height: grid.height,
            data,
        }
    }
}
