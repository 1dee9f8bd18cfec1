use tracing::debug;

use crate::image_pipeline::calibrate::types::CalibratedGrid;
use crate::image_pipeline::render::types::RgbImageData;

/// Sentinel color marking reference-strip cells in the normalized view.
const CALIBRATED_SENTINEL: [u8; 3] = [255, 0, 0];

/// Shades the normalized intensity view.
///
/// Reference-strip cells render as the fixed sentinel color regardless of
/// their value; every other cell renders as grayscale.
pub struct NormalizedRenderer;

impl NormalizedRenderer {
    pub fn render(&self, grid: &CalibratedGrid) -> RgbImageData {
        debug!("Shading normalized view: {}x{}", grid.width, grid.height);

        let mut data = Vec::with_capacity(grid.width * grid.height * 3);
        for cell in &grid.cells {
            if cell.is_calibrated {
                data.extend_from_slice(&CALIBRATED_SENTINEL);
            } else {
                // Saturating cast: negative pass-through values floor to 0,
                // clamped values never exceed 255.
                let channel = (cell.value * 255.0).round() as u8;
                data.extend_from_slice(&[channel, channel, channel]);
            }
        }

        RgbImageData {
            width: grid.width,
            height: grid.height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::calibrate::types::Cell;

    fn one_cell_grid(cell: Cell) -> CalibratedGrid {
        CalibratedGrid {
            width: 1,
            height: 1,
            cells: vec![cell],
        }
    }

    #[test]
    fn calibrated_cells_render_as_sentinel_red() {
        let grid = one_cell_grid(Cell {
            value: 0.5,
            is_calibrated: true,
        });
        let image = NormalizedRenderer.render(&grid);
        assert_eq!(image.data, vec![255, 0, 0]);
    }

    #[test]
    fn uncalibrated_cells_render_as_rounded_grayscale() {
        let grid = one_cell_grid(Cell {
            value: 0.5,
            is_calibrated: false,
        });
        let image = NormalizedRenderer.render(&grid);
        assert_eq!(image.data, vec![128, 128, 128]);
    }

    #[test]
    fn negative_pass_through_values_floor_to_black() {
        let grid = one_cell_grid(Cell {
            value: -0.25,
            is_calibrated: false,
        });
        let image = NormalizedRenderer.render(&grid);
        assert_eq!(image.data, vec![0, 0, 0]);
    }

    #[test]
    fn unit_value_renders_as_white() {
        let grid = one_cell_grid(Cell {
            value: 1.0,
            is_calibrated: false,
        });
        let image = NormalizedRenderer.render(&grid);
        assert_eq!(image.data, vec![255, 255, 255]);
    }
}
