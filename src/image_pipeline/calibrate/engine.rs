use tracing::debug;

use crate::image_pipeline::block::types::RawGrid;
use crate::image_pipeline::calibrate::types::{
    CalibratedGrid, CalibrationConfig, Cell, DegenerateDetectorPolicy,
};
use crate::image_pipeline::common::error::{PipelineError, Result};

/// Two-stage flat-field calibration over a raw detector grid.
///
/// The engine is a pure function of its input and configuration. A pass
/// subtracts the detector background, normalizes against the beta-thorne
/// reference rows, normalizes against the detector reference columns, and
/// clamps the result into the displayable range. Stage order matters: each
/// stage reads the values and calibration flags left by the previous one.
pub struct CalibrationEngine {
    config: CalibrationConfig,
}

impl CalibrationEngine {
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Runs the full calibration pass.
    ///
    /// All-or-nothing: dimension checks run before any cell is touched and
    /// no partial grid is ever returned.
    pub fn calibrate(&self, raw: &RawGrid) -> Result<CalibratedGrid> {
        self.validate_dimensions(raw)?;

        let mut grid = self.subtract_background(raw);
        self.apply_row_reference(&mut grid);
        self.apply_column_reference(&mut grid);
        clamp(&mut grid);

        debug!(
            width = grid.width,
            height = grid.height,
            "Calibration pass complete"
        );
        Ok(grid)
    }

    fn validate_dimensions(&self, raw: &RawGrid) -> Result<()> {
        if raw.width == 0 || raw.height == 0 {
            return Err(PipelineError::EmptyGrid(raw.width, raw.height));
        }
        if raw.height < self.config.reference_rows {
            return Err(PipelineError::InsufficientRows {
                rows: raw.height,
                needed: self.config.reference_rows,
            });
        }
        if raw.width < self.config.reference_columns {
            return Err(PipelineError::InsufficientColumns {
                columns: raw.width,
                needed: self.config.reference_columns,
            });
        }
        Ok(())
    }

    /// Stage 1: floor every reading at the background level.
    fn subtract_background(&self, raw: &RawGrid) -> CalibratedGrid {
        let threshold = self.config.signal_threshold;
        let cells = raw
            .data
            .iter()
            .map(|&reading| Cell {
                value: if reading > threshold {
                    (reading - threshold) as f64
                } else {
                    0.0
                },
                is_calibrated: false,
            })
            .collect();

        CalibratedGrid {
            width: raw.width,
            height: raw.height,
            cells,
        }
    }

    /// Stage 2, beta-thorne: the trailing reference rows give a per-column
    /// flat-field average. Every cell outside the strip is scaled by the
    /// ratio of the overall average to its column's average; a zero column
    /// average forces the column to zero instead of dividing.
    fn apply_row_reference(&self, grid: &mut CalibratedGrid) {
        let (height, width) = (grid.height, grid.width);
        let strip_start = height - self.config.reference_rows;

        let mut row_ref = vec![0.0f64; width];
        for col in 0..width {
            let mut sum = 0.0;
            for row in strip_start..height {
                let cell = &mut grid.cells[row * width + col];
                sum += cell.value;
                cell.is_calibrated = true;
            }
            row_ref[col] = sum / self.config.reference_rows as f64;
        }

        let overall = row_ref.iter().sum::<f64>() / width as f64;
        debug!(overall_row_reference = overall, "Beta-thorne profile computed");

        for row in 0..height {
            for col in 0..width {
                let cell = &mut grid.cells[row * width + col];
                if cell.is_calibrated {
                    continue;
                }
                if row_ref[col] != 0.0 {
                    cell.value *= overall / row_ref[col];
                } else {
                    cell.value = 0.0;
                }
            }
        }
    }

    /// Stage 3, detector: the trailing reference columns give a per-row
    /// average. Cells already claimed by the beta-thorne strip are excluded
    /// from the sum, but the divisor stays the full strip width.
    fn apply_column_reference(&self, grid: &mut CalibratedGrid) {
        let (height, width) = (grid.height, grid.width);
        let strip_start = width - self.config.reference_columns;

        let mut col_ref = vec![0.0f64; height];
        for row in 0..height {
            let mut sum = 0.0;
            for col in strip_start..width {
                let cell = &mut grid.cells[row * width + col];
                if !cell.is_calibrated {
                    sum += cell.value;
                    cell.is_calibrated = true;
                }
            }
            col_ref[row] = sum / self.config.reference_columns as f64;
        }

        let force_zero = self.config.degenerate_detector == DegenerateDetectorPolicy::ForceZero;
        for row in 0..height {
            for col in 0..width {
                let cell = &mut grid.cells[row * width + col];
                if cell.is_calibrated {
                    continue;
                }
                if col_ref[row] == 0.0 && force_zero {
                    cell.value = 0.0;
                } else {
                    cell.value /= col_ref[row];
                }
            }
        }
    }
}

/// Stage 4: cap every cell at 1.0. No lower clamp; stage 1 floors raw
/// readings, but the reference scaling may leave small negative values and
/// those pass through. NaN values also pass through, the comparison is false.
fn clamp(grid: &mut CalibratedGrid) {
    for cell in &mut grid.cells {
        if cell.value > 1.0 {
            cell.value = 1.0;
        }
    }
}
