//! Calibration configuration and output types

/// One calibrated cell.
///
/// `is_calibrated` marks cells whose value came directly from a reference
/// strip (background-subtracted only) rather than through the proportion or
/// division corrections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Normalized intensity, at most 1.0 after clamping
    pub value: f64,
    /// Whether this cell lies in a reference strip
    pub is_calibrated: bool,
}

/// Calibrated output grid, same dimensions as the raw input.
#[derive(Debug, Clone)]
pub struct CalibratedGrid {
    /// Width of the grid in detector channels
    pub width: usize,
    /// Height of the grid in scan rows
    pub height: usize,
    /// Cells, row-major
    pub cells: Vec<Cell>,
}

impl CalibratedGrid {
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.width + col]
    }
}

/// How the detector stage treats a row whose reference average is zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateDetectorPolicy {
    /// Divide through regardless. A zero average propagates infinite or NaN
    /// values into the affected row, matching the acquisition software.
    Propagate,
    /// Force the affected cells to zero, like the beta-thorne zero guard.
    ForceZero,
}

/// Configuration for the calibration pass
#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    /// Detector background level subtracted from every raw reading
    pub signal_threshold: i32,
    /// Trailing rows forming the beta-thorne reference strip
    pub reference_rows: usize,
    /// Trailing columns forming the detector reference strip
    pub reference_columns: usize,
    /// Zero-average handling for the detector stage
    pub degenerate_detector: DegenerateDetectorPolicy,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            signal_threshold: 2048,
            reference_rows: 15,
            reference_columns: 50,
            degenerate_detector: DegenerateDetectorPolicy::Propagate,
        }
    }
}

impl CalibrationConfig {
    pub fn builder() -> CalibrationConfigBuilder {
        CalibrationConfigBuilder::default()
    }
}

/// Builder for CalibrationConfig
#[derive(Default)]
pub struct CalibrationConfigBuilder {
    signal_threshold: Option<i32>,
    reference_rows: Option<usize>,
    reference_columns: Option<usize>,
    degenerate_detector: Option<DegenerateDetectorPolicy>,
}

impl CalibrationConfigBuilder {
    pub fn signal_threshold(mut self, threshold: i32) -> Self {
        self.signal_threshold = Some(threshold);
        self
    }

    pub fn reference_rows(mut self, rows: usize) -> Self {
        self.reference_rows = Some(rows);
        self
    }

    pub fn reference_columns(mut self, columns: usize) -> Self {
        self.reference_columns = Some(columns);
        self
    }

    pub fn degenerate_detector(mut self, policy: DegenerateDetectorPolicy) -> Self {
        self.degenerate_detector = Some(policy);
        self
    }

    pub fn build(self) -> CalibrationConfig {
        let default = CalibrationConfig::default();
        CalibrationConfig {
            signal_threshold: self.signal_threshold.unwrap_or(default.signal_threshold),
            reference_rows: self.reference_rows.unwrap_or(default.reference_rows),
            reference_columns: self.reference_columns.unwrap_or(default.reference_columns),
            degenerate_detector: self
                .degenerate_detector
                .unwrap_or(default.degenerate_detector),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = CalibrationConfig::builder()
            .signal_threshold(100)
            .reference_rows(3)
            .reference_columns(5)
            .degenerate_detector(DegenerateDetectorPolicy::ForceZero)
            .build();

        assert_eq!(config.signal_threshold, 100);
        assert_eq!(config.reference_rows, 3);
        assert_eq!(config.reference_columns, 5);
        assert_eq!(
            config.degenerate_detector,
            DegenerateDetectorPolicy::ForceZero
        );
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = CalibrationConfig::builder().build();

        assert_eq!(config.signal_threshold, 2048);
        assert_eq!(config.reference_rows, 15);
        assert_eq!(config.reference_columns, 50);
        assert_eq!(
            config.degenerate_detector,
            DegenerateDetectorPolicy::Propagate
        );
    }
}
