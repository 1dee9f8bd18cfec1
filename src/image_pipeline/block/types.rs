//! Raw detector grid types

/// Represents one decoded detector block scan
#[derive(Debug, Clone)]
pub struct RawGrid {
    /// Width of the grid in detector channels
    pub width: usize,
    /// Height of the grid in scan rows
    pub height: usize,
    /// Raw intensity readings, row-major
    pub data: Vec<i32>,
}

impl RawGrid {
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.width + col]
    }
}
