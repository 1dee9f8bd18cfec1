//! Block file reading module
//!
//! This module provides reading of raw detector block scans.

mod block_int_reader;
mod reader;
pub mod types;

pub use block_int_reader::BlockIntReader;
pub use reader::GridReader;
pub use types::RawGrid;
