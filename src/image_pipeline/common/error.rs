use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode block file: {0}")]
    DecodeError(String),

    #[error("Failed to encode bitmap image: {0}")]
    EncodeError(String),

    #[error("Image dimensions cannot be zero: width={0}, height={1}")]
    EmptyGrid(usize, usize),

    #[error("Not enough rows for beta-thorne calibration: grid has {rows}, need {needed}")]
    InsufficientRows { rows: usize, needed: usize },

    #[error("Not enough columns for detector calibration: grid has {columns}, need {needed}")]
    InsufficientColumns { columns: usize, needed: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
