use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("Sample index {index} out of range (series has {len} samples)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Operation requires at least one sample but the series is empty")]
    EmptySeries,

    #[error("Filter returned {actual} samples, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid filter parameters: {0}")]
    InvalidFilterParams(String),

    #[error("Filter failed: {0}")]
    Filter(String),
}

pub type Result<T> = std::result::Result<T, SeriesError>;
