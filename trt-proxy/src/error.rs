//! Error types for trt-proxy
//!
//! Only the recoverable paths (descriptor construction, configuration
//! loading, host network mutation) report through [`Error`]. Broken tensor
//! handle invariants are programming errors and panic instead.

use thiserror::Error;

/// Result type alias using trt-proxy's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for trt-proxy operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Too many dimensions: rank {rank} exceeds the maximum of {max}")]
    TooManyDims { rank: usize, max: usize },

    #[error("Invalid extent {value} at axis {axis} (only -1 may be negative)")]
    InvalidDim { axis: usize, value: i32 },

    #[error("Unknown data type: {0}")]
    UnknownDataType(String),

    #[error("Tensor already exists in network: {0}")]
    DuplicateTensor(String),

    #[error("Tensor not found: {0}")]
    TensorNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
