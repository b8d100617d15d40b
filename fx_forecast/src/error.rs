//! Error types for the fx_forecast crate

use thiserror::Error;
use trade_math::MathError;

/// Custom error types for the fx_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Too few observations to run any estimator
    #[error("Insufficient data: need at least {required} price points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Algorithm name outside the supported set (only under a rejecting fallback policy)
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Error from the numeric kernel
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
