//! # Trade Math
//!
//! Numeric primitives and streaming indicators used by the forecasting engine.
//!
//! - [`statistics`]: mean, variance, least squares, autoregressive fit and
//!   error scoring over plain `f64` slices
//! - [`moving_averages`]: simple moving average
//! - [`volatility`]: Bollinger Bands
//! - [`oscillators`]: Relative Strength Index

use thiserror::Error;

// Indicator modules
pub mod moving_averages;
pub mod oscillators;
pub mod statistics;
pub mod volatility;

pub use moving_averages::SimpleMovingAverage;
pub use oscillators::RelativeStrengthIndex;
pub use statistics::LinearFit;
pub use volatility::{BandValues, BollingerBands};

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::LengthMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Length mismatch: expected 3 values, got 2");

        let err = MathError::EmptyInput("mean of empty slice".to_string());
        assert!(err.to_string().contains("mean of empty slice"));
    }
}
