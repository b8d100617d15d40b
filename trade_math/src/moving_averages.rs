//! Simple Moving Average (SMA)
//!
//! Streaming implementation: feed closes one at a time with `update` and read
//! the trailing-window mean with `value` once the window is full.

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Simple Moving Average (SMA) implementation
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    /// Create a new Simple Moving Average with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period + 1),
            sum: 0.0,
        })
    }

    /// Update the SMA with a new value
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        self.sum += value;

        if self.values.len() > self.period {
            if let Some(old_value) = self.values.pop_front() {
                self.sum -= old_value;
            }
        }
    }

    /// Whether a full window has been observed
    pub fn is_ready(&self) -> bool {
        self.values.len() == self.period
    }

    /// Current SMA value, or `None` until the window is full
    pub fn value(&self) -> Option<f64> {
        self.is_ready().then(|| self.sum / self.period as f64)
    }

    /// The values currently inside the window, oldest first
    pub fn window(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Reset the SMA, clearing all values
    pub fn reset(&mut self) {
        self.values.clear();
        self.sum = 0.0;
    }
}

/// SMA of `period` evaluated at every index of `values`
///
/// Entries before the window fills are `None`.
pub fn sma_series(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    let mut sma = SimpleMovingAverage::new(period)?;

    Ok(values
        .iter()
        .map(|&v| {
            sma.update(v);
            sma.value()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_calculation() {
        let mut sma = SimpleMovingAverage::new(3).unwrap();

        // Not enough data yet
        assert_eq!(sma.value(), None);

        sma.update(2.0);
        sma.update(4.0);
        assert_eq!(sma.value(), None);

        sma.update(6.0);
        assert_eq!(sma.value(), Some(4.0)); // (2 + 4 + 6) / 3

        // The window slides, dropping the oldest value
        sma.update(8.0);
        assert_eq!(sma.value(), Some(6.0)); // (4 + 6 + 8) / 3
    }

    #[test]
    fn test_sma_series_alignment() {
        let series = sma_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();

        assert_eq!(series, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(SimpleMovingAverage::new(0).is_err());
        assert!(sma_series(&[1.0], 0).is_err());
    }

    #[test]
    fn test_reset() {
        let mut sma = SimpleMovingAverage::new(1).unwrap();
        sma.update(5.0);
        assert!(sma.is_ready());

        sma.reset();
        assert_eq!(sma.value(), None);
        assert_eq!(sma.period(), 1);
    }
}
