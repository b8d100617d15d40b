//! Relative Strength Index (RSI)
//!
//! Unlike Wilder's smoothed RSI, this variant averages the raw gains and
//! losses of the trailing `period` price changes, so every value depends only
//! on the last `period + 1` closes.

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Floor applied to the average loss so a loss-free window maps to ~100
pub const RSI_LOSS_EPSILON: f64 = 1e-6;

/// Relative Strength Index (RSI) implementation
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    period: usize,
    previous_price: Option<f64>,
    gains: VecDeque<f64>,
    losses: VecDeque<f64>,
}

impl RelativeStrengthIndex {
    /// Create a new RSI with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            previous_price: None,
            gains: VecDeque::with_capacity(period + 1),
            losses: VecDeque::with_capacity(period + 1),
        })
    }

    /// Update the RSI with a new price value
    pub fn update(&mut self, price: f64) {
        if let Some(prev_price) = self.previous_price {
            let change = price - prev_price;

            self.gains.push_back(change.max(0.0));
            self.losses.push_back((-change).max(0.0));

            if self.gains.len() > self.period {
                self.gains.pop_front();
                self.losses.pop_front();
            }
        }

        self.previous_price = Some(price);
    }

    /// Current RSI value (0-100), or `None` until `period` changes are seen
    pub fn value(&self) -> Option<f64> {
        if self.gains.len() < self.period {
            return None;
        }

        let avg_gain = self.gains.iter().sum::<f64>() / self.period as f64;
        let avg_loss = self.losses.iter().sum::<f64>() / self.period as f64;

        let rs = avg_gain / avg_loss.max(RSI_LOSS_EPSILON);
        Some(100.0 - 100.0 / (1.0 + rs))
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Reset the RSI, clearing all values
    pub fn reset(&mut self) {
        self.previous_price = None;
        self.gains.clear();
        self.losses.clear();
    }
}
