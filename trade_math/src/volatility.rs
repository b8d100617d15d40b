//! Bollinger Bands
//!
//! Middle band is the SMA of the window; the outer bands sit `multiplier`
//! population standard deviations above and below it.

use crate::moving_averages::SimpleMovingAverage;
use crate::{MathError, Result};

/// Upper, middle and lower band at one point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandValues {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands implementation
#[derive(Debug, Clone)]
pub struct BollingerBands {
    std_dev_multiplier: f64,
    sma: SimpleMovingAverage,
}

impl BollingerBands {
    /// Create a new Bollinger Bands with the specified parameters
    pub fn new(period: usize, std_dev_multiplier: f64) -> Result<Self> {
        if std_dev_multiplier.is_nan() || std_dev_multiplier <= 0.0 {
            return Err(MathError::InvalidInput(
                "Standard deviation multiplier must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            std_dev_multiplier,
            sma: SimpleMovingAverage::new(period)?,
        })
    }

    /// Update the Bollinger Bands with a new price value
    pub fn update(&mut self, price: f64) {
        self.sma.update(price);
    }

    /// Current bands, or `None` until the window is full
    pub fn bands(&self) -> Option<BandValues> {
        let middle = self.sma.value()?;

        let variance = self
            .sma
            .window()
            .map(|&price| {
                let diff = price - middle;
                diff * diff
            })
            .sum::<f64>()
            / self.sma.period() as f64;
        let offset = variance.sqrt() * self.std_dev_multiplier;

        Some(BandValues {
            upper: middle + offset,
            middle,
            lower: middle - offset,
        })
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.sma.period()
    }

    /// Get the standard deviation multiplier
    pub fn std_dev_multiplier(&self) -> f64 {
        self.std_dev_multiplier
    }

    /// Reset the Bollinger Bands, clearing all values
    pub fn reset(&mut self) {
        self.sma.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bollinger_bands_calculation() {
        let mut bb = BollingerBands::new(3, 2.0).unwrap();

        bb.update(10.0);
        bb.update(11.0);
        assert_eq!(bb.bands(), None);

        bb.update(9.0);
        let bands = bb.bands().unwrap();

        let std_dev = (2.0f64 / 3.0).sqrt();
        assert_relative_eq!(bands.middle, 10.0);
        assert_relative_eq!(bands.upper, 10.0 + 2.0 * std_dev);
        assert_relative_eq!(bands.lower, 10.0 - 2.0 * std_dev);
    }

    #[test]
    fn test_flat_window_collapses_bands() {
        let mut bb = BollingerBands::new(4, 2.0).unwrap();
        for _ in 0..4 {
            bb.update(1.5);
        }

        let bands = bb.bands().unwrap();
        assert_eq!(bands.upper, bands.lower);
        assert_eq!(bands.middle, 1.5);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(BollingerBands::new(0, 2.0).is_err());
        assert!(BollingerBands::new(20, 0.0).is_err());
        assert!(BollingerBands::new(20, f64::NAN).is_err());
    }
}
