//! Ordinary least squares trend line over the whole series

use crate::config::ForecastConfig;
use crate::data::ForecastPoint;
use crate::error::Result;
use crate::models::{require_points, Algorithm, Forecaster, ModelForecast};
use crate::utils::{future_dates, unit_interval};
use chrono::NaiveDate;
use trade_math::statistics::{accuracy, ordinary_least_squares, std_dev, variance};
use trade_math::LinearFit;

const CONFIDENCE: f64 = 0.70;

/// Fits `price = slope * index + intercept` and extrapolates the line
///
/// The band is the residual standard deviation widened by the usual
/// prediction-interval distance factor, so it grows as the forecast moves
/// away from the centre of the training window.
#[derive(Debug, Clone)]
pub struct LinearRegressionForecaster {
    z_score: f64,
}

impl LinearRegressionForecaster {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            z_score: config.z_score,
        }
    }

    /// Fit the trend line over `(index, price)` pairs
    pub fn fit(&self, prices: &[f64]) -> Result<LinearFit> {
        Ok(ordinary_least_squares(&index_axis(prices.len()), prices)?)
    }
}

impl Default for LinearRegressionForecaster {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}

fn index_axis(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

impl Forecaster for LinearRegressionForecaster {
    fn algorithm(&self) -> Algorithm {
        Algorithm::LinearRegression
    }

    fn forecast(
        &self,
        prices: &[f64],
        last_date: NaiveDate,
        horizon: usize,
    ) -> Result<ModelForecast> {
        require_points(prices, 2)?;
        let n = prices.len() as f64;
        let x = index_axis(prices.len());

        let fit = ordinary_least_squares(&x, prices)?;
        let fitted: Vec<f64> = x.iter().map(|&xi| fit.predict(xi)).collect();
        let residuals: Vec<f64> = prices
            .iter()
            .zip(fitted.iter())
            .map(|(p, f)| p - f)
            .collect();
        let residual_std = std_dev(&residuals)?;
        let index_variance = variance(&x)?;

        let points = future_dates(last_date, horizon)?
            .into_iter()
            .enumerate()
            .map(|(idx, date)| {
                let xi = n + idx as f64;
                let distance =
                    (1.0 + 1.0 / n + (xi - n / 2.0).powi(2) / index_variance).sqrt();
                ForecastPoint::centered(
                    date,
                    fit.predict(xi),
                    self.z_score * residual_std * distance,
                )
            })
            .collect();

        tracing::debug!(
            slope = fit.slope,
            intercept = fit.intercept,
            residual_std,
            "linear regression fitted"
        );

        Ok(ModelForecast {
            points,
            confidence: CONFIDENCE,
            accuracy: unit_interval(accuracy(prices, &fitted)?),
            mae: residual_std,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear_series() -> Vec<f64> {
        (0..30).map(|t| 100.0 + 0.5 * t as f64).collect()
    }

    #[test]
    fn test_recovers_slope_and_intercept() {
        let fit = LinearRegressionForecaster::default()
            .fit(&linear_series())
            .unwrap();

        assert_relative_eq!(fit.slope, 0.5, epsilon = 1e-9);
        assert_relative_eq!(fit.intercept, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_first_step_continues_the_line() {
        let prices = linear_series();
        let last = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let result = LinearRegressionForecaster::default()
            .forecast(&prices, last, 3)
            .unwrap();

        assert_relative_eq!(result.points[0].rate, prices[29] + 0.5, epsilon = 1e-9);
        assert_relative_eq!(result.points[2].rate, prices[29] + 1.5, epsilon = 1e-9);
        assert!(result.mae < 1e-9);
        assert_relative_eq!(result.accuracy, 1.0, epsilon = 1e-9);
        assert_eq!(result.confidence, 0.70);
    }

    #[test]
    fn test_band_grows_away_from_the_data() {
        let prices = [1.31, 1.29, 1.33, 1.30, 1.34, 1.32, 1.36, 1.33, 1.37, 1.35];
        let last = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let result = LinearRegressionForecaster::default()
            .forecast(&prices, last, 5)
            .unwrap();

        let widths: Vec<f64> = result.points.iter().map(|p| p.upper - p.lower).collect();
        assert!(widths.windows(2).all(|w| w[1] > w[0]));
        assert!(result.points.iter().all(|p| p.lower <= p.rate && p.rate <= p.upper));
    }
}
