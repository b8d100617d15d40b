//! Holt's linear trend exponential smoothing

use crate::config::{ForecastConfig, HoltParams};
use crate::data::ForecastPoint;
use crate::error::Result;
use crate::models::{require_points, Algorithm, Forecaster, ModelForecast};
use crate::utils::{future_dates, unit_interval};
use chrono::NaiveDate;
use trade_math::statistics::mean;

const CONFIDENCE: f64 = 0.72;

/// Holt's method with a level and an additive trend component
#[derive(Debug, Clone)]
pub struct ExponentialSmoothingForecaster {
    params: HoltParams,
    z_score: f64,
}

/// Smoothed state after walking the whole series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoltState {
    pub level: f64,
    pub trend: f64,
    /// Mean absolute one-step-ahead error over the walk
    pub mae: f64,
}

impl ExponentialSmoothingForecaster {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            params: config.smoothing.clone(),
            z_score: config.z_score,
        }
    }

    /// Run the smoothing recursion forward over `prices`
    ///
    /// Starts from `level = p[0]`, `trend = p[1] - p[0]` and records the
    /// one-step-ahead error `|p[t] - (level + trend)|` before each update.
    pub fn smooth(&self, prices: &[f64]) -> Result<HoltState> {
        require_points(prices, 2)?;
        let HoltParams { alpha, beta } = self.params;

        let mut level = prices[0];
        let mut trend = prices[1] - prices[0];
        let mut errors = Vec::with_capacity(prices.len() - 1);

        for &price in &prices[1..] {
            errors.push((price - (level + trend)).abs());

            let prev_level = level;
            level = alpha * price + (1.0 - alpha) * (level + trend);
            trend = beta * (level - prev_level) + (1.0 - beta) * trend;
        }

        Ok(HoltState {
            level,
            trend,
            mae: mean(&errors)?,
        })
    }
}

impl Default for ExponentialSmoothingForecaster {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}

impl Forecaster for ExponentialSmoothingForecaster {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ExponentialSmoothing
    }

    fn forecast(
        &self,
        prices: &[f64],
        last_date: NaiveDate,
        horizon: usize,
    ) -> Result<ModelForecast> {
        let state = self.smooth(prices)?;
        let last_price = prices[prices.len() - 1];

        let points = future_dates(last_date, horizon)?
            .into_iter()
            .enumerate()
            .map(|(idx, date)| {
                let step = (idx + 1) as f64;
                ForecastPoint::centered(
                    date,
                    state.level + step * state.trend,
                    state.mae * self.z_score * step.sqrt(),
                )
            })
            .collect();

        tracing::debug!(
            level = state.level,
            trend = state.trend,
            mae = state.mae,
            "holt smoothing fitted"
        );

        Ok(ModelForecast {
            points,
            confidence: CONFIDENCE,
            accuracy: unit_interval(1.0 - state.mae / last_price),
            mae: state.mae,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_series_is_tracked_exactly() {
        let prices: Vec<f64> = (0..20).map(|t| 50.0 + 2.0 * t as f64).collect();
        let state = ExponentialSmoothingForecaster::default()
            .smooth(&prices)
            .unwrap();

        assert_relative_eq!(state.level, 88.0, epsilon = 1e-9);
        assert_relative_eq!(state.trend, 2.0, epsilon = 1e-9);
        assert!(state.mae < 1e-9);
    }

    #[test]
    fn test_single_update_by_hand() {
        // level0 = 10, trend0 = 2; t=1 error 0; t=2 forecast 14 vs 13
        let prices = [10.0, 12.0, 13.0];
        let state = ExponentialSmoothingForecaster::default()
            .smooth(&prices)
            .unwrap();

        // After t=1: level 12, trend 2
        // After t=2: level = 0.3*13 + 0.7*14 = 13.7, trend = 0.1*1.7 + 0.9*2 = 1.97
        assert_relative_eq!(state.level, 13.7, epsilon = 1e-12);
        assert_relative_eq!(state.trend, 1.97, epsilon = 1e-12);
        assert_relative_eq!(state.mae, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_forecast_band_scales_with_sqrt_step() {
        let prices = [10.0, 12.0, 13.0, 12.5, 14.0, 15.0, 14.5, 16.0, 15.5, 17.0];
        let last = NaiveDate::from_ymd_opt(2023, 12, 30).unwrap();
        let result = ExponentialSmoothingForecaster::default()
            .forecast(&prices, last, 4)
            .unwrap();

        let w1 = result.points[0].upper - result.points[0].rate;
        let w4 = result.points[3].upper - result.points[3].rate;
        assert_relative_eq!(w4 / w1, 2.0, epsilon = 1e-9);
        assert_eq!(result.confidence, 0.72);
        assert_relative_eq!(result.accuracy, 1.0 - result.mae / 17.0, epsilon = 1e-12);
        assert_eq!(
            result.points[0].date,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }
}
