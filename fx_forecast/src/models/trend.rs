//! Trend extrapolation with exponentially decaying momentum

use crate::config::{ForecastConfig, NoiseConfig, TrendParams};
use crate::data::ForecastPoint;
use crate::error::{ForecastError, Result};
use crate::models::{require_points, Algorithm, Forecaster, ModelForecast};
use crate::utils::{future_dates, unit_interval};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use trade_math::statistics::annualized_volatility;

const CONFIDENCE: f64 = 0.65;

/// Blends short and medium average daily change and lets it fade out
///
/// The band grows with annualized log-return volatility scaled to the
/// horizon. With [`NoiseConfig`] set, each step also receives Gaussian
/// jitter drawn from a generator reseeded on every call.
#[derive(Debug, Clone)]
pub struct TrendForecaster {
    params: TrendParams,
    z_score: f64,
    trading_days_per_year: f64,
    noise: Option<NoiseConfig>,
}

impl TrendForecaster {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            params: config.trend.clone(),
            z_score: config.z_score,
            trading_days_per_year: config.trading_days_per_year,
            noise: config.noise,
        }
    }

    /// Blended average daily change used as the initial step
    pub fn blended_trend(&self, prices: &[f64]) -> f64 {
        let short = average_change(prices, self.params.short_window);
        let medium = average_change(prices, self.params.medium_window);

        self.params.short_weight * short + (1.0 - self.params.short_weight) * medium
    }
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}

/// Mean daily change across the trailing `window` closes (or all, if fewer)
fn average_change(prices: &[f64], window: usize) -> f64 {
    let window = window.min(prices.len());
    if window < 2 {
        return 0.0;
    }

    let tail = &prices[prices.len() - window..];
    (tail[window - 1] - tail[0]) / (window - 1) as f64
}

impl Forecaster for TrendForecaster {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Trend
    }

    fn forecast(
        &self,
        prices: &[f64],
        last_date: NaiveDate,
        horizon: usize,
    ) -> Result<ModelForecast> {
        require_points(prices, 2)?;
        let last_price = prices[prices.len() - 1];

        let avg_trend = self.blended_trend(prices);
        let volatility = annualized_volatility(prices, self.trading_days_per_year)?;

        let mut jitter = match self.noise {
            Some(noise) => {
                let normal = Normal::new(0.0, noise.amplitude * last_price.abs())
                    .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
                Some((StdRng::seed_from_u64(noise.seed), normal))
            }
            None => None,
        };

        let mut value = last_price;
        let points = future_dates(last_date, horizon)?
            .into_iter()
            .enumerate()
            .map(|(idx, date)| {
                let step = (idx + 1) as f64;
                let decay = (-step / self.params.decay_days).exp();
                value += avg_trend * decay;
                if let Some((rng, normal)) = jitter.as_mut() {
                    value += normal.sample(rng);
                }

                let width =
                    volatility * last_price * (step / self.trading_days_per_year).sqrt();
                ForecastPoint::centered(date, value, self.z_score * width)
            })
            .collect();

        let mae = self.params.mae_fraction * last_price.abs();
        tracing::debug!(avg_trend, volatility, "trend forecast fitted");

        Ok(ModelForecast {
            points,
            confidence: CONFIDENCE,
            accuracy: unit_interval(1.0 - mae / last_price),
            mae,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn test_average_change_uses_available_tail() {
        let prices = [1.0, 2.0, 4.0];
        assert_relative_eq!(average_change(&prices, 2), 2.0);
        // Window longer than the series falls back to the whole series
        assert_relative_eq!(average_change(&prices, 20), 1.5);
        assert_eq!(average_change(&[3.0], 5), 0.0);
    }

    #[test]
    fn test_blended_trend_on_linear_series() {
        let prices: Vec<f64> = (0..30).map(|t| 100.0 + 0.5 * t as f64).collect();
        let forecaster = TrendForecaster::default();

        assert_relative_eq!(forecaster.blended_trend(&prices), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_first_step_applies_decayed_trend() {
        let prices: Vec<f64> = (0..30).map(|t| 100.0 + 0.5 * t as f64).collect();
        let result = TrendForecaster::default()
            .forecast(&prices, start(), 5)
            .unwrap();

        let expected = 114.5 + 0.5 * (-1.0f64 / 30.0).exp();
        assert_relative_eq!(result.points[0].rate, expected, epsilon = 1e-9);
        assert_eq!(result.points.len(), 5);
        assert_eq!(result.confidence, 0.65);
        assert_relative_eq!(result.mae, 0.02 * 114.5);
        assert_relative_eq!(result.accuracy, 0.98, epsilon = 1e-12);
    }

    #[test]
    fn test_band_widens_with_horizon() {
        let prices = [1.10, 1.12, 1.09, 1.11, 1.13, 1.12, 1.14, 1.10, 1.11, 1.15];
        let result = TrendForecaster::default()
            .forecast(&prices, start(), 10)
            .unwrap();

        let widths: Vec<f64> = result.points.iter().map(|p| p.upper - p.lower).collect();
        assert!(widths.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let prices = [1.10, 1.12, 1.09, 1.11, 1.13, 1.12, 1.14, 1.10, 1.11, 1.15];
        let config =
            ForecastConfig::default().with_noise(NoiseConfig::new(42, 0.001).unwrap());
        let noisy = TrendForecaster::new(&config);

        let first = noisy.forecast(&prices, start(), 7).unwrap();
        let second = noisy.forecast(&prices, start(), 7).unwrap();
        assert_eq!(first, second);

        let quiet = TrendForecaster::default()
            .forecast(&prices, start(), 7)
            .unwrap();
        assert_ne!(first.points, quiet.points);
    }

    #[test]
    fn test_rejects_non_positive_prices() {
        let prices = [1.0, 0.0, 1.0];
        assert!(TrendForecaster::default()
            .forecast(&prices, start(), 3)
            .is_err());
    }
}
