//! Autoregressive model on first differences ("ARIMA-lite")

use crate::config::ForecastConfig;
use crate::data::ForecastPoint;
use crate::error::Result;
use crate::models::{require_points, Algorithm, Forecaster, ModelForecast};
use crate::utils::{differences, future_dates, unit_interval};
use chrono::NaiveDate;
use std::collections::VecDeque;
use trade_math::statistics::{accuracy, fit_autoregressive, std_dev};

const CONFIDENCE: f64 = 0.75;

/// AR(p) on daily price changes, integrated back onto the last price
///
/// Coefficients come from [`fit_autoregressive`], which estimates each lag
/// independently rather than jointly.
#[derive(Debug, Clone)]
pub struct ArimaLiteForecaster {
    order: usize,
    z_score: f64,
}

/// Coefficients and in-sample fit quality
#[derive(Debug, Clone, PartialEq)]
pub struct ArFit {
    /// `coefficients[j]` multiplies the difference `j + 1` steps back
    pub coefficients: Vec<f64>,
    /// Standard deviation of the one-step-ahead residuals on differences
    pub residual_std: f64,
    /// Accuracy of the one-step-ahead price reconstruction
    pub accuracy: f64,
}

impl ArimaLiteForecaster {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            order: config.ar_order,
            z_score: config.z_score,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Fit the model and score its one-step-ahead predictions
    pub fn fit(&self, prices: &[f64]) -> Result<ArFit> {
        require_points(prices, self.order + 2)?;
        let p = self.order;
        let diffs = differences(prices);
        let coefficients = fit_autoregressive(&diffs, p)?;

        let mut residuals = Vec::with_capacity(diffs.len() - p);
        let mut fitted_prices = Vec::with_capacity(diffs.len() - p);

        for t in p..diffs.len() {
            let predicted: f64 = coefficients
                .iter()
                .enumerate()
                .map(|(j, c)| c * diffs[t - 1 - j])
                .sum();
            residuals.push(diffs[t] - predicted);
            // diffs[t] moves prices[t] to prices[t + 1]
            fitted_prices.push(prices[t] + predicted);
        }

        Ok(ArFit {
            residual_std: std_dev(&residuals)?,
            accuracy: accuracy(&prices[p + 1..], &fitted_prices)?,
            coefficients,
        })
    }
}

impl Default for ArimaLiteForecaster {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}

impl Forecaster for ArimaLiteForecaster {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ArimaLite
    }

    fn forecast(
        &self,
        prices: &[f64],
        last_date: NaiveDate,
        horizon: usize,
    ) -> Result<ModelForecast> {
        let fit = self.fit(prices)?;
        let p = self.order;
        let diffs = differences(prices);

        // Most recent p differences, oldest first
        let mut window: VecDeque<f64> = diffs[diffs.len() - p..].iter().copied().collect();
        let mut value = prices[prices.len() - 1];

        let points = future_dates(last_date, horizon)?
            .into_iter()
            .enumerate()
            .map(|(idx, date)| {
                let step = (idx + 1) as f64;
                let delta: f64 = fit
                    .coefficients
                    .iter()
                    .enumerate()
                    .map(|(j, c)| c * window[p - 1 - j])
                    .sum();

                value += delta;
                window.pop_front();
                window.push_back(delta);

                ForecastPoint::centered(date, value, self.z_score * fit.residual_std * step.sqrt())
            })
            .collect();

        tracing::debug!(
            coefficients = ?fit.coefficients,
            residual_std = fit.residual_std,
            "autoregressive model fitted"
        );

        Ok(ModelForecast {
            points,
            confidence: CONFIDENCE,
            accuracy: unit_interval(fit.accuracy),
            mae: fit.residual_std,
        })
    }
}
