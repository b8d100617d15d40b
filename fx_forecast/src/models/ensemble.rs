//! Confidence-weighted blend of trend, regression and smoothing forecasts

use crate::config::ForecastConfig;
use crate::data::ForecastPoint;
use crate::error::Result;
use crate::models::{
    Algorithm, ExponentialSmoothingForecaster, Forecaster, LinearRegressionForecaster,
    ModelForecast, TrendForecaster,
};
use chrono::NaiveDate;

const CONFIDENCE: f64 = 0.80;
/// Fraction of the trend model's band kept around the blended rate
const BAND_SHRINK: f64 = 0.8;

/// Runs three estimators and averages their rates, weighted by confidence
///
/// The band is taken from the trend model only, shrunk by [`BAND_SHRINK`]
/// and re-centred on the blended rate. The regression and smoothing bands
/// are computed but not used.
#[derive(Debug, Clone)]
pub struct EnsembleForecaster {
    trend: TrendForecaster,
    regression: LinearRegressionForecaster,
    smoothing: ExponentialSmoothingForecaster,
}

impl EnsembleForecaster {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            trend: TrendForecaster::new(config),
            regression: LinearRegressionForecaster::new(config),
            smoothing: ExponentialSmoothingForecaster::new(config),
        }
    }
}

impl Default for EnsembleForecaster {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}

impl Forecaster for EnsembleForecaster {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ensemble
    }

    fn forecast(
        &self,
        prices: &[f64],
        last_date: NaiveDate,
        horizon: usize,
    ) -> Result<ModelForecast> {
        let trend = self.trend.forecast(prices, last_date, horizon)?;
        let regression = self.regression.forecast(prices, last_date, horizon)?;
        let smoothing = self.smoothing.forecast(prices, last_date, horizon)?;
        let members = [&trend, &regression, &smoothing];

        let total_confidence: f64 = members.iter().map(|m| m.confidence).sum();

        let points = trend
            .points
            .iter()
            .enumerate()
            .map(|(i, anchor)| {
                let rate = members
                    .iter()
                    .map(|m| m.points[i].rate * m.confidence)
                    .sum::<f64>()
                    / total_confidence;
                let range = (anchor.upper - anchor.lower) * BAND_SHRINK;
                ForecastPoint::centered(anchor.date, rate, range / 2.0)
            })
            .collect();

        let count = members.len() as f64;
        Ok(ModelForecast {
            points,
            confidence: CONFIDENCE,
            accuracy: members.iter().map(|m| m.accuracy).sum::<f64>() / count,
            mae: members.iter().map(|m| m.mae).sum::<f64>() / count,
        })
    }
}
