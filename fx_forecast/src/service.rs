//! Algorithm dispatch and result packaging
//!
//! [`ForecastService`] validates the request, picks the estimator registered
//! for the requested [`Algorithm`] and wraps its output in a
//! [`ForecastResult`] carrying the training metadata.

use crate::config::{FallbackPolicy, ForecastConfig};
use crate::data::{close_prices, validate_bars, ForecastPoint, PriceBar};
use crate::error::{ForecastError, Result};
use crate::models::{
    Algorithm, ArimaLiteForecaster, EnsembleForecaster, ExponentialSmoothingForecaster,
    Forecaster, LinearRegressionForecaster, TrendForecaster,
};
use crate::utils::unit_interval;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Training metadata attached to every forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMetadata {
    pub training_points: usize,
    pub forecast_horizon: usize,
    pub accuracy: f64,
    pub mae: f64,
}

/// A finished forecast, serialized in the response shape
/// `{ forecast, confidence, algorithm, metadata }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    #[serde(rename = "forecast")]
    pub points: Vec<ForecastPoint>,
    pub confidence: f64,
    pub algorithm: Algorithm,
    pub metadata: ForecastMetadata,
}

impl ForecastResult {
    pub fn accuracy(&self) -> f64 {
        self.metadata.accuracy
    }

    pub fn mae(&self) -> f64 {
        self.metadata.mae
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Stateless forecasting front end
#[derive(Debug)]
pub struct ForecastService {
    config: ForecastConfig,
    registry: Vec<Box<dyn Forecaster>>,
}

impl ForecastService {
    /// Build a service with one estimator per algorithm
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;

        let registry: Vec<Box<dyn Forecaster>> = vec![
            Box::new(TrendForecaster::new(&config)),
            Box::new(LinearRegressionForecaster::new(&config)),
            Box::new(ExponentialSmoothingForecaster::new(&config)),
            Box::new(ArimaLiteForecaster::new(&config)),
            Box::new(EnsembleForecaster::new(&config)),
        ];

        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Map an algorithm name to a variant according to the fallback policy
    pub fn resolve(&self, name: &str) -> Result<Algorithm> {
        match (Algorithm::from_name(name), self.config.fallback) {
            (Some(algorithm), _) => Ok(algorithm),
            (None, FallbackPolicy::DefaultToEnsemble) => {
                tracing::warn!(requested = name, "unknown algorithm, falling back to ensemble");
                Ok(Algorithm::Ensemble)
            }
            (None, FallbackPolicy::Reject) => {
                Err(ForecastError::UnknownAlgorithm(name.to_string()))
            }
        }
    }

    /// Forecast `horizon` days past `last_date` with the given algorithm
    pub fn forecast(
        &self,
        prices: &[f64],
        last_date: NaiveDate,
        horizon: usize,
        algorithm: Algorithm,
    ) -> Result<ForecastResult> {
        self.validate_request(prices, horizon)?;

        let forecaster = self
            .registry
            .iter()
            .find(|f| f.algorithm() == algorithm)
            .ok_or_else(|| ForecastError::UnknownAlgorithm(algorithm.to_string()))?;

        tracing::debug!(
            %algorithm,
            training_points = prices.len(),
            horizon,
            "running forecast"
        );
        let output = forecaster.forecast(prices, last_date, horizon)?;

        Ok(ForecastResult {
            points: output.points,
            confidence: unit_interval(output.confidence),
            algorithm,
            metadata: ForecastMetadata {
                training_points: prices.len(),
                forecast_horizon: horizon,
                accuracy: unit_interval(output.accuracy),
                mae: output.mae.max(0.0),
            },
        })
    }

    /// Forecast with an algorithm given by name
    pub fn forecast_by_name(
        &self,
        prices: &[f64],
        last_date: NaiveDate,
        horizon: usize,
        name: &str,
    ) -> Result<ForecastResult> {
        let algorithm = self.resolve(name)?;
        self.forecast(prices, last_date, horizon, algorithm)
    }

    /// Forecast from an ordered bar series, using its closes and last date
    pub fn forecast_bars(
        &self,
        bars: &[PriceBar],
        horizon: usize,
        algorithm: Algorithm,
    ) -> Result<ForecastResult> {
        validate_bars(bars)?;
        let last_date = bars
            .last()
            .map(|b| b.date)
            .ok_or(ForecastError::InsufficientData {
                required: self.config.min_training_points,
                actual: 0,
            })?;

        self.forecast(&close_prices(bars), last_date, horizon, algorithm)
    }

    fn validate_request(&self, prices: &[f64], horizon: usize) -> Result<()> {
        if prices.len() < self.config.min_training_points {
            return Err(ForecastError::InsufficientData {
                required: self.config.min_training_points,
                actual: prices.len(),
            });
        }
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be at least one day".to_string(),
            ));
        }
        if let Some(bad) = prices.iter().find(|p| !p.is_finite() || **p <= 0.0) {
            return Err(ForecastError::InvalidData(format!(
                "Prices must be positive and finite, found {}",
                bad
            )));
        }
        Ok(())
    }
}
