//! Forecasting models for closing-price series
//!
//! Each estimator implements [`Forecaster`] and turns a closing-price series
//! plus the date of its last observation into a dated projection with a
//! symmetric confidence band.

use crate::data::ForecastPoint;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

pub mod arima;
pub mod ensemble;
pub mod exponential_smoothing;
pub mod linear_regression;
pub mod trend;

pub use arima::ArimaLiteForecaster;
pub use ensemble::EnsembleForecaster;
pub use exponential_smoothing::ExponentialSmoothingForecaster;
pub use linear_regression::LinearRegressionForecaster;
pub use trend::TrendForecaster;

/// The closed set of supported estimators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Trend,
    LinearRegression,
    ExponentialSmoothing,
    ArimaLite,
    #[default]
    Ensemble,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Trend,
        Algorithm::LinearRegression,
        Algorithm::ExponentialSmoothing,
        Algorithm::ArimaLite,
        Algorithm::Ensemble,
    ];

    /// Identifier used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Trend => "trend",
            Algorithm::LinearRegression => "linear_regression",
            Algorithm::ExponentialSmoothing => "exponential_smoothing",
            Algorithm::ArimaLite => "arima_lite",
            Algorithm::Ensemble => "ensemble",
        }
    }

    /// Look up an algorithm by its identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| ForecastError::UnknownAlgorithm(s.to_string()))
    }
}

/// Output of a single estimator before the service attaches metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ModelForecast {
    pub points: Vec<ForecastPoint>,
    pub confidence: f64,
    pub accuracy: f64,
    pub mae: f64,
}

/// Common interface for the estimators
pub trait Forecaster: Debug + Send + Sync {
    /// Which algorithm this estimator implements
    fn algorithm(&self) -> Algorithm;

    /// Project `horizon` days past `last_date`
    fn forecast(&self, prices: &[f64], last_date: NaiveDate, horizon: usize)
        -> Result<ModelForecast>;
}

/// Fail unless `prices` holds at least `required` observations
pub(crate) fn require_points(prices: &[f64], required: usize) -> Result<()> {
    if prices.len() < required {
        return Err(ForecastError::InsufficientData {
            required,
            actual: prices.len(),
        });
    }
    Ok(())
}
