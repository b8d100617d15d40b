//! Configuration value objects for the indicator engine and the forecasters
//!
//! Every window, weight and smoothing constant lives here instead of in
//! module-level globals, so engines with different settings can coexist.
//! All structs deserialize with per-field defaults, which lets a JSON file
//! override only the values it names.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Trading days used to annualize daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Window sizes and annualization scale for the indicator overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_short: usize,
    pub sma_long: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub rsi_period: usize,
    /// Annualization factor for the summary volatility
    pub trading_days_per_year: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_short: 5,
            sma_long: 20,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            rsi_period: 14,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl IndicatorConfig {
    /// Create a validated indicator configuration
    pub fn new(
        sma_short: usize,
        sma_long: usize,
        bollinger_period: usize,
        bollinger_multiplier: f64,
        rsi_period: usize,
    ) -> Result<Self> {
        let config = Self {
            sma_short,
            sma_long,
            bollinger_period,
            bollinger_multiplier,
            rsi_period,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("sma_short", self.sma_short),
            ("sma_long", self.sma_long),
            ("bollinger_period", self.bollinger_period),
            ("rsi_period", self.rsi_period),
        ] {
            if value == 0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }

        if !self.bollinger_multiplier.is_finite() || self.bollinger_multiplier <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "bollinger_multiplier must be a positive number".to_string(),
            ));
        }
        if self.trading_days_per_year.is_nan() || self.trading_days_per_year <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "trading_days_per_year must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parameters of the trend-extrapolation estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendParams {
    /// Closes used for the short-term average change
    pub short_window: usize,
    /// Closes used for the medium-term average change
    pub medium_window: usize,
    /// Weight of the short-term change; the medium term gets the rest
    pub short_weight: f64,
    /// e-folding time of the trend decay, in days
    pub decay_days: f64,
    /// Reported MAE as a fraction of the last price
    pub mae_fraction: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            short_window: 5,
            medium_window: 20,
            short_weight: 0.7,
            decay_days: 30.0,
            mae_fraction: 0.02,
        }
    }
}

/// Smoothing constants of Holt's linear trend method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoltParams {
    /// Level smoothing
    pub alpha: f64,
    /// Trend smoothing
    pub beta: f64,
}

impl Default for HoltParams {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
        }
    }
}

/// What to do with an algorithm name outside the supported set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Run the ensemble instead
    #[default]
    DefaultToEnsemble,
    /// Fail with `ForecastError::UnknownAlgorithm`
    Reject,
}

/// Seeded Gaussian jitter added to each step of the trend projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub seed: u64,
    /// Standard deviation of each step's jitter as a fraction of the last price
    pub amplitude: f64,
}

impl NoiseConfig {
    pub fn new(seed: u64, amplitude: f64) -> Result<Self> {
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(ForecastError::InvalidParameter(
                "Noise amplitude must be a non-negative number".to_string(),
            ));
        }
        Ok(Self { seed, amplitude })
    }
}

/// Settings shared by the forecast service and every estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Shortest closing-price series accepted by the service
    pub min_training_points: usize,
    /// Multiplier applied to every interval half-width
    pub z_score: f64,
    pub trading_days_per_year: f64,
    pub trend: TrendParams,
    pub smoothing: HoltParams,
    /// Lags of the autoregressive model on first differences
    pub ar_order: usize,
    pub fallback: FallbackPolicy,
    pub noise: Option<NoiseConfig>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_training_points: 10,
            z_score: 1.96,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            trend: TrendParams::default(),
            smoothing: HoltParams::default(),
            ar_order: 3,
            fallback: FallbackPolicy::default(),
            noise: None,
        }
    }
}

impl ForecastConfig {
    /// Set the fallback policy for unknown algorithm names
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Enable seeded jitter in the trend estimator
    pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Derive the z-score from a two-sided normal confidence level
    ///
    /// A level of 0.95 gives a z-score of about 1.96.
    pub fn with_interval_level(mut self, level: f64) -> Result<Self> {
        if level.is_nan() || level <= 0.0 || level >= 1.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Interval level must be between 0 and 1, got {}",
                level
            )));
        }

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
        self.z_score = normal.inverse_cdf(0.5 + level / 2.0);
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_training_points < 2 {
            return Err(ForecastError::InvalidParameter(
                "min_training_points must be at least 2".to_string(),
            ));
        }
        if !self.z_score.is_finite() || self.z_score < 0.0 {
            return Err(ForecastError::InvalidParameter(
                "z_score must be a non-negative number".to_string(),
            ));
        }
        if self.trading_days_per_year.is_nan() || self.trading_days_per_year <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "trading_days_per_year must be positive".to_string(),
            ));
        }
        if self.trend.short_window < 2 || self.trend.medium_window < 2 {
            return Err(ForecastError::InvalidParameter(
                "Trend windows need at least 2 closes".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.trend.short_weight) {
            return Err(ForecastError::InvalidParameter(
                "Trend short_weight must be between 0 and 1".to_string(),
            ));
        }
        if self.trend.decay_days.is_nan()
            || self.trend.decay_days <= 0.0
            || self.trend.mae_fraction < 0.0
        {
            return Err(ForecastError::InvalidParameter(
                "Trend decay_days must be positive and mae_fraction non-negative".to_string(),
            ));
        }
        for (name, value) in [("alpha", self.smoothing.alpha), ("beta", self.smoothing.beta)] {
            if value.is_nan() || value <= 0.0 || value > 1.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "Smoothing {} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.ar_order == 0 {
            return Err(ForecastError::InvalidParameter(
                "ar_order must be greater than zero".to_string(),
            ));
        }
        if let Some(noise) = &self.noise {
            NoiseConfig::new(noise.seed, noise.amplitude)?;
        }

        Ok(())
    }
}

/// Combined settings, as read from a JSON configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorConfig,
    pub forecast: ForecastConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate both sections and check they annualize on the same scale
    pub fn validate(&self) -> Result<()> {
        self.indicators.validate()?;
        self.forecast.validate()?;

        if self.indicators.trading_days_per_year != self.forecast.trading_days_per_year {
            return Err(ForecastError::InvalidParameter(format!(
                "trading_days_per_year differs between indicators ({}) and forecast ({})",
                self.indicators.trading_days_per_year, self.forecast.trading_days_per_year
            )));
        }
        Ok(())
    }

    /// Read a JSON configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(IndicatorConfig::default().validate().is_ok());
        assert!(ForecastConfig::default().validate().is_ok());
    }

    #[test]
    fn test_interval_level_to_z_score() {
        let config = ForecastConfig::default().with_interval_level(0.95).unwrap();
        assert_abs_diff_eq!(config.z_score, 1.96, epsilon = 1e-3);

        assert!(ForecastConfig::default().with_interval_level(1.0).is_err());
    }

    #[test]
    fn test_invalid_indicator_config() {
        assert!(IndicatorConfig::new(0, 20, 20, 2.0, 14).is_err());
        assert!(IndicatorConfig::new(5, 20, 20, -1.0, 14).is_err());
        assert!(IndicatorConfig::new(3, 10, 10, 1.5, 7).is_ok());
    }

    #[test]
    fn test_invalid_forecast_config() {
        let mut config = ForecastConfig::default();
        config.smoothing.alpha = 0.0;
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.ar_order = 0;
        assert!(config.validate().is_err());

        assert!(NoiseConfig::new(7, -0.1).is_err());
    }

    #[test]
    fn test_nan_parameters_rejected() {
        let mut config = ForecastConfig::default();
        config.trading_days_per_year = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.trend.decay_days = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.smoothing.beta = f64::NAN;
        assert!(config.validate().is_err());

        assert!(ForecastConfig::default().with_interval_level(f64::NAN).is_err());
        assert!(IndicatorConfig::new(5, 20, 20, f64::NAN, 14).is_err());
    }

    #[test]
    fn test_trading_days_must_agree() {
        let config = EngineConfig::from_json(
            r#"{ "indicators": { "trading_days_per_year": 365.0 },
                 "forecast": { "trading_days_per_year": 365.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.indicators.trading_days_per_year, 365.0);

        let mismatched = EngineConfig::from_json(
            r#"{ "forecast": { "trading_days_per_year": 365.0 } }"#,
        );
        assert!(matches!(mismatched, Err(ForecastError::InvalidParameter(_))));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(
            r#"{ "indicators": { "rsi_period": 7 },
                 "forecast": { "fallback": "reject", "smoothing": { "alpha": 0.5 } } }"#,
        )
        .unwrap();

        assert_eq!(config.indicators.rsi_period, 7);
        assert_eq!(config.indicators.sma_long, 20);
        assert_eq!(config.forecast.fallback, FallbackPolicy::Reject);
        assert_eq!(config.forecast.smoothing.alpha, 0.5);
        assert_eq!(config.forecast.smoothing.beta, 0.1);
        assert_eq!(config.forecast.min_training_points, 10);
    }
}
