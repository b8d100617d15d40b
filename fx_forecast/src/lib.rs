//! # FX Forecast
//!
//! Technical indicators and short-horizon price projections for daily
//! exchange-rate series.
//!
//! ## Features
//!
//! - Indicator overlays (SMA, Bollinger Bands, RSI) on OHLCV bars
//! - Four classical estimators: trend extrapolation, linear regression,
//!   Holt's exponential smoothing and an autoregressive model on differences
//! - A confidence-weighted ensemble of trend, regression and smoothing
//! - Dated forecast points with symmetric confidence bands and accuracy metadata
//!
//! Every call is a pure function of its inputs: the engine keeps no state
//! between requests and performs no I/O outside the CSV loader.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fx_forecast::data::load_bars_csv;
//! use fx_forecast::{Algorithm, ForecastConfig, ForecastService, IndicatorEngine};
//!
//! let bars = load_bars_csv("eurusd.csv")?;
//!
//! // Overlays for display
//! let annotated = IndicatorEngine::default().annotate(&bars)?;
//! println!("{} bars annotated", annotated.len());
//!
//! // 30-day projection
//! let service = ForecastService::new(ForecastConfig::default())?;
//! let result = service.forecast_bars(&bars, 30, Algorithm::Ensemble)?;
//! println!("{}", result.to_json()?);
//! # Ok::<(), fx_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod models;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{
    EngineConfig, FallbackPolicy, ForecastConfig, HoltParams, IndicatorConfig, NoiseConfig,
    TrendParams,
};
pub use crate::data::{ForecastPoint, IndicatorBar, PriceBar};
pub use crate::error::ForecastError;
pub use crate::indicators::{IndicatorEngine, MarketSummary};
pub use crate::models::{Algorithm, Forecaster, ModelForecast};
pub use crate::service::{ForecastMetadata, ForecastResult, ForecastService};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
