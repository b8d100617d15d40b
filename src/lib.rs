//! # FX Forecast Workspace
//!
//! Umbrella crate re-exporting the numeric kernel and the forecasting engine.
//!
//! ## Example
//!
//! ```
//! use fx_forecast_workspace::fx_forecast::{Algorithm, ForecastConfig, ForecastService};
//! use chrono::NaiveDate;
//!
//! let prices: Vec<f64> = (0..20).map(|t| 1.08 + 0.001 * t as f64).collect();
//! let last = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
//!
//! let service = ForecastService::new(ForecastConfig::default()).unwrap();
//! let result = service.forecast(&prices, last, 5, Algorithm::LinearRegression).unwrap();
//! assert_eq!(result.points.len(), 5);
//! ```

pub use fx_forecast;
pub use trade_math;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_resolve() {
        let sma = trade_math::statistics::mean(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(sma, 2.0);
        assert_eq!(fx_forecast::NAME, "fx_forecast");
    }
}
