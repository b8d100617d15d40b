//! Utility functions for the fx_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};

/// Consecutive calendar days following `last_date`
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon)
        .map(|step| {
            last_date
                .checked_add_signed(Duration::days(step as i64))
                .ok_or_else(|| {
                    ForecastError::InvalidParameter(format!(
                        "Forecast date {} days after {} is out of range",
                        step, last_date
                    ))
                })
        })
        .collect()
}

/// First differences `x[t] - x[t-1]`
pub fn differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Clamp a score into `[0, 1]`, mapping `NaN` to zero
pub fn unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
