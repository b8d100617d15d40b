//! Descriptive statistics, least-squares fitting and error scoring
//!
//! All functions operate on plain slices and use population (not sample)
//! moments. Guard conditions are reported through [`MathError`] rather than
//! producing `NaN`.

use crate::{MathError, Result};

/// Arithmetic mean of a non-empty slice
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::EmptyInput(
            "Cannot calculate mean of an empty series".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance of a non-empty slice
pub fn variance(values: &[f64]) -> Result<f64> {
    let mean = mean(values)?;

    Ok(values
        .iter()
        .map(|&v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64)
}

/// Population standard deviation of a non-empty slice
pub fn std_dev(values: &[f64]) -> Result<f64> {
    Ok(variance(values)?.sqrt())
}

/// Population covariance of two equally sized, non-empty slices
pub fn covariance(x: &[f64], y: &[f64]) -> Result<f64> {
    ensure_same_length(x, y)?;
    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    Ok(x.iter()
        .zip(y.iter())
        .map(|(&a, &b)| (a - x_mean) * (b - y_mean))
        .sum::<f64>()
        / x.len() as f64)
}

/// Slope and intercept of a fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Closed-form ordinary least squares fit of `y` on `x`
///
/// Fails with [`MathError::DegenerateInput`] when `x` has no variance, since
/// the slope is undefined.
pub fn ordinary_least_squares(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    ensure_same_length(x, y)?;
    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        numerator += (xi - x_mean) * (yi - y_mean);
        denominator += (xi - x_mean) * (xi - x_mean);
    }

    if denominator.abs() < 1e-10 {
        return Err(MathError::DegenerateInput(
            "Cannot calculate slope: x values have zero variance".to_string(),
        ));
    }

    let slope = numerator / denominator;

    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

/// Estimate autoregressive coefficients for lags `1..=order`
///
/// Each lag is estimated on its own as `cov(lag, target) / var(lag)` over the
/// rows `order..len`, with a variance of zero replaced by one. Lags are not
/// fitted jointly, so this is an approximation of a least-squares AR fit.
/// `coefficients[j]` belongs to lag `j + 1`.
pub fn fit_autoregressive(series: &[f64], order: usize) -> Result<Vec<f64>> {
    if order == 0 {
        return Err(MathError::InvalidInput(
            "Autoregressive order must be greater than zero".to_string(),
        ));
    }
    if series.len() <= order {
        return Err(MathError::InsufficientData(format!(
            "Need more than {} values for an AR({}) fit, have {}",
            order,
            order,
            series.len()
        )));
    }

    let target = &series[order..];

    (1..=order)
        .map(|lag| {
            let lagged = &series[order - lag..series.len() - lag];
            let cov = covariance(lagged, target)?;
            let var = match variance(lagged)? {
                v if v == 0.0 => 1.0,
                v => v,
            };
            Ok(cov / var)
        })
        .collect()
}

/// Mean absolute error between actual and predicted values
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    ensure_same_length(actual, predicted)?;
    let errors: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .collect();

    mean(&errors)
}

/// Root mean squared error between actual and predicted values
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    ensure_same_length(actual, predicted)?;
    let squared: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .collect();

    Ok(mean(&squared)?.sqrt())
}

/// Accuracy score `max(0, 1 - mae / mean(actual))`, capped at 1
pub fn accuracy(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    let mae = mean_absolute_error(actual, predicted)?;
    let level = mean(actual)?;

    if level == 0.0 {
        return Ok(if mae == 0.0 { 1.0 } else { 0.0 });
    }

    Ok((1.0 - mae / level).clamp(0.0, 1.0))
}

/// Natural log returns `ln(p[i] / p[i-1])`
///
/// Prices must be strictly positive.
pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>> {
    if let Some(bad) = prices.iter().find(|p| !p.is_finite() || **p <= 0.0) {
        return Err(MathError::InvalidInput(format!(
            "Log returns need positive finite prices, found {}",
            bad
        )));
    }

    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Standard deviation of log returns scaled by `sqrt(periods_per_year)`
pub fn annualized_volatility(prices: &[f64], periods_per_year: f64) -> Result<f64> {
    let returns = log_returns(prices)?;
    Ok(std_dev(&returns)? * periods_per_year.sqrt())
}

fn ensure_same_length(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(MathError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

        assert_relative_eq!(mean(&values).unwrap(), 5.0);
        assert_relative_eq!(variance(&values).unwrap(), 4.0);
        assert_relative_eq!(std_dev(&values).unwrap(), 2.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(mean(&[]), Err(MathError::EmptyInput(_))));
        assert!(matches!(variance(&[]), Err(MathError::EmptyInput(_))));
        assert!(matches!(std_dev(&[]), Err(MathError::EmptyInput(_))));
    }

    #[test]
    fn test_ols_recovers_line() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();

        let fit = ordinary_least_squares(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 3.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, -2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.predict(10.0), 28.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ols_degenerate_x() {
        let x = [4.0; 5];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];

        assert!(matches!(
            ordinary_least_squares(&x, &y),
            Err(MathError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_fit_autoregressive_constant_lag() {
        // Zero variance in every lag column falls back to a divisor of one
        let series = [1.0; 8];
        let coefficients = fit_autoregressive(&series, 3).unwrap();

        assert_eq!(coefficients, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_fit_autoregressive_alternating() {
        let series: Vec<f64> = (0..20)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let coefficients = fit_autoregressive(&series, 2).unwrap();

        assert_relative_eq!(coefficients[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(coefficients[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_autoregressive_guards() {
        assert!(matches!(
            fit_autoregressive(&[1.0, 2.0], 0),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            fit_autoregressive(&[1.0, 2.0, 3.0], 3),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_error_scores() {
        let actual = [10.0, 20.0, 30.0, 40.0, 50.0];
        let predicted = [12.0, 18.0, 33.0, 37.0, 52.0];

        assert_relative_eq!(mean_absolute_error(&actual, &predicted).unwrap(), 2.4);
        assert_relative_eq!(
            root_mean_squared_error(&actual, &predicted).unwrap(),
            (30.0f64 / 5.0).sqrt()
        );
        assert_relative_eq!(accuracy(&actual, &predicted).unwrap(), 1.0 - 2.4 / 30.0);
    }

    #[test]
    fn test_length_mismatch() {
        let err = mean_absolute_error(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            MathError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(root_mean_squared_error(&[1.0], &[]).is_err());
        assert!(accuracy(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_accuracy_floor() {
        assert_eq!(accuracy(&[1.0, 1.0], &[10.0, 10.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_log_returns_reject_non_positive() {
        assert!(log_returns(&[1.0, 0.0, 2.0]).is_err());
        let returns = log_returns(&[1.0, std::f64::consts::E]).unwrap();
        assert_relative_eq!(returns[0], 1.0, epsilon = 1e-12);
    }
}
