//! Price bars, indicator-annotated bars and CSV loading

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

/// One daily OHLCV observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Calendar day of the bar
    pub date: NaiveDate,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Traded volume; FX feeds often leave it blank, which reads as 0
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub volume: f64,
}

impl PriceBar {
    /// Create a bar with all four prices set to `close`
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }
}

fn blank_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// A price bar with the indicator overlays that are defined at its index
///
/// A field is `None` until its lookback window is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorBar {
    #[serde(flatten)]
    pub bar: PriceBar,
    /// Short simple moving average (5 closes by default)
    #[serde(rename = "sma5", default, skip_serializing_if = "Option::is_none")]
    pub sma_short: Option<f64>,
    /// Long simple moving average (20 closes by default)
    #[serde(rename = "sma20", default, skip_serializing_if = "Option::is_none")]
    pub sma_long: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_upper: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_middle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
}

impl From<PriceBar> for IndicatorBar {
    fn from(bar: PriceBar) -> Self {
        Self {
            bar,
            sma_short: None,
            sma_long: None,
            bollinger_upper: None,
            bollinger_middle: None,
            bollinger_lower: None,
            rsi: None,
        }
    }
}

/// One projected day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub rate: f64,
    pub upper: f64,
    pub lower: f64,
}

impl ForecastPoint {
    /// Point centered on `rate` with a symmetric band of `half_width`
    pub fn centered(date: NaiveDate, rate: f64, half_width: f64) -> Self {
        let half_width = half_width.max(0.0);
        Self {
            date,
            rate,
            upper: rate + half_width,
            lower: rate - half_width,
        }
    }
}

/// Check that bar dates are strictly increasing and closes are finite
pub fn validate_bars(bars: &[PriceBar]) -> Result<()> {
    if let Some(pair) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
        return Err(ForecastError::InvalidData(format!(
            "Bar dates must be strictly increasing: {} follows {}",
            pair[1].date, pair[0].date
        )));
    }

    if let Some(bar) = bars.iter().find(|b| !b.close.is_finite()) {
        return Err(ForecastError::InvalidData(format!(
            "Non-finite close on {}",
            bar.date
        )));
    }

    Ok(())
}

/// Closing-price column of a bar series
pub fn close_prices(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Read bars from CSV with a `date,open,high,low,close,volume` header
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<PriceBar>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let bars = csv_reader
        .deserialize::<PriceBar>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    validate_bars(&bars)?;
    Ok(bars)
}

/// Load bars from a CSV file
pub fn load_bars_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PriceBar>> {
    let file = std::fs::File::open(path)?;
    read_bars(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_validate_rejects_unordered_dates() {
        let bars = vec![
            PriceBar::from_close(day(2), 1.1),
            PriceBar::from_close(day(2), 1.2),
        ];

        assert!(matches!(
            validate_bars(&bars),
            Err(ForecastError::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_bars_from_csv_text() {
        let text = "date,open,high,low,close,volume\n\
                    2024-03-01,1.08,1.09,1.07,1.085,1200\n\
                    2024-03-04,1.085,1.10,1.08,1.095,900\n";

        let bars = read_bars(text.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].date, day(4));
        assert_eq!(bars[1].volume, 900.0);
        assert_eq!(close_prices(&bars), vec![1.085, 1.095]);
    }

    #[test]
    fn test_indicator_bar_omits_undefined_fields() {
        let bar: IndicatorBar = PriceBar::from_close(day(1), 1.5).into();
        let json = serde_json::to_value(bar).unwrap();

        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["close"], 1.5);
        assert!(json.get("sma5").is_none());
        assert!(json.get("rsi").is_none());
    }

    #[test]
    fn test_centered_point_never_inverts() {
        let point = ForecastPoint::centered(day(1), 1.0, -0.5);
        assert_eq!(point.upper, 1.0);
        assert_eq!(point.lower, 1.0);
    }
}
