//! Indicator overlays for a bar series
//!
//! [`IndicatorEngine::annotate`] walks the bars once, feeding each close to
//! streaming SMA, Bollinger and RSI calculators from `trade_math`, and copies
//! whatever values are defined at that index onto an [`IndicatorBar`].

use crate::config::IndicatorConfig;
use crate::data::{validate_bars, IndicatorBar, PriceBar};
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trade_math::statistics::annualized_volatility;
use trade_math::{BollingerBands, RelativeStrengthIndex, SimpleMovingAverage};

/// Computes SMA, Bollinger Bands and RSI overlays
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

/// Latest close, day-over-day change, RSI and volatility of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub date: NaiveDate,
    pub last_close: f64,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub rsi: Option<f64>,
    /// Annualized standard deviation of daily log returns
    pub volatility: Option<f64>,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Annotate every bar with the overlays defined at its index
    pub fn annotate(&self, bars: &[PriceBar]) -> Result<Vec<IndicatorBar>> {
        validate_bars(bars)?;

        let mut sma_short = SimpleMovingAverage::new(self.config.sma_short)?;
        let mut sma_long = SimpleMovingAverage::new(self.config.sma_long)?;
        let mut bollinger =
            BollingerBands::new(self.config.bollinger_period, self.config.bollinger_multiplier)?;
        let mut rsi = RelativeStrengthIndex::new(self.config.rsi_period)?;

        let annotated = bars
            .iter()
            .map(|bar| {
                sma_short.update(bar.close);
                sma_long.update(bar.close);
                bollinger.update(bar.close);
                rsi.update(bar.close);

                let bands = bollinger.bands();
                IndicatorBar {
                    bar: *bar,
                    sma_short: sma_short.value(),
                    sma_long: sma_long.value(),
                    bollinger_upper: bands.map(|b| b.upper),
                    bollinger_middle: bands.map(|b| b.middle),
                    bollinger_lower: bands.map(|b| b.lower),
                    rsi: rsi.value(),
                }
            })
            .collect();

        tracing::debug!(bars = bars.len(), "indicator overlays computed");
        Ok(annotated)
    }

    /// Summarize the most recent bar of an annotated series
    ///
    /// Returns `None` for an empty series. Volatility is left out when the
    /// series has fewer than two closes or contains non-positive prices.
    pub fn summarize(&self, bars: &[IndicatorBar]) -> Option<MarketSummary> {
        let last = bars.last()?;
        let previous = bars.len().checked_sub(2).map(|i| bars[i].bar.close);

        let change = previous.map(|p| last.bar.close - p);
        let change_percent = previous
            .filter(|p| *p != 0.0)
            .map(|p| (last.bar.close - p) / p * 100.0);

        let closes: Vec<f64> = bars.iter().map(|b| b.bar.close).collect();
        let volatility = if closes.len() >= 2 {
            annualized_volatility(&closes, self.config.trading_days_per_year).ok()
        } else {
            None
        };

        Some(MarketSummary {
            date: last.bar.date,
            last_close: last.bar.close,
            change,
            change_percent,
            rsi: last.rsi,
            volatility,
        })
    }
}
