//! Per-bar indicators derived from a price series.
//!
//! - `IndicatorType`: indicator identity + parameters, used for display
//! - `IndicatorRow`: the derived fields for one bar, aligned by date
//! - `compute_indicators`: builds one row per bar from a `PriceSeries`
//!
//! Undefined values (warm-up bars, the first return) are `None` and never
//! coerced to zero at this layer.

pub mod returns;
pub mod sma;
pub mod volatility;

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::fmt;

use crate::domain::error::MacrossError;
use crate::domain::price::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    DailyReturn,
    Sma(usize),
    Volatility(usize),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::DailyReturn => write!(f, "RETURN"),
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Volatility(period) => write!(f, "VOLATILITY({})", period),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub daily_return: Option<f64>,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub volatility: Option<f64>,
}

/// Computes returns, both moving averages and rolling volatility.
///
/// Fails only when the series has no bars; short series yield rows whose
/// windowed fields stay `None`.
pub fn compute_indicators(
    series: &PriceSeries,
    short_window: usize,
    long_window: usize,
    volatility_window: usize,
) -> Result<Vec<IndicatorRow>, MacrossError> {
    if series.is_empty() {
        return Err(MacrossError::InsufficientData {
            bars: 0,
            minimum: 1,
        });
    }

    let closes = series.closes();
    let daily_returns = returns::calculate_daily_returns(&closes);
    let sma_short = sma::calculate_sma(&closes, short_window);
    let sma_long = sma::calculate_sma(&closes, long_window);
    let vol = volatility::calculate_volatility(&daily_returns, volatility_window);

    debug!(
        "computed {}, {}, {}, {} over {} bars",
        IndicatorType::DailyReturn,
        IndicatorType::Sma(short_window),
        IndicatorType::Sma(long_window),
        IndicatorType::Volatility(volatility_window),
        closes.len()
    );

    Ok(series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            date: bar.date,
            close: bar.close,
            daily_return: daily_returns[i],
            sma_short: sma_short[i],
            sma_long: sma_long[i],
            volatility: vol[i],
        })
        .collect())
}
