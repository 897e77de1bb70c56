//! Backtest pipeline: indicators -> signals -> returns -> equity -> metrics.
//!
//! Each stage consumes the previous stage's complete output and produces a
//! new value; nothing is mutated after handoff. Fatal conditions are checked
//! before the first stage runs, so a result is either complete or absent.

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Serialize;

use crate::domain::equity::EquityCurves;
use crate::domain::error::MacrossError;
use crate::domain::indicator::{compute_indicators, IndicatorRow};
use crate::domain::metrics::{BacktestMetrics, MetricsReport, TRADING_DAYS_PER_YEAR};
use crate::domain::price::PriceSeries;
use crate::domain::returns::{compute_returns, ReturnRow};
use crate::domain::signal::{compute_signals, SignalRow};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestConfig {
    pub short_window: usize,
    pub long_window: usize,
    pub volatility_window: usize,
    pub transaction_cost: f64,
    pub annualization_factor: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
            volatility_window: 20,
            transaction_cost: 0.001,
            annualization_factor: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl BacktestConfig {
    pub fn validate(&self) -> Result<(), MacrossError> {
        if self.short_window == 0 {
            return Err(MacrossError::invalid(
                "strategy",
                "short_window",
                "short_window must be a positive integer",
            ));
        }
        if self.long_window <= self.short_window {
            return Err(MacrossError::invalid(
                "strategy",
                "long_window",
                "long_window must be greater than short_window",
            ));
        }
        if self.volatility_window == 0 {
            return Err(MacrossError::invalid(
                "strategy",
                "volatility_window",
                "volatility_window must be a positive integer",
            ));
        }
        if !self.transaction_cost.is_finite() || self.transaction_cost < 0.0 {
            return Err(MacrossError::invalid(
                "backtest",
                "transaction_cost",
                "transaction_cost must be non-negative",
            ));
        }
        if !self.annualization_factor.is_finite() || self.annualization_factor <= 0.0 {
            return Err(MacrossError::invalid(
                "backtest",
                "annualization_factor",
                "annualization_factor must be positive",
            ));
        }
        Ok(())
    }
}

/// Everything one run produces, aligned bar by bar with the input series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestResult {
    pub config: BacktestConfig,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub indicators: Vec<IndicatorRow>,
    pub signals: Vec<SignalRow>,
    pub returns: Vec<ReturnRow>,
    pub equity: EquityCurves,
    pub metrics: BacktestMetrics,
    pub trade_count: usize,
    pub exposure: f64,
}

impl BacktestResult {
    pub fn bar_count(&self) -> usize {
        self.indicators.len()
    }

    pub fn cross_up_count(&self) -> usize {
        self.signals.iter().filter(|s| s.cross_up).count()
    }

    pub fn cross_down_count(&self) -> usize {
        self.signals.iter().filter(|s| s.cross_down).count()
    }
}

pub fn run_backtest(
    series: &PriceSeries,
    config: &BacktestConfig,
) -> Result<BacktestResult, MacrossError> {
    if series.is_empty() {
        return Err(MacrossError::EmptySeries);
    }
    config.validate()?;

    info!(
        "running SMA({})/SMA({}) crossover over {} bars, {} to {}",
        config.short_window,
        config.long_window,
        series.len(),
        series.first_date(),
        series.last_date()
    );
    if series.len() < config.long_window {
        warn!(
            "series has {} bars, fewer than long_window {}; no signals will fire",
            series.len(),
            config.long_window
        );
    }

    if config.volatility_window < 2 {
        warn!(
            "volatility_window {} holds a single return; volatility stays undefined",
            config.volatility_window
        );
    }

    // Stage 1: indicators
    let indicators = compute_indicators(
        series,
        config.short_window,
        config.long_window,
        config.volatility_window,
    )?;

    // Stage 2: signals and positions
    let signals = compute_signals(&indicators);

    // Stage 3: returns
    let returns = compute_returns(&indicators, &signals, config.transaction_cost);
    let trade_count = returns.iter().map(|r| usize::from(r.trade)).sum();
    debug!("{} trades", trade_count);

    // Stage 4: equity
    let equity = EquityCurves::from_return_rows(&returns);

    // Stage 5: metrics
    let buy_hold: Vec<Option<f64>> = returns.iter().map(|r| r.buy_hold_return).collect();
    let gross: Vec<Option<f64>> = returns.iter().map(|r| r.strategy_return_gross).collect();
    let net: Vec<Option<f64>> = returns.iter().map(|r| r.strategy_return_net).collect();
    let metrics = BacktestMetrics {
        buy_hold: MetricsReport::compute(&buy_hold, &equity.buy_hold, config.annualization_factor),
        gross: MetricsReport::compute(&gross, &equity.gross, config.annualization_factor),
        net: MetricsReport::compute(&net, &equity.net, config.annualization_factor),
    };
    if metrics.net.sharpe_ratio.is_none() {
        debug!("net strategy Sharpe ratio undefined (zero variance or too few returns)");
    }

    let exposure = signals.iter().filter(|s| s.held_position.is_long()).count() as f64
        / signals.len() as f64;

    info!(
        "backtest complete: net total return {:.2}%, buy-and-hold {:.2}%",
        metrics.net.total_return * 100.0,
        metrics.buy_hold.total_return * 100.0
    );

    Ok(BacktestResult {
        config: config.clone(),
        start_date: series.first_date(),
        end_date: series.last_date(),
        indicators,
        signals,
        returns,
        equity,
        metrics,
        trade_count,
        exposure,
    })
}
