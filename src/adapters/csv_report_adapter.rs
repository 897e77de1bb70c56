//! CSV + JSON report adapter implementing ReportPort.
//!
//! Writes `<TICKER>_backtest.csv` (one flattened row per bar, undefined
//! values as empty cells) and `<TICKER>_summary.json` (the full result).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;
use serde::Serialize;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::MacrossError;
use crate::domain::position::Position;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Serialize)]
struct BarRow {
    date: NaiveDate,
    close: f64,
    daily_return: Option<f64>,
    sma_short: Option<f64>,
    sma_long: Option<f64>,
    volatility: Option<f64>,
    is_bullish: Option<bool>,
    cross_up: bool,
    cross_down: bool,
    position: Position,
    held_position: Position,
    trade: u8,
    buy_hold_return: Option<f64>,
    strategy_return_gross: Option<f64>,
    strategy_return_net: Option<f64>,
    equity_buy_hold: f64,
    equity_gross: f64,
    equity_net: f64,
}

fn flatten(result: &BacktestResult) -> Vec<BarRow> {
    let equity = &result.equity;
    (0..result.bar_count())
        .map(|i| {
            let ind = &result.indicators[i];
            let sig = &result.signals[i];
            let ret = &result.returns[i];
            BarRow {
                date: ind.date,
                close: ind.close,
                daily_return: ind.daily_return,
                sma_short: ind.sma_short,
                sma_long: ind.sma_long,
                volatility: ind.volatility,
                is_bullish: sig.is_bullish,
                cross_up: sig.cross_up,
                cross_down: sig.cross_down,
                position: sig.position,
                held_position: sig.held_position,
                trade: ret.trade,
                buy_hold_return: ret.buy_hold_return,
                strategy_return_gross: ret.strategy_return_gross,
                strategy_return_net: ret.strategy_return_net,
                equity_buy_hold: equity.buy_hold.points[i].equity,
                equity_gross: equity.gross.points[i].equity,
                equity_net: equity.net.points[i].equity,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn write_csv(&self, result: &BacktestResult, path: &Path) -> Result<(), MacrossError> {
        let mut wtr = csv::Writer::from_path(path).map_err(|e| MacrossError::Report {
            reason: format!("failed to create {}: {}", path.display(), e),
        })?;
        for row in flatten(result) {
            wtr.serialize(row).map_err(|e| MacrossError::Report {
                reason: format!("CSV write error: {}", e),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn write_json(&self, result: &BacktestResult, path: &Path) -> Result<(), MacrossError> {
        let json = serde_json::to_string_pretty(result).map_err(|e| MacrossError::Report {
            reason: format!("JSON encode error: {}", e),
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        ticker: &str,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, MacrossError> {
        fs::create_dir_all(output_dir)?;
        let stem = ticker.to_uppercase();

        let csv_path = output_dir.join(format!("{}_backtest.csv", stem));
        self.write_csv(result, &csv_path)?;
        info!("wrote {}", csv_path.display());

        let json_path = output_dir.join(format!("{}_summary.json", stem));
        self.write_json(result, &json_path)?;
        info!("wrote {}", json_path.display());

        Ok(vec![csv_path, json_path])
    }
}
