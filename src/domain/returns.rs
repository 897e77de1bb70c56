//! Buy-and-hold and strategy returns, gross and net of trading costs.
//!
//! gross[t] = held_position[t] * RET[t], where held_position[t] is the
//! position as of the close of t-1 (flat before the series starts).
//! trade[t] = |position[t] - position[t-1]|, charged in the same bar:
//! net[t] = gross[t] - trade[t] * cost.
//! An undefined RET[t] leaves all three returns undefined for that bar.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::indicator::IndicatorRow;
use crate::domain::position::Position;
use crate::domain::signal::SignalRow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnRow {
    pub date: NaiveDate,
    pub buy_hold_return: Option<f64>,
    pub strategy_return_gross: Option<f64>,
    pub trade: u8,
    pub strategy_return_net: Option<f64>,
}

pub fn compute_returns(
    indicators: &[IndicatorRow],
    signals: &[SignalRow],
    transaction_cost: f64,
) -> Vec<ReturnRow> {
    let mut previous = Position::Flat;

    indicators
        .iter()
        .zip(signals)
        .map(|(ind, sig)| {
            debug_assert_eq!(ind.date, sig.date);
            debug_assert_eq!(sig.held_position, previous);

            let trade = sig.position.trade_from(previous);
            previous = sig.position;

            let gross = ind.daily_return.map(|r| sig.held_position.weight() * r);
            let net = gross.map(|g| g - f64::from(trade) * transaction_cost);

            ReturnRow {
                date: ind.date,
                buy_hold_return: ind.daily_return,
                strategy_return_gross: gross,
                trade,
                strategy_return_net: net,
            }
        })
        .collect()
}
