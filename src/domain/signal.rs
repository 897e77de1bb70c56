//! Moving-average crossover signals and the derived position series.
//!
//! # Evaluation Semantics
//!
//! - `is_bullish`: `sma_short > sma_long`, `None` while either is undefined
//! - `cross_up` / `cross_down`: need a defined previous bar, `false` otherwise
//! - `position`: state after applying this bar's cross, decided at the close
//! - `held_position`: state as of the previous close; this is what earns the
//!   bar's return, so today's averages only affect tomorrow's return

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::domain::indicator::IndicatorRow;
use crate::domain::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub is_bullish: Option<bool>,
    pub cross_up: bool,
    pub cross_down: bool,
    pub held_position: Position,
    pub position: Position,
}

pub fn is_bullish(row: &IndicatorRow) -> Option<bool> {
    match (row.sma_short, row.sma_long) {
        (Some(short), Some(long)) => Some(short > long),
        _ => None,
    }
}

pub fn compute_signals(indicators: &[IndicatorRow]) -> Vec<SignalRow> {
    let mut signals = Vec::with_capacity(indicators.len());
    let mut state = Position::Flat;
    let mut previous_bullish: Option<bool> = None;

    for row in indicators {
        let bullish = is_bullish(row);
        let (cross_up, cross_down) = match (previous_bullish, bullish) {
            (Some(false), Some(true)) => (true, false),
            (Some(true), Some(false)) => (false, true),
            _ => (false, false),
        };

        let held_position = state;
        state = state.transition(cross_up, cross_down);

        if cross_up || cross_down {
            debug!(
                "{} on {}: {:?} -> {:?}",
                if cross_up { "cross up" } else { "cross down" },
                row.date,
                held_position,
                state
            );
        }

        signals.push(SignalRow {
            date: row.date,
            is_bullish: bullish,
            cross_up,
            cross_down,
            held_position,
            position: state,
        });
        previous_bullish = bullish;
    }

    signals
}
