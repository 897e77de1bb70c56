//! Growth-of-$1 equity curves.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::returns::ReturnRow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EquityCurve {
    pub points: Vec<EquityPoint>,
}

impl EquityCurve {
    /// Compounds `(1 + r)` bar by bar; an undefined return compounds as 0
    /// so the curve keeps exactly one point per input bar.
    ///
    /// No clamping: a return of -100% or worse surfaces arithmetically.
    pub fn from_returns(dates: &[NaiveDate], returns: &[Option<f64>]) -> Self {
        let mut equity = 1.0;
        let points = dates
            .iter()
            .zip(returns)
            .map(|(&date, r)| {
                equity *= 1.0 + r.unwrap_or(0.0);
                EquityPoint { date, equity }
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.equity).collect()
    }

    pub fn last(&self) -> Option<f64> {
        self.points.last().map(|p| p.equity)
    }
}

/// The three curves the pipeline reports, keyed by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityCurves {
    pub buy_hold: EquityCurve,
    pub gross: EquityCurve,
    pub net: EquityCurve,
}

impl EquityCurves {
    pub fn from_return_rows(rows: &[ReturnRow]) -> Self {
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        let buy_hold: Vec<Option<f64>> = rows.iter().map(|r| r.buy_hold_return).collect();
        let gross: Vec<Option<f64>> = rows.iter().map(|r| r.strategy_return_gross).collect();
        let net: Vec<Option<f64>> = rows.iter().map(|r| r.strategy_return_net).collect();

        Self {
            buy_hold: EquityCurve::from_returns(&dates, &buy_hold),
            gross: EquityCurve::from_returns(&dates, &gross),
            net: EquityCurve::from_returns(&dates, &net),
        }
    }
}
