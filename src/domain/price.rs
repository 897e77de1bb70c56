//! Daily price bars and the validated price series.

use chrono::NaiveDate;
use serde::Serialize;

use super::error::MacrossError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Bars sorted ascending by date with unique dates and positive closes.
///
/// The only way to build one is [`PriceSeries::new`], so every stage
/// downstream can rely on the invariants without re-checking them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self, MacrossError> {
        if bars.is_empty() {
            return Err(MacrossError::EmptySeries);
        }

        for (i, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(MacrossError::InvalidSeries {
                    reason: format!("close on {} must be positive, got {}", bar.date, bar.close),
                });
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(MacrossError::InvalidSeries {
                    reason: format!(
                        "dates must be strictly increasing: {} follows {}",
                        bar.date,
                        bars[i - 1].date
                    ),
                });
            }
        }

        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    /// The first `len` bars as a new series; `None` when `len` is zero.
    pub fn truncated(&self, len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        let end = len.min(self.bars.len());
        Some(Self {
            bars: self.bars[..end].to_vec(),
        })
    }
}
