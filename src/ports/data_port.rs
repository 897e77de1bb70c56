//! Price data access port trait.

use crate::domain::error::MacrossError;
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily series for `ticker` over the retrieval `period` (e.g. `6mo`).
    fn fetch_series(&self, ticker: &str, period: &str) -> Result<PriceSeries, MacrossError>;

    /// First date, last date and bar count, or `None` when no data exists.
    fn data_range(
        &self,
        ticker: &str,
        period: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MacrossError> {
        match self.fetch_series(ticker, period) {
            Ok(series) => Ok(Some((series.first_date(), series.last_date(), series.len()))),
            Err(MacrossError::EmptySeries) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
