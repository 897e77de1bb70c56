//! CSV file price data adapter.
//!
//! Reads the cleaned download files `<TICKER>_<period>_clean.csv`, locating
//! the `Date` and `Close` columns by header name.

use crate::domain::error::MacrossError;
use crate::domain::price::{Bar, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn csv_path(&self, ticker: &str, period: &str) -> PathBuf {
        self.base_path
            .join(format!("{}_{}_clean.csv", ticker.to_uppercase(), period))
    }
}

fn column_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, MacrossError> {
    let trimmed = value.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| MacrossError::Data {
        reason: format!("invalid date {:?}: {}", value, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_series(&self, ticker: &str, period: &str) -> Result<PriceSeries, MacrossError> {
        let path = self.csv_path(ticker, period);
        let content = fs::read_to_string(&path).map_err(|e| MacrossError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| MacrossError::Data {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();

        let date_col = column_index(&headers, &["date", "datetime"]).ok_or_else(|| {
            MacrossError::Data {
                reason: "missing date column".into(),
            }
        })?;
        let close_col = column_index(&headers, &["close", "adj close"]).ok_or_else(|| {
            MacrossError::Data {
                reason: "missing close column".into(),
            }
        })?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| MacrossError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date = parse_date(record.get(date_col).unwrap_or_default())?;

            let close_str = record.get(close_col).unwrap_or_default().trim();
            if close_str.is_empty() || close_str.eq_ignore_ascii_case("nan") {
                warn!("skipping {} on {}: no close", ticker, date);
                continue;
            }
            let close: f64 = close_str.parse().map_err(|e| MacrossError::Data {
                reason: format!("invalid close value {:?}: {}", close_str, e),
            })?;

            bars.push(Bar::new(date, close));
        }

        bars.sort_by_key(|b| b.date);
        info!("loaded {} bars from {}", bars.len(), path.display());
        PriceSeries::new(bars)
    }
}
