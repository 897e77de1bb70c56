#![allow(dead_code)]

use chrono::NaiveDate;
use macross::domain::backtest::BacktestConfig;
use macross::domain::error::MacrossError;
pub use macross::domain::price::{Bar, PriceSeries};
use macross::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, ticker: &str, _period: &str) -> Result<PriceSeries, MacrossError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(MacrossError::Data {
                reason: reason.clone(),
            });
        }
        PriceSeries::new(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bars(start_date: &str, closes: &[f64]) -> Vec<Bar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar::new(start + chrono::Duration::days(i as i64), close))
        .collect()
}

pub fn make_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(make_bars("2024-01-01", closes)).unwrap()
}

/// `flat` bars at `level`, then `ramp` bars rising by `step` per bar.
pub fn constant_then_ramp(flat: usize, ramp: usize, level: f64, step: f64) -> Vec<f64> {
    let mut closes = vec![level; flat];
    closes.extend((1..=ramp).map(|i| level + step * i as f64));
    closes
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        short_window: 5,
        long_window: 20,
        volatility_window: 10,
        transaction_cost: 0.001,
        annualization_factor: 252.0,
    }
}
