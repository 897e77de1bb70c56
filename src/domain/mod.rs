//! Core domain types and the backtest pipeline.

pub mod price;
pub mod indicator;
pub mod indicator_helpers;
pub mod position;
pub mod signal;
pub mod returns;
pub mod equity;
pub mod metrics;
pub mod backtest;
pub mod config_validation;
pub mod error;
