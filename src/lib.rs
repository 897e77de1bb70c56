//! macross: moving-average crossover backtester for daily price series.
//!
//! Hexagonal architecture: the signal/position/backtest/metrics pipeline in
//! [`domain`], port traits in [`ports`], concrete implementations in
//! [`adapters`], command dispatch in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
