//! Configuration validation.
//!
//! Validates all config fields before any price data is read.

use crate::domain::backtest::BacktestConfig;
use crate::domain::error::MacrossError;
use crate::domain::metrics::TRADING_DAYS_PER_YEAR;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_PERIOD: &str = "6mo";

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    validate_ticker(config)?;
    validate_period(config)?;
    read_backtest_config(config)?.validate()?;
    Ok(())
}

/// Reads the numeric strategy/backtest keys, falling back to defaults for
/// absent keys and rejecting values that do not parse.
pub fn read_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, MacrossError> {
    let defaults = BacktestConfig::default();

    Ok(BacktestConfig {
        short_window: parse_window(config, "short_window", defaults.short_window)?,
        long_window: parse_window(config, "long_window", defaults.long_window)?,
        volatility_window: parse_window(config, "volatility_window", defaults.volatility_window)?,
        transaction_cost: parse_double(
            config,
            "backtest",
            "transaction_cost",
            defaults.transaction_cost,
        )?,
        annualization_factor: parse_double(
            config,
            "backtest",
            "annualization_factor",
            TRADING_DAYS_PER_YEAR,
        )?,
    })
}

fn validate_ticker(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    match config.get_string("data", "ticker") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(MacrossError::ConfigMissing {
            section: "data".to_string(),
            key: "ticker".to_string(),
        }),
    }
}

fn validate_period(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    match config.get_string("data", "period") {
        Some(s) if s.trim().is_empty() => Err(MacrossError::invalid(
            "data",
            "period",
            "period must not be blank",
        )),
        _ => Ok(()),
    }
}

fn parse_window(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, MacrossError> {
    let Some(raw) = config.get_string("strategy", key) else {
        return Ok(default);
    };
    let value: i64 = raw.trim().parse().map_err(|_| {
        MacrossError::invalid("strategy", key, format!("{} must be an integer", key))
    })?;
    if value < 1 {
        return Err(MacrossError::invalid(
            "strategy",
            key,
            format!("{} must be a positive integer", key),
        ));
    }
    usize::try_from(value)
        .map_err(|_| MacrossError::invalid("strategy", key, format!("{} is too large", key)))
}

fn parse_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, MacrossError> {
    match config.get_string(section, key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| MacrossError::invalid(section, key, format!("{} must be a number", key))),
    }
}
