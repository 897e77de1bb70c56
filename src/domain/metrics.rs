//! Performance metrics and statistics.
//!
//! Sample statistics (volatility, Sharpe, annualized return) use only the
//! defined returns. Drawdown and total return read the equity curve, where
//! undefined returns were compounded as 0.

use log::warn;
use serde::Serialize;

use super::equity::{EquityCurve, EquityPoint};
use super::indicator_helpers::{defined, mean, sample_stddev};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// A standard deviation at or below this is treated as zero variance.
pub const ZERO_VARIANCE_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub observations: usize,
    pub annualized_volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown: f64,
    pub max_drawdown_duration: usize,
    pub total_return: f64,
    pub annualized_return: Option<f64>,
}

impl MetricsReport {
    pub fn compute(
        returns: &[Option<f64>],
        equity: &EquityCurve,
        annualization_factor: f64,
    ) -> Self {
        let sample = defined(returns);
        let observations = sample.len();

        let stddev = sample_stddev(&sample);
        let annualized_volatility = stddev.map(|s| s * annualization_factor.sqrt());
        let sharpe_ratio = compute_sharpe(&sample, annualization_factor);

        let (max_drawdown, max_drawdown_duration) = compute_drawdown(&equity.points);

        let total_return = equity.last().map(|e| e - 1.0).unwrap_or(0.0);

        let annualized_return = if observations > 0 && 1.0 + total_return > 0.0 {
            let years = observations as f64 / annualization_factor;
            Some((1.0 + total_return).powf(1.0 / years) - 1.0).filter(|r| r.is_finite())
        } else {
            None
        };

        if equity.points.iter().any(|p| p.equity <= 0.0) {
            warn!("equity curve reaches zero or below (total_return {total_return:.4})");
        }

        MetricsReport {
            observations,
            annualized_volatility,
            sharpe_ratio,
            max_drawdown,
            max_drawdown_duration,
            total_return,
            annualized_return,
        }
    }
}

/// Metrics for the three return series of one backtest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestMetrics {
    pub buy_hold: MetricsReport,
    pub gross: MetricsReport,
    pub net: MetricsReport,
}

/// `mean / stddev * sqrt(A)`; `None` when there are fewer than two
/// observations or the variance is zero.
pub fn compute_sharpe(sample: &[f64], annualization_factor: f64) -> Option<f64> {
    let stddev = sample_stddev(sample)?;
    if stddev <= ZERO_VARIANCE_EPSILON {
        return None;
    }
    let m = mean(sample)?;
    Some(m / stddev * annualization_factor.sqrt())
}

/// Returns `(max_drawdown, max_drawdown_duration)`.
///
/// Drawdown is `equity / running_peak - 1`, so the result is <= 0. Duration
/// is the longest run of consecutive points strictly below the peak.
pub fn compute_drawdown(equity_curve: &[EquityPoint]) -> (f64, usize) {
    if equity_curve.is_empty() {
        return (0.0, 0);
    }

    let mut peak = equity_curve[0].equity;
    let mut max_dd = 0.0_f64;
    let mut max_dd_duration = 0usize;
    let mut current_dd_duration = 0usize;

    for point in equity_curve {
        if point.equity >= peak {
            peak = point.equity;
            current_dd_duration = 0;
        } else if peak > 0.0 {
            let dd = point.equity / peak - 1.0;
            if dd < max_dd {
                max_dd = dd;
            }
            current_dd_duration += 1;
            if current_dd_duration > max_dd_duration {
                max_dd_duration = current_dd_duration;
            }
        }
    }

    (max_dd, max_dd_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_equity_curve(values: &[f64]) -> EquityCurve {
        EquityCurve {
            points: values
                .iter()
                .enumerate()
                .map(|(i, &v)| EquityPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Duration::days(i as i64),
                    equity: v,
                })
                .collect(),
        }
    }

    #[test]
    fn max_drawdown_single_peak_then_trough() {
        let curve = make_equity_curve(&[1.0, 1.2, 0.9, 1.1]);
        let (dd, duration) = compute_drawdown(&curve.points);
        assert_relative_eq!(dd, -0.25, epsilon = 1e-12);
        assert_eq!(duration, 2);
    }

    #[test]
    fn max_drawdown_zero_when_non_decreasing() {
        let curve = make_equity_curve(&[1.0, 1.0, 1.1, 1.2, 1.2]);
        let (dd, duration) = compute_drawdown(&curve.points);
        assert_eq!(dd, 0.0);
        assert_eq!(duration, 0);
    }

    #[test]
    fn max_drawdown_picks_deepest() {
        let curve = make_equity_curve(&[100.0, 110.0, 90.0, 95.0, 80.0, 100.0]);
        let (dd, _) = compute_drawdown(&curve.points);
        assert_relative_eq!(dd, 80.0 / 110.0 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn max_drawdown_duration() {
        let curve = make_equity_curve(&[100.0, 110.0, 100.0, 90.0, 85.0, 95.0]);
        let (_, duration) = compute_drawdown(&curve.points);
        assert_eq!(duration, 4);
    }

    #[test]
    fn sharpe_undefined_for_identical_returns() {
        assert!(compute_sharpe(&[0.01, 0.01, 0.01], 252.0).is_none());
    }

    #[test]
    fn sharpe_undefined_for_single_observation() {
        assert!(compute_sharpe(&[0.01], 252.0).is_none());
    }

    #[test]
    fn sharpe_positive_for_rising_returns() {
        let sample = [0.01, 0.02, 0.015, 0.005];
        let s = compute_sharpe(&sample, 252.0).unwrap();
        let expected =
            mean(&sample).unwrap() / sample_stddev(&sample).unwrap() * 252.0_f64.sqrt();
        assert_relative_eq!(s, expected, epsilon = 1e-12);
        assert!(s > 0.0);
    }

    #[test]
    fn report_excludes_undefined_from_sample() {
        let returns = vec![None, Some(0.1), Some(-0.05), Some(0.02)];
        let dates: Vec<NaiveDate> = make_equity_curve(&[0.0; 4])
            .points
            .iter()
            .map(|p| p.date)
            .collect();
        let equity = EquityCurve::from_returns(&dates, &returns);
        let report = MetricsReport::compute(&returns, &equity, 252.0);

        assert_eq!(report.observations, 3);
        let sample = [0.1, -0.05, 0.02];
        assert_relative_eq!(
            report.annualized_volatility.unwrap(),
            sample_stddev(&sample).unwrap() * 252.0_f64.sqrt(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            report.total_return,
            1.1 * 0.95 * 1.02 - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn report_volatility_undefined_below_two_observations() {
        let returns = vec![None, Some(0.1)];
        let equity = make_equity_curve(&[1.0, 1.1]);
        let report = MetricsReport::compute(&returns, &equity, 252.0);

        assert!(report.annualized_volatility.is_none());
        assert!(report.sharpe_ratio.is_none());
        assert_relative_eq!(report.total_return, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn report_flat_returns_distinguish_zero_from_undefined() {
        let returns = vec![None, Some(0.0), Some(0.0), Some(0.0)];
        let equity = make_equity_curve(&[1.0, 1.0, 1.0, 1.0]);
        let report = MetricsReport::compute(&returns, &equity, 252.0);

        assert_eq!(report.annualized_volatility, Some(0.0));
        assert_eq!(report.sharpe_ratio, None);
        assert_eq!(report.max_drawdown, 0.0);
        assert_eq!(report.total_return, 0.0);
        assert_eq!(report.annualized_return, Some(0.0));
    }

    #[test]
    fn annualized_return_over_one_year() {
        let mut returns = vec![None];
        returns.extend(std::iter::repeat_n(Some(0.0), 251));
        returns.push(Some(0.1));
        let dates: Vec<NaiveDate> = make_equity_curve(&vec![0.0; returns.len()])
            .points
            .iter()
            .map(|p| p.date)
            .collect();
        let equity = EquityCurve::from_returns(&dates, &returns);
        let report = MetricsReport::compute(&returns, &equity, TRADING_DAYS_PER_YEAR);

        assert_eq!(report.observations, 252);
        assert_relative_eq!(report.annualized_return.unwrap(), 0.1, epsilon = 1e-9);
    }

    #[test]
    fn annualized_return_overflow_is_undefined() {
        let returns = vec![None, Some(1999.0)];
        let equity = EquityCurve::from_returns(
            &make_equity_curve(&[1.0, 1.0])
                .points
                .iter()
                .map(|p| p.date)
                .collect::<Vec<_>>(),
            &returns,
        );
        let report = MetricsReport::compute(&returns, &equity, TRADING_DAYS_PER_YEAR);

        assert_relative_eq!(report.total_return, 1999.0);
        assert!(report.annualized_return.is_none());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["annualized_return"].is_null());
        assert_eq!(json["total_return"], 1999.0);
    }

    #[test]
    fn annualized_return_undefined_without_observations() {
        let returns = vec![None];
        let equity = make_equity_curve(&[1.0]);
        let report = MetricsReport::compute(&returns, &equity, 252.0);
        assert_eq!(report.observations, 0);
        assert!(report.annualized_return.is_none());
        assert_eq!(report.total_return, 0.0);
    }
}
