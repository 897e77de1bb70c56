//! Rolling volatility of daily returns.
//!
//! VOL(n)[i] = sample stddev(RET[i-n+1..=i])
//! Undefined until the window holds n defined returns, so with the first
//! return undefined the first defined value sits at index n.

use crate::domain::indicator_helpers::sample_stddev;

pub fn calculate_volatility(returns: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    (0..returns.len())
        .map(|i| {
            if period == 0 || i + 1 < period {
                return None;
            }
            let window: Option<Vec<f64>> = returns[i + 1 - period..=i].iter().copied().collect();
            window.and_then(|w| sample_stddev(&w))
        })
        .collect()
}
