//! Simple daily return.
//!
//! RET[i] = C[i] / C[i-1] - 1
//! Undefined on the first bar.

pub fn calculate_daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|i| {
            if i == 0 {
                None
            } else {
                Some(closes[i] / closes[i - 1] - 1.0)
            }
        })
        .collect()
}
