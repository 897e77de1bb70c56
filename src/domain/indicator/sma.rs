//! Simple Moving Average.
//!
//! SMA(n)[i] = sum(C[i-j] for j in 0..n) / n
//! Warmup: first (n-1) bars are undefined.
//!
//! The window mean is accumulated as a running mean, so a window of
//! identical closes yields exactly that close.

pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; closes.len()];
    }

    let warmup = period - 1;
    (0..closes.len())
        .map(|i| {
            if i < warmup {
                return None;
            }
            let window = &closes[i + 1 - period..=i];
            Some(running_mean(window))
        })
        .collect()
}

fn running_mean(window: &[f64]) -> f64 {
    window
        .iter()
        .enumerate()
        .fold(0.0, |m, (k, &x)| m + (x - m) / (k + 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_warmup() {
        let sma = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert!(sma[0].is_none());
        assert!(sma[1].is_none());
        assert!(sma[2].is_some());
        assert!(sma[4].is_some());
    }

    #[test]
    fn sma_basic_calculation() {
        let sma = calculate_sma(&[10.0, 20.0, 30.0, 40.0], 3);
        assert_relative_eq!(sma[2].unwrap(), 20.0);
        assert_relative_eq!(sma[3].unwrap(), 30.0);
    }

    #[test]
    fn sma_period_one_is_close() {
        let closes = [3.0, 1.0, 4.0];
        let sma = calculate_sma(&closes, 1);
        assert_eq!(sma, vec![Some(3.0), Some(1.0), Some(4.0)]);
    }

    #[test]
    fn sma_longer_than_series() {
        let sma = calculate_sma(&[1.0, 2.0], 5);
        assert_eq!(sma, vec![None, None]);
    }

    #[test]
    fn sma_constant_inexact_levels() {
        for level in [0.1, 1.01, 1.02, 123.45, 499.99] {
            let sma = calculate_sma(&[level; 25], 20);
            for v in sma.iter().skip(19) {
                assert_eq!(*v, Some(level));
            }
            let sma = calculate_sma(&[level; 25], 5);
            assert!(sma.iter().skip(4).all(|v| *v == Some(level)));
        }
    }

    #[test]
    fn sma_constant_series() {
        let sma = calculate_sma(&[100.0; 6], 4);
        for v in sma.iter().skip(3) {
            assert_eq!(v.unwrap(), 100.0);
        }
    }
}
