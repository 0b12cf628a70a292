use common::{Candle, Signal};

use crate::indicators::ema;
use crate::Strategy;

/// Follows the fast/slow EMA spread of closing prices.
///
/// `diff = ema(fast) - ema(slow)`. A positive spread is LONG; anything else,
/// including an exact tie, is SHORT. Weight is `|diff|`, confidence is
/// `|diff| / ema(slow)`.
#[derive(Debug, Clone)]
pub struct EmaTrend {
    pub fast: usize,
    pub slow: usize,
}

impl Default for EmaTrend {
    fn default() -> Self {
        Self::new(9, 21)
    }
}

impl EmaTrend {
    pub fn new(fast: usize, slow: usize) -> Self {
        Self { fast, slow }
    }
}

impl Strategy for EmaTrend {
    fn name(&self) -> &'static str {
        "ema_trend"
    }

    fn min_candles(&self) -> usize {
        self.slow + 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Signal {
        if candles.len() < self.min_candles() {
            return Signal::neutral();
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let (Some(fast), Some(slow)) = (ema(&closes, self.fast), ema(&closes, self.slow)) else {
            return Signal::neutral();
        };
        if slow == 0.0 {
            return Signal::neutral();
        }

        let diff = fast - slow;
        let weight = diff.abs();
        let confidence = (weight / slow).min(1.0);

        // A zero spread resolves to SHORT, not FLAT.
        if diff > 0.0 {
            Signal::long(weight, confidence)
        } else {
            Signal::short(weight, confidence)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::closes;
    use common::Direction;

    fn trending(n: usize, step: f64) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * step).collect()
    }

    #[test]
    fn neutral_below_minimum_history() {
        let candles = closes(&trending(21, 1.0));
        assert_eq!(EmaTrend::default().evaluate(&candles), Signal::neutral());
    }

    #[test]
    fn rising_series_is_long() {
        let signal = EmaTrend::default().evaluate(&closes(&trending(22, 1.0)));
        assert_eq!(signal.direction, Direction::Long);
        assert!(signal.weight > 0.0);
        assert!(signal.confidence > 0.0 && signal.confidence < 1.0);
    }

    #[test]
    fn falling_series_is_short() {
        let signal = EmaTrend::default().evaluate(&closes(&trending(30, -1.0)));
        assert_eq!(signal.direction, Direction::Short);
        assert!(signal.weight > 0.0);
    }

    #[test]
    fn flat_series_ties_to_short_with_zero_weight() {
        let signal = EmaTrend::default().evaluate(&closes(&[50.0; 22]));
        assert_eq!(signal.direction, Direction::Short);
        assert_eq!(signal.weight, 0.0);
        assert_eq!(signal.confidence, 0.0);
    }

    #[test]
    fn zero_slow_ema_is_neutral() {
        let signal = EmaTrend::default().evaluate(&closes(&[0.0; 22]));
        assert!(signal.is_neutral());
    }

    #[test]
    fn weight_matches_ema_spread() {
        let series = trending(40, 0.5);
        let fast = ema(&series, 9).unwrap();
        let slow = ema(&series, 21).unwrap();
        let signal = EmaTrend::default().evaluate(&closes(&series));
        assert!((signal.weight - (fast - slow)).abs() < 1e-12);
        assert!((signal.confidence - (fast - slow) / slow).abs() < 1e-12);
    }
}
