use common::{Candle, Signal};

use crate::indicators::average_volume;
use crate::Strategy;

/// Close position within the bar above which a surge reads as buying.
const UPPER_ZONE: f64 = 0.66;
/// Close position within the bar below which a surge reads as selling.
const LOWER_ZONE: f64 = 0.33;

/// Volume surge on the latest bar, directed by where the bar closed within
/// its range.
#[derive(Debug, Clone)]
pub struct VolumeBreakout {
    pub lookback_min: usize,
    /// Multiple of average volume the latest bar must exceed.
    pub surge_factor: f64,
}

impl Default for VolumeBreakout {
    fn default() -> Self {
        Self::new(15, 1.8)
    }
}

impl VolumeBreakout {
    pub fn new(lookback_min: usize, surge_factor: f64) -> Self {
        Self {
            lookback_min,
            surge_factor,
        }
    }
}

impl Strategy for VolumeBreakout {
    fn name(&self) -> &'static str {
        "volume_breakout"
    }

    fn min_candles(&self) -> usize {
        self.lookback_min.max(2)
    }

    fn evaluate(&self, candles: &[Candle]) -> Signal {
        if candles.len() < self.min_candles() {
            return Signal::neutral();
        }
        let Some(avg_volume) = average_volume(candles) else {
            return Signal::neutral();
        };
        if avg_volume == 0.0 {
            return Signal::neutral();
        }

        let last = &candles[candles.len() - 1];
        let range = last.range();
        if range == 0.0 {
            return Signal::neutral();
        }

        let volume = last.base_volume;
        if volume <= avg_volume * self.surge_factor {
            return Signal::neutral();
        }

        // 0 = closed at the low, 1 = closed at the high.
        let close_position = (last.close - last.low) / range;
        let confidence = (volume / (avg_volume * 2.0)).min(1.0);

        if close_position > UPPER_ZONE {
            Signal::long(range, confidence)
        } else if close_position < LOWER_ZONE {
            Signal::short(range, confidence)
        } else {
            Signal::neutral()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at_close, ohlc, timestamped, with_volume};
    use common::Direction;

    fn series(last: Candle) -> Vec<Candle> {
        let mut candles: Vec<Candle> = (0..14).map(|_| with_volume(at_close(100.0), 50.0, 0.5)).collect();
        candles.push(last);
        timestamped(candles)
    }

    #[test]
    fn neutral_below_minimum_history() {
        let candles: Vec<Candle> = series(with_volume(ohlc(100.0, 110.0, 100.0, 109.0), 100.0, 0.5))
            .into_iter()
            .skip(1)
            .collect();
        assert_eq!(VolumeBreakout::default().evaluate(&candles), Signal::neutral());
    }

    #[test]
    fn surge_closing_high_is_long_at_full_confidence() {
        // Close sits at 0.9 of the range; volume is twice the average.
        let last = with_volume(ohlc(100.0, 110.0, 100.0, 109.0), 100.0, 0.5);
        let signal = VolumeBreakout::default().evaluate(&series(last));
        assert_eq!(signal.direction, Direction::Long);
        assert_eq!(signal.weight, 10.0);
        assert_eq!(signal.confidence, 1.0);
        assert!(!signal.kill);
    }

    #[test]
    fn surge_closing_low_is_short() {
        let last = with_volume(ohlc(110.0, 110.0, 100.0, 101.0), 95.0, 0.5);
        let signal = VolumeBreakout::default().evaluate(&series(last));
        assert_eq!(signal.direction, Direction::Short);
        assert_eq!(signal.weight, 10.0);
        assert!((signal.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn surge_closing_mid_range_is_neutral() {
        let last = with_volume(ohlc(100.0, 110.0, 100.0, 105.0), 200.0, 0.5);
        assert!(VolumeBreakout::default().evaluate(&series(last)).is_neutral());
    }

    #[test]
    fn ordinary_volume_is_neutral() {
        let last = with_volume(ohlc(100.0, 110.0, 100.0, 109.0), 80.0, 0.5);
        assert!(VolumeBreakout::default().evaluate(&series(last)).is_neutral());
    }

    #[test]
    fn zero_range_bar_is_neutral() {
        let last = with_volume(ohlc(100.0, 100.0, 100.0, 100.0), 500.0, 0.5);
        assert!(VolumeBreakout::default().evaluate(&series(last)).is_neutral());
    }

    #[test]
    fn silent_history_is_neutral() {
        let mut candles = series(with_volume(ohlc(100.0, 110.0, 100.0, 109.0), 100.0, 0.5));
        for c in candles.iter_mut().take(14) {
            *c = with_volume(c.clone(), 0.0, 0.0);
        }
        assert!(VolumeBreakout::default().evaluate(&candles).is_neutral());
    }
}
