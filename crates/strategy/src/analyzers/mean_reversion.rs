use common::{Candle, Signal};

use super::last_closes;
use crate::indicators::{mean, population_std_dev};
use crate::Strategy;

/// Trades against large z-score deviations from the rolling mean.
#[derive(Debug, Clone)]
pub struct MeanReversion {
    pub lookback_period: usize,
    pub deviation_threshold: f64,
}

impl Default for MeanReversion {
    fn default() -> Self {
        Self::new(20, 1.5)
    }
}

impl MeanReversion {
    pub fn new(lookback_period: usize, deviation_threshold: f64) -> Self {
        Self {
            lookback_period,
            deviation_threshold,
        }
    }
}

impl Strategy for MeanReversion {
    fn name(&self) -> &'static str {
        "mean_reversion"
    }

    fn min_candles(&self) -> usize {
        self.lookback_period
    }

    fn evaluate(&self, candles: &[Candle]) -> Signal {
        if self.lookback_period == 0 || candles.len() < self.lookback_period {
            return Signal::neutral();
        }

        let closes = last_closes(candles, self.lookback_period);
        let Some(avg) = mean(&closes) else {
            return Signal::neutral();
        };
        let Some(std) = population_std_dev(&closes, avg) else {
            return Signal::neutral();
        };
        if std == 0.0 {
            return Signal::neutral();
        }

        let current = closes[closes.len() - 1];
        let z_score = (current - avg) / std;
        if z_score.abs() < self.deviation_threshold {
            return Signal::neutral();
        }

        let weight = (current - avg).abs();
        let confidence = (z_score.abs() / (self.deviation_threshold * 2.0)).min(1.0);

        // Above the mean: expect a move back down.
        if z_score > 0.0 {
            Signal::short(weight, confidence)
        } else {
            Signal::long(weight, confidence)
        }
    }
}
