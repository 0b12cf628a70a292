use common::{Candle, Signal};

use super::last_closes;
use crate::Strategy;

/// Percent moves at or inside this band count as neither up nor down.
const NOISE_PCT: f64 = 0.1;
/// Average percent move that maps to full base confidence.
const FULL_CONFIDENCE_PCT: f64 = 3.0;
const CONSISTENCY_BOOST: f64 = 0.2;

/// Average close-to-close percent change over a short lookback.
///
/// The last `lookback_period` closes yield `lookback_period - 1` changes. The
/// signal follows the sign of their average; confidence gets a boost when
/// moves in that direction outnumber the opposite by more than 2:1.
#[derive(Debug, Clone)]
pub struct PriceMomentum {
    pub lookback_period: usize,
}

impl Default for PriceMomentum {
    fn default() -> Self {
        Self::new(5)
    }
}

impl PriceMomentum {
    pub fn new(lookback_period: usize) -> Self {
        Self { lookback_period }
    }
}

impl Strategy for PriceMomentum {
    fn name(&self) -> &'static str {
        "momentum"
    }

    fn min_candles(&self) -> usize {
        self.lookback_period + 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Signal {
        if self.lookback_period < 2 || candles.len() < self.min_candles() {
            return Signal::neutral();
        }

        let closes = last_closes(candles, self.lookback_period);
        let mut total_change = 0.0;
        let mut positive = 0usize;
        let mut negative = 0usize;

        for pair in closes.windows(2) {
            if pair[0] == 0.0 {
                return Signal::neutral();
            }
            let change_pct = (pair[1] - pair[0]) / pair[0] * 100.0;
            total_change += change_pct;
            if change_pct > NOISE_PCT {
                positive += 1;
            } else if change_pct < -NOISE_PCT {
                negative += 1;
            }
        }

        let avg_change = total_change / (closes.len() - 1) as f64;
        if avg_change.abs() < NOISE_PCT {
            return Signal::neutral();
        }

        let weight = avg_change.abs();
        let mut confidence = (weight / FULL_CONFIDENCE_PCT).min(1.0);
        let consistent = (positive > negative * 2 && avg_change > 0.0)
            || (negative > positive * 2 && avg_change < 0.0);
        if consistent {
            confidence = (confidence + CONSISTENCY_BOOST).min(1.0);
        }

        if avg_change > 0.0 {
            Signal::long(weight, confidence)
        } else {
            Signal::short(weight, confidence)
        }
    }
}
