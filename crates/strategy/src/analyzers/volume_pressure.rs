use common::{Candle, Signal};

use crate::indicators::average_volume;
use crate::Strategy;

/// Taker pressure that still earns a weak opinion without a volume surge.
const WEAK_PRESSURE: f64 = 0.58;
const WEAK_CONFIDENCE: f64 = 0.3;

/// Reads taker buy/sell pressure on the latest bar, weighted by how far its
/// volume stands above the average of every earlier bar.
#[derive(Debug, Clone)]
pub struct VolumePressure {
    /// Multiple of average volume that counts as "high volume".
    pub volume_threshold: f64,
    /// Taker share needed for a strong signal on high volume.
    pub pressure_threshold: f64,
    pub lookback_min: usize,
}

impl Default for VolumePressure {
    fn default() -> Self {
        Self::new(1.5, 0.6)
    }
}

impl VolumePressure {
    pub fn new(volume_threshold: f64, pressure_threshold: f64) -> Self {
        Self {
            volume_threshold,
            pressure_threshold,
            lookback_min: 10,
        }
    }

    pub fn with_lookback_min(mut self, lookback_min: usize) -> Self {
        self.lookback_min = lookback_min;
        self
    }
}

impl Strategy for VolumePressure {
    fn name(&self) -> &'static str {
        "volume_pressure"
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

        let latest = &candles[candles.len() - 1];
        let current_volume = latest.base_volume;
        let buy = latest.buy_pressure();
        let sell = latest.sell_pressure();

        if current_volume <= avg_volume * self.volume_threshold {
            return if buy > WEAK_PRESSURE {
                Signal::long(buy - 0.5, WEAK_CONFIDENCE)
            } else if sell > WEAK_PRESSURE {
                Signal::short(sell - 0.5, WEAK_CONFIDENCE)
            } else {
                Signal::neutral()
            };
        }

        let volume_ratio = current_volume / avg_volume;
        if buy > self.pressure_threshold {
            let confidence = ((buy - 0.5) * 2.0 * (volume_ratio / 2.0)).min(1.0);
            Signal::long(current_volume, confidence)
        } else if sell > self.pressure_threshold {
            let confidence = ((sell - 0.5) * 2.0 * (volume_ratio / 2.0)).min(1.0);
            Signal::short(current_volume, confidence)
        } else {
            Signal::neutral()
        }
    }
}
