use common::{Candle, Signal};

use super::last_closes;
use crate::indicators::{mean, population_std_dev};
use crate::Strategy;

/// Fades closes that pierce a Bollinger band.
///
/// Bands are `SMA ± band_width·σ` over the last `period` closes, with σ the
/// population standard deviation. A close above the upper band is a SHORT,
/// below the lower band a LONG; weight is the distance outside the band and
/// confidence that distance over `2σ`.
#[derive(Debug, Clone)]
pub struct BollingerReversion {
    pub period: usize,
    /// Band distance in σ. Confidence is scaled by a fixed `2σ` regardless.
    pub band_width: f64,
}

impl Default for BollingerReversion {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl BollingerReversion {
    pub fn new(period: usize, band_width: f64) -> Self {
        Self { period, band_width }
    }
}

impl Strategy for BollingerReversion {
    fn name(&self) -> &'static str {
        "bollinger"
    }

    fn min_candles(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Signal {
        if self.period == 0 || candles.len() < self.period {
            return Signal::neutral();
        }

        let closes = last_closes(candles, self.period);
        let Some(sma) = mean(&closes) else {
            return Signal::neutral();
        };
        let Some(std) = population_std_dev(&closes, sma) else {
            return Signal::neutral();
        };
        // Flat window: bands collapse onto the mean.
        if std == 0.0 {
            return Signal::neutral();
        }

        let upper = sma + self.band_width * std;
        let lower = sma - self.band_width * std;
        let last = closes[closes.len() - 1];

        if last > upper {
            let excess = last - upper;
            Signal::short(excess, (excess / (2.0 * std)).min(1.0))
        } else if last < lower {
            let excess = lower - last;
            Signal::long(excess, (excess / (2.0 * std)).min(1.0))
        } else {
            Signal::neutral()
        }
    }
}
