use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One completed kline (OHLCV bar) for a single instrument.
///
/// Candles are held oldest-first; every lookback window in the analyzers is
/// "the last N entries" of such a slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Interval start, encoded as epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    /// Base asset volume traded in the interval.
    pub base_volume: f64,
    pub quote_volume: f64,
    pub taker_buy_base_volume: f64,
    pub taker_buy_quote_volume: f64,
    pub number_of_trades: u64,
}

impl Candle {
    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    pub fn is_doji(&self) -> bool {
        self.close == self.open
    }

    pub fn price_change(&self) -> f64 {
        self.close - self.open
    }

    /// Open-to-close change in percent. Zero when `open` is zero.
    pub fn price_change_percent(&self) -> f64 {
        if self.open == 0.0 {
            return 0.0;
        }
        (self.close - self.open) / self.open * 100.0
    }

    /// Fraction of base volume initiated by taker buys. Zero on an empty bar.
    pub fn buy_pressure(&self) -> f64 {
        if self.base_volume == 0.0 {
            return 0.0;
        }
        self.taker_buy_base_volume / self.base_volume
    }

    pub fn sell_pressure(&self) -> f64 {
        1.0 - self.buy_pressure()
    }

    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// HLCC/4.
    pub fn weighted_close(&self) -> f64 {
        (self.high + self.low + self.close * 2.0) / 4.0
    }

    /// Quote-over-base volume approximation of VWAP. Zero on an empty bar.
    pub fn vwap(&self) -> f64 {
        if self.base_volume == 0.0 {
            return 0.0;
        }
        self.quote_volume / self.base_volume
    }

    /// Check the OHLCV invariants. Called by data sources at ingestion;
    /// analyzers never fail on bad input.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.open,
            self.close,
            self.high,
            self.low,
            self.base_volume,
            self.quote_volume,
            self.taker_buy_base_volume,
            self.taker_buy_quote_volume,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidCandle(format!(
                "non-finite value in candle at {}",
                self.start_time
            )));
        }
        if self.high < self.open.max(self.close) {
            return Err(Error::InvalidCandle(format!(
                "high {} below body at {}",
                self.high, self.start_time
            )));
        }
        if self.low > self.open.min(self.close) {
            return Err(Error::InvalidCandle(format!(
                "low {} above body at {}",
                self.low, self.start_time
            )));
        }
        if values[4..].iter().any(|&v| v < 0.0) {
            return Err(Error::InvalidCandle(format!(
                "negative volume at {}",
                self.start_time
            )));
        }
        Ok(())
    }
}

/// Directional opinion carried by a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
    Flat,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
            Direction::Flat => write!(f, "FLAT"),
        }
    }
}

/// Output of a single analyzer evaluation.
///
/// `weight` is in the analyzer's own unit (price distance, raw volume or
/// percent) and is not comparable across analyzers. `kill` is reserved for
/// downstream risk logic; analyzers always leave it `false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub direction: Direction,
    pub weight: f64,
    pub confidence: f64,
    pub kill: bool,
}

impl Signal {
    /// Confidence is clamped into `[0, 1]`.
    pub fn new(direction: Direction, weight: f64, confidence: f64) -> Self {
        Self {
            direction,
            weight,
            confidence: confidence.clamp(0.0, 1.0),
            kill: false,
        }
    }

    pub fn long(weight: f64, confidence: f64) -> Self {
        Self::new(Direction::Long, weight, confidence)
    }

    pub fn short(weight: f64, confidence: f64) -> Self {
        Self::new(Direction::Short, weight, confidence)
    }

    /// "No opinion": flat, zero weight, zero confidence.
    pub const fn neutral() -> Self {
        Self {
            direction: Direction::Flat,
            weight: 0.0,
            confidence: 0.0,
            kill: false,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::neutral()
    }
}
