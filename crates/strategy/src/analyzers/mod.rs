//! The seven stateless analyzers. Each maps a candle history to a [`Signal`]
//! on its own; none shares state with another.
//!
//! [`Signal`]: common::Signal

pub mod bollinger;
pub mod candlestick;
pub mod ema_trend;
pub mod mean_reversion;
pub mod momentum;
pub mod volume_breakout;
pub mod volume_pressure;

pub use bollinger::BollingerReversion;
pub use candlestick::CandlestickPatterns;
pub use ema_trend::EmaTrend;
pub use mean_reversion::MeanReversion;
pub use momentum::PriceMomentum;
pub use volume_breakout::VolumeBreakout;
pub use volume_pressure::VolumePressure;

use common::Candle;

/// Closes of the last `n` candles, oldest first. Caller guarantees `n <= len`.
pub(crate) fn last_closes(candles: &[Candle], n: usize) -> Vec<f64> {
    candles[candles.len() - n..].iter().map(|c| c.close).collect()
}
