pub mod analyzers;
pub mod config;
pub mod indicators;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use analyzers::{
    BollingerReversion, CandlestickPatterns, EmaTrend, MeanReversion, PriceMomentum,
    VolumeBreakout, VolumePressure,
};
pub use config::{StrategyConfig, StrategyFileConfig};
pub use registry::{StrategyRegistry, StrategySignal};

use common::{Candle, Signal};

/// All analyzer implementations must satisfy this trait.
///
/// Implementations are pure: they must not mutate the input, must return the
/// same output for the same input, and must never fail. Insufficient or
/// degenerate history maps to [`Signal::neutral`].
pub trait Strategy: Send + Sync {
    /// Analyzer kind identifier (e.g. "bollinger").
    fn name(&self) -> &'static str;

    /// Fewest candles needed before the analyzer can form an opinion.
    fn min_candles(&self) -> usize;

    /// Map an oldest-first candle history to a signal.
    fn evaluate(&self, candles: &[Candle]) -> Signal;
}
