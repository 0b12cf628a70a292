use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, trace};

use common::{Candle, Error, Result, Signal};

use crate::analyzers::{
    BollingerReversion, CandlestickPatterns, EmaTrend, MeanReversion, PriceMomentum,
    VolumeBreakout, VolumePressure,
};
use crate::config::{StrategyConfig, StrategyFileConfig};
use crate::Strategy;

/// One analyzer's verdict on a candle snapshot, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySignal {
    pub name: String,
    pub pair: String,
    pub kind: &'static str,
    #[serde(flatten)]
    pub signal: Signal,
}

struct RegisteredStrategy {
    name: String,
    pair: String,
    strategy: Box<dyn Strategy>,
}

/// Holds all configured analyzer instances and evaluates them over candle
/// snapshots. The registry keeps no candle history of its own.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<RegisteredStrategy>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from config. Fails on unknown strategy types or
    /// invalid parameters.
    pub fn from_config(file_cfg: &StrategyFileConfig) -> Result<Self> {
        let mut registry = Self::new();
        for cfg in &file_cfg.strategies {
            let strategy = build_strategy(cfg)?;
            registry.register(cfg.name.clone(), cfg.pair.clone(), strategy);
        }
        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        pair: impl Into<String>,
        strategy: Box<dyn Strategy>,
    ) {
        let entry = RegisteredStrategy {
            name: name.into(),
            pair: pair.into(),
            strategy,
        };
        info!(
            name = %entry.name,
            pair = %entry.pair,
            kind = entry.strategy.name(),
            "Registered strategy"
        );
        self.strategies.push(entry);
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Evaluate every strategy configured for `pair` against one snapshot.
    /// Returns one entry per matching strategy, in registration order.
    pub fn evaluate(&self, pair: &str, candles: &[Candle]) -> Vec<StrategySignal> {
        self.strategies
            .iter()
            .filter(|s| s.pair == pair)
            .map(|s| {
                if candles.len() < s.strategy.min_candles() {
                    trace!(
                        name = %s.name,
                        have = candles.len(),
                        need = s.strategy.min_candles(),
                        "Insufficient history"
                    );
                }
                let signal = s.strategy.evaluate(candles);
                debug!(
                    name = %s.name,
                    pair = %s.pair,
                    direction = %signal.direction,
                    weight = signal.weight,
                    confidence = signal.confidence,
                    "Strategy evaluated"
                );
                StrategySignal {
                    name: s.name.clone(),
                    pair: s.pair.clone(),
                    kind: s.strategy.name(),
                    signal,
                }
            })
            .collect()
    }
}

// ─── Strategy builders ────────────────────────────────────────────────────────

fn build_strategy(cfg: &StrategyConfig) -> Result<Box<dyn Strategy>> {
    let p = &cfg.params;
    let strategy: Box<dyn Strategy> = match cfg.strategy_type.as_str() {
        "bollinger" => {
            let period = positive_usize(p, "period", 20)?;
            let band_width = positive_f64(p, "band_width", 2.0)?;
            Box::new(BollingerReversion::new(period, band_width))
        }
        "ema_trend" => {
            let fast = positive_usize(p, "fast", 9)?;
            let slow = positive_usize(p, "slow", 21)?;
            if fast >= slow {
                return Err(Error::Config(format!(
                    "strategy '{}': fast period {fast} must be less than slow period {slow}",
                    cfg.name
                )));
            }
            Box::new(EmaTrend::new(fast, slow))
        }
        "mean_reversion" => {
            let lookback = positive_usize(p, "lookback_period", 20)?;
            let threshold = positive_f64(p, "deviation_threshold", 1.5)?;
            Box::new(MeanReversion::new(lookback, threshold))
        }
        "momentum" => {
            let lookback = positive_usize(p, "lookback_period", 5)?;
            if lookback < 2 {
                return Err(Error::Config(format!(
                    "strategy '{}': lookback_period must be at least 2",
                    cfg.name
                )));
            }
            Box::new(PriceMomentum::new(lookback))
        }
        "volume_pressure" => {
            let volume_threshold = positive_f64(p, "volume_threshold", 1.5)?;
            let pressure_threshold = positive_f64(p, "pressure_threshold", 0.6)?;
            let lookback_min = positive_usize(p, "lookback_min", 10)?;
            Box::new(
                VolumePressure::new(volume_threshold, pressure_threshold)
                    .with_lookback_min(lookback_min),
            )
        }
        "volume_breakout" => {
            let lookback_min = positive_usize(p, "lookback_min", 15)?;
            let surge_factor = positive_f64(p, "surge_factor", 1.8)?;
            Box::new(VolumeBreakout::new(lookback_min, surge_factor))
        }
        "candlestick" => Box::new(CandlestickPatterns::new()),
        other => return Err(Error::UnknownStrategy(other.to_string())),
    };
    Ok(strategy)
}

fn positive_f64(params: &HashMap<String, toml::Value>, key: &str, default: f64) -> Result<f64> {
    let value = match params.get(key) {
        None => return Ok(default),
        Some(v) => v
            .as_float()
            .or_else(|| v.as_integer().map(|i| i as f64))
            .ok_or_else(|| Error::Config(format!("parameter '{key}' must be a number")))?,
    };
    if !(value.is_finite() && value > 0.0) {
        return Err(Error::Config(format!(
            "parameter '{key}' must be positive, got {value}"
        )));
    }
    Ok(value)
}

fn positive_usize(
    params: &HashMap<String, toml::Value>,
    key: &str,
    default: usize,
) -> Result<usize> {
    let value = match params.get(key) {
        None => return Ok(default),
        Some(v) => v
            .as_integer()
            .ok_or_else(|| Error::Config(format!("parameter '{key}' must be an integer")))?,
    };
    if value <= 0 {
        return Err(Error::Config(format!(
            "parameter '{key}' must be positive, got {value}"
        )));
    }
    usize::try_from(value)
        .map_err(|_| Error::Config(format!("parameter '{key}' out of range: {value}")))
}
