use std::path::PathBuf;

use tracing::debug;

use crate::{Candle, Error, Result};

/// Upstream supplier of candle snapshots for one instrument.
///
/// Each `pull` returns the full chronological history the source currently
/// holds (oldest first). Analyzers never request more than they are given.
pub trait CandleSource: Send + Sync {
    /// The trading pair this source serves (e.g. "BTCUSDT").
    fn pair(&self) -> &str;

    /// Fetch the latest ordered candle snapshot.
    fn pull(&self) -> Result<Vec<Candle>>;
}

/// Reads a JSON array of candles from disk on every pull.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pair: String,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(pair: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            pair: pair.into(),
            path: path.into(),
        }
    }

    /// Parse and check a JSON candle array: every candle must satisfy its
    /// invariants and start times must be non-decreasing.
    pub fn parse(content: &str) -> Result<Vec<Candle>> {
        let candles: Vec<Candle> = serde_json::from_str(content)?;
        for candle in &candles {
            candle.validate()?;
        }
        if let Some(w) = candles.windows(2).find(|w| w[1].start_time < w[0].start_time) {
            return Err(Error::InvalidCandle(format!(
                "candles out of order: {} follows {}",
                w[1].start_time, w[0].start_time
            )));
        }
        Ok(candles)
    }
}

impl CandleSource for JsonFileSource {
    fn pair(&self) -> &str {
        &self.pair
    }

    fn pull(&self) -> Result<Vec<Candle>> {
        let content = std::fs::read_to_string(&self.path)?;
        let candles = Self::parse(&content)?;
        debug!(pair = %self.pair, path = %self.path.display(), count = candles.len(), "Loaded candles");
        Ok(candles)
    }
}
