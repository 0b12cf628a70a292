use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use common::Result;

/// Top-level strategy config file (TOML).
///
/// Example `config/strategies.toml`:
/// ```toml
/// [[strategy]]
/// type = "mean_reversion"
/// name = "BTC z-score 20"
/// pair = "BTCUSDT"
///
/// [strategy.params]
/// lookback_period = 20
/// deviation_threshold = 1.5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyFileConfig {
    #[serde(rename = "strategy")]
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Analyzer type identifier, e.g. "bollinger" or "candlestick".
    #[serde(rename = "type")]
    pub strategy_type: String,
    /// Human-readable name shown in logs and output.
    pub name: String,
    /// Trading pair, e.g. "BTCUSDT".
    pub pair: String,
    /// Analyzer-specific parameters. Omitted keys take the analyzer defaults.
    #[serde(default)]
    pub params: HashMap<String, toml::Value>,
}

impl StrategyFileConfig {
    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Unique pairs referenced by the file, in first-seen order.
    pub fn pairs(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.strategies
            .iter()
            .filter(|s| seen.insert(s.pair.clone()))
            .map(|s| s.pair.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[strategy]]
        type = "bollinger"
        name = "BTC bands"
        pair = "BTCUSDT"

        [[strategy]]
        type = "momentum"
        name = "ETH momentum"
        pair = "ETHUSDT"

        [strategy.params]
        lookback_period = 8

        [[strategy]]
        type = "candlestick"
        name = "BTC candles"
        pair = "BTCUSDT"
    "#;

    #[test]
    fn parses_entries_and_params() {
        let cfg = StrategyFileConfig::parse(SAMPLE).unwrap();
        assert_eq!(cfg.strategies.len(), 3);
        assert_eq!(cfg.strategies[0].strategy_type, "bollinger");
        assert!(cfg.strategies[0].params.is_empty());
        assert_eq!(
            cfg.strategies[1].params.get("lookback_period").and_then(|v| v.as_integer()),
            Some(8)
        );
    }

    #[test]
    fn pairs_are_deduplicated_in_order() {
        let cfg = StrategyFileConfig::parse(SAMPLE).unwrap();
        assert_eq!(cfg.pairs(), vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()]);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(StrategyFileConfig::parse("[[strategy]]\ntype = 3").is_err());
    }
}
