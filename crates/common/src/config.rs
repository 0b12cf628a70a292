use crate::{Error, Result};

/// Process configuration loaded once from environment variables at startup
/// and passed explicitly to whatever needs it.
#[derive(Debug, Clone)]
pub struct Config {
    // Data
    pub candles_path: String,
    pub pair: String,

    // Strategy config file path
    pub strategy_config_path: String,

    // Logging
    pub log_filter: String,
    pub log_color: bool,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Fails on any missing required variable.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_color = match lookup("LOG_COLOR") {
            None => true,
            Some(v) => parse_bool("LOG_COLOR", &v)?,
        };

        Ok(Config {
            candles_path: lookup("CANDLES_PATH").ok_or_else(|| {
                Error::Config(
                    "Required environment variable 'CANDLES_PATH' is not set. Check your .env file."
                        .to_string(),
                )
            })?,
            pair: lookup("PAIR").unwrap_or_else(|| "BTCUSDT".to_string()),
            strategy_config_path: lookup("STRATEGY_CONFIG_PATH")
                .unwrap_or_else(|| "config/strategies.toml".to_string()),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_color,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(Error::Config(format!(
            "{key} must be 'true' or 'false', got: '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_is_set() {
        let cfg = Config::from_lookup(lookup(&[("CANDLES_PATH", "data/btc.json")])).unwrap();
        assert_eq!(cfg.candles_path, "data/btc.json");
        assert_eq!(cfg.pair, "BTCUSDT");
        assert_eq!(cfg.strategy_config_path, "config/strategies.toml");
        assert_eq!(cfg.log_filter, "info");
        assert!(cfg.log_color);
    }

    #[test]
    fn missing_candles_path_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn log_color_parses_and_rejects_garbage() {
        let cfg = Config::from_lookup(lookup(&[
            ("CANDLES_PATH", "c.json"),
            ("LOG_COLOR", "FALSE"),
            ("RUST_LOG", "strategy=debug"),
            ("PAIR", "ETHUSDT"),
        ]))
        .unwrap();
        assert!(!cfg.log_color);
        assert_eq!(cfg.log_filter, "strategy=debug");
        assert_eq!(cfg.pair, "ETHUSDT");

        let err = Config::from_lookup(lookup(&[("CANDLES_PATH", "c.json"), ("LOG_COLOR", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
