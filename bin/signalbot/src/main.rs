use std::io::Write;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{CandleSource, Config, JsonFileSource};
use strategy::{StrategyFileConfig, StrategyRegistry};

fn main() -> anyhow::Result<()> {
    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env()?;

    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cfg.log_filter)
                .with_context(|| format!("invalid log filter '{}'", cfg.log_filter))?,
        )
        .with_ansi(cfg.log_color)
        .with_writer(std::io::stderr)
        .init();
    info!(pair = %cfg.pair, "SignalBot starting");

    // ── Strategy registry ─────────────────────────────────────────────────────
    let strategy_file = StrategyFileConfig::load(&cfg.strategy_config_path).with_context(|| {
        format!("failed to load strategy config at '{}'", cfg.strategy_config_path)
    })?;
    if !strategy_file.pairs().contains(&cfg.pair) {
        warn!(pair = %cfg.pair, "No strategies configured for pair");
    }
    let registry = StrategyRegistry::from_config(&strategy_file)?;

    // ── Candle source ─────────────────────────────────────────────────────────
    let source = JsonFileSource::new(cfg.pair.clone(), cfg.candles_path.clone());

    let stdout = std::io::stdout();
    let emitted = run_once(&registry, &source, &mut stdout.lock())?;
    info!(emitted, "Evaluation complete");
    Ok(())
}

/// Pull one snapshot, evaluate every strategy configured for the source's
/// pair, and write each result as a JSON line. Returns the number written.
fn run_once(
    registry: &StrategyRegistry,
    source: &dyn CandleSource,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let candles = source
        .pull()
        .with_context(|| format!("failed to pull candles for {}", source.pair()))?;
    info!(pair = %source.pair(), count = candles.len(), "Pulled candles");

    let results = registry.evaluate(source.pair(), &candles);
    for result in &results {
        if !result.signal.is_neutral() {
            info!(
                name = %result.name,
                direction = %result.signal.direction,
                confidence = result.signal.confidence,
                "Signal"
            );
        }
        serde_json::to_writer(&mut *out, result)?;
        writeln!(out)?;
    }
    Ok(results.len())
}
