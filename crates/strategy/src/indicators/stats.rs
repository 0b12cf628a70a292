use common::Candle;

/// Arithmetic mean. Returns `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N, not N-1) around a known mean.
pub fn population_std_dev(values: &[f64], mean: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / values.len() as f64).sqrt())
}

/// Mean base-asset volume over every candle except the most recent one.
pub fn average_volume(candles: &[Candle]) -> Option<f64> {
    let (_, history) = candles.split_last()?;
    let volumes: Vec<f64> = history.iter().map(|c| c.base_volume).collect();
    mean(&volumes)
}
