/// Exponential moving average over the last `period` values of `data`.
///
/// Seeded with the first value of that window, then blended forward with
/// `k = 2 / (period + 1)`. Returns `None` when `period` is zero or the data
/// is shorter than `period`.
pub fn ema(data: &[f64], period: usize) -> Option<f64> {
    if period == 0 || data.len() < period {
        return None;
    }
    let k = 2.0 / (period as f64 + 1.0);
    let window = &data[data.len() - period..];

    let mut ema_val = window[0];
    for &price in &window[1..] {
        ema_val = price * k + ema_val * (1.0 - k);
    }
    Some(ema_val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_returns_none_with_insufficient_data() {
        assert!(ema(&[1.0, 2.0], 3).is_none());
        assert!(ema(&[1.0, 2.0], 0).is_none());
    }

    #[test]
    fn ema_of_constant_series_is_the_constant() {
        let prices = vec![42.0; 30];
        assert_eq!(ema(&prices, 9), Some(42.0));
    }

    #[test]
    fn ema_seeds_from_window_start() {
        // period 3 → k = 0.5; window [2, 4, 8]: 2 → 3 → 5.5
        let prices = [100.0, 2.0, 4.0, 8.0];
        assert_eq!(ema(&prices, 3), Some(5.5));
    }

    #[test]
    fn shorter_period_tracks_uptrend_closer() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let fast = ema(&prices, 9).unwrap();
        let slow = ema(&prices, 21).unwrap();
        assert!(fast > slow, "fast {fast} should exceed slow {slow}");
    }
}
