use chrono::{DateTime, Duration, Utc};
use common::Candle;

/// Bar with explicit OHLC, volume 100 and balanced taker flow.
pub fn ohlc(open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle {
        start_time: DateTime::from_timestamp(0, 0).unwrap(),
        open,
        close,
        high,
        low,
        base_volume: 100.0,
        quote_volume: 100.0 * close,
        taker_buy_base_volume: 50.0,
        taker_buy_quote_volume: 50.0 * close,
        number_of_trades: 10,
    }
}

/// Doji-shaped bar at `price` with no wicks.
pub fn flat(price: f64) -> Candle {
    ohlc(price, price, price, price)
}

/// Bar whose body opens and closes at `close` with a one-unit range around it.
pub fn at_close(close: f64) -> Candle {
    ohlc(close, close + 0.5, close - 0.5, close)
}

/// Bar with chosen base volume and taker-buy fraction.
pub fn with_volume(mut candle: Candle, volume: f64, buy_fraction: f64) -> Candle {
    candle.base_volume = volume;
    candle.taker_buy_base_volume = volume * buy_fraction;
    candle.quote_volume = volume * candle.close;
    candle.taker_buy_quote_volume = candle.taker_buy_base_volume * candle.close;
    candle
}

/// Assign one-minute start times, oldest first.
pub fn timestamped(mut candles: Vec<Candle>) -> Vec<Candle> {
    let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    for (i, c) in candles.iter_mut().enumerate() {
        c.start_time = base + Duration::minutes(i as i64);
    }
    candles
}

/// Series of bars closing at each of `closes`.
pub fn closes(closes: &[f64]) -> Vec<Candle> {
    timestamped(closes.iter().map(|&c| at_close(c)).collect())
}
