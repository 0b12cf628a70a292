use common::{Candle, Direction, Signal};

use crate::Strategy;

const ENGULFING_CONFIDENCE: f64 = 0.75;
const THREE_CANDLE_CONFIDENCE: f64 = 0.8;
const STAR_CONFIDENCE: f64 = 0.7;
const MARUBOZU_CONFIDENCE: f64 = 0.7;
const HAMMER_CONFIDENCE: f64 = 0.6;
const DOJI_CONFIDENCE: f64 = 0.4;
const CONTEXT_CONFIDENCE: f64 = 0.4;

/// Named candlestick shapes recognized on the last three bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    BullishEngulfing,
    BearishEngulfing,
    ThreeWhiteSoldiers,
    ThreeBlackCrows,
    MorningStar,
    EveningStar,
    Marubozu,
    Hammer,
    ShootingStar,
    DragonflyDoji,
    GravestoneDoji,
    BullishReversal,
    BearishReversal,
}

/// A recognized pattern and the signal it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternMatch {
    pub pattern: Pattern,
    pub signal: Signal,
}

impl PatternMatch {
    fn new(pattern: Pattern, direction: Direction, weight: f64, confidence: f64) -> Self {
        Self {
            pattern,
            signal: Signal::new(direction, weight, confidence),
        }
    }
}

/// Candlestick pattern recognizer.
///
/// Three-candle and two-candle patterns take priority over single-candle
/// shapes on the latest bar; within each group the first match wins.
#[derive(Debug, Clone, Default)]
pub struct CandlestickPatterns;

impl CandlestickPatterns {
    pub fn new() -> Self {
        Self
    }

    /// Identify the highest-priority pattern on the tail of `candles`.
    /// A plain doji or an unshaped bar yields `None`.
    pub fn recognize(&self, candles: &[Candle]) -> Option<PatternMatch> {
        let [.., c1, c2, c3] = candles else {
            return None;
        };
        if c3.range() == 0.0 {
            return None;
        }
        multi_candle(c1, c2, c3).or_else(|| single_candle(c3, c2))
    }
}

impl Strategy for CandlestickPatterns {
    fn name(&self) -> &'static str {
        "candlestick"
    }

    fn min_candles(&self) -> usize {
        3
    }

    fn evaluate(&self, candles: &[Candle]) -> Signal {
        self.recognize(candles)
            .map(|m| m.signal)
            .unwrap_or_else(Signal::neutral)
    }
}

fn multi_candle(c1: &Candle, c2: &Candle, c3: &Candle) -> Option<PatternMatch> {
    use Direction::{Long, Short};

    if c2.is_bearish() && c3.is_bullish() && c3.open <= c2.close && c3.close >= c2.open {
        return Some(PatternMatch::new(
            Pattern::BullishEngulfing,
            Long,
            c3.body_size(),
            ENGULFING_CONFIDENCE,
        ));
    }
    if c2.is_bullish() && c3.is_bearish() && c3.open >= c2.close && c3.close <= c2.open {
        return Some(PatternMatch::new(
            Pattern::BearishEngulfing,
            Short,
            c3.body_size(),
            ENGULFING_CONFIDENCE,
        ));
    }

    if c1.is_bullish()
        && c2.is_bullish()
        && c3.is_bullish()
        && c3.close > c2.close
        && c2.close > c1.close
    {
        return Some(PatternMatch::new(
            Pattern::ThreeWhiteSoldiers,
            Long,
            c3.close - c1.open,
            THREE_CANDLE_CONFIDENCE,
        ));
    }
    if c1.is_bearish()
        && c2.is_bearish()
        && c3.is_bearish()
        && c3.close < c2.close
        && c2.close < c1.close
    {
        return Some(PatternMatch::new(
            Pattern::ThreeBlackCrows,
            Short,
            c1.open - c3.close,
            THREE_CANDLE_CONFIDENCE,
        ));
    }

    let c1_mid = (c1.open + c1.close) / 2.0;
    if c1.is_bearish() && has_small_body(c2) && c3.is_bullish() && c3.close > c1_mid {
        return Some(PatternMatch::new(
            Pattern::MorningStar,
            Long,
            c3.body_size(),
            STAR_CONFIDENCE,
        ));
    }
    if c1.is_bullish() && has_small_body(c2) && c3.is_bearish() && c3.close < c1_mid {
        return Some(PatternMatch::new(
            Pattern::EveningStar,
            Short,
            c3.body_size(),
            STAR_CONFIDENCE,
        ));
    }

    None
}

fn single_candle(latest: &Candle, previous: &Candle) -> Option<PatternMatch> {
    use Direction::{Long, Short};

    let range = latest.range();
    let body = latest.body_size();
    let upper = latest.upper_wick();
    let lower = latest.lower_wick();
    let body_ratio = body / range;

    if body_ratio > 0.85 {
        let direction = if latest.is_bullish() { Long } else { Short };
        return Some(PatternMatch::new(
            Pattern::Marubozu,
            direction,
            body,
            MARUBOZU_CONFIDENCE,
        ));
    }

    if lower > body * 2.5 && upper < body * 0.5 {
        return Some(PatternMatch::new(Pattern::Hammer, Long, lower, HAMMER_CONFIDENCE));
    }
    if upper > body * 2.5 && lower < body * 0.5 {
        return Some(PatternMatch::new(
            Pattern::ShootingStar,
            Short,
            upper,
            HAMMER_CONFIDENCE,
        ));
    }

    if body_ratio < 0.15 {
        if lower > range * 0.6 {
            return Some(PatternMatch::new(
                Pattern::DragonflyDoji,
                Long,
                lower,
                DOJI_CONFIDENCE,
            ));
        }
        if upper > range * 0.6 {
            return Some(PatternMatch::new(
                Pattern::GravestoneDoji,
                Short,
                upper,
                DOJI_CONFIDENCE,
            ));
        }
        // Standard doji: indecision.
        return None;
    }

    if body_ratio > 0.5 {
        if latest.is_bullish() && previous.is_bearish() {
            return Some(PatternMatch::new(
                Pattern::BullishReversal,
                Long,
                body,
                CONTEXT_CONFIDENCE,
            ));
        }
        if latest.is_bearish() && previous.is_bullish() {
            return Some(PatternMatch::new(
                Pattern::BearishReversal,
                Short,
                body,
                CONTEXT_CONFIDENCE,
            ));
        }
    }

    None
}

/// Body under 30% of the range; a zero-range bar counts as small.
fn has_small_body(candle: &Candle) -> bool {
    let range = candle.range();
    if range == 0.0 {
        return true;
    }
    candle.body_size() / range < 0.3
}
