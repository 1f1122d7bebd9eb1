use serde::{Deserialize, Serialize};

/// One OHLC bar as typed by the user.
///
/// No ordering between the four prices is enforced. An inconsistent candle
/// is still sized; callers surface [`CandleData::is_inconsistent`] as a warning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CandleData {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Default for CandleData {
    fn default() -> Self {
        Self { open: 2990.0, high: 3000.0, low: 2980.0, close: 2995.0 }
    }
}

impl CandleData {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { open, high, low, close }
    }

    /// True when open or close lies strictly outside `[low, high]`.
    pub fn is_inconsistent(&self) -> bool {
        self.close > self.high
            || self.close < self.low
            || self.open > self.high
            || self.open < self.low
    }

    pub fn get(&self, field: CandleField) -> f64 {
        match field {
            CandleField::Open => self.open,
            CandleField::High => self.high,
            CandleField::Low => self.low,
            CandleField::Close => self.close,
        }
    }

    pub fn set(&mut self, field: CandleField, value: f64) {
        match field {
            CandleField::Open => self.open = value,
            CandleField::High => self.high = value,
            CandleField::Low => self.low = value,
            CandleField::Close => self.close = value,
        }
    }
}

/// Selector for one of the four candle prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandleField {
    Open,
    High,
    Low,
    Close,
}

impl CandleField {
    pub const ALL: [CandleField; 4] =
        [CandleField::Open, CandleField::High, CandleField::Low, CandleField::Close];

    pub fn label(self) -> &'static str {
        match self {
            CandleField::Open => "Open",
            CandleField::High => "High",
            CandleField::Low => "Low",
            CandleField::Close => "Close",
        }
    }
}

/// Lenient numeric parse for form input: anything unusable becomes `0.0`.
///
/// Covers empty text, garbage, and the textual `NaN`/`inf` forms that
/// `f64::from_str` would otherwise accept.
pub fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
