//! Candle data store: the four prices currently on the form.

use crate::domain::{parse_number, CandleData, CandleField};

/// Shown by the front-ends while `is_inconsistent` holds. Never blocks sizing.
pub const INCONSISTENT_WARNING: &str =
    "Warning: Open or Close price is outside the High/Low range. Please check inputs.";

/// Holds the current candle and the value `reset` returns to.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleStore {
    current: CandleData,
    initial: CandleData,
}

impl Default for CandleStore {
    fn default() -> Self {
        Self::new(CandleData::default())
    }
}

impl CandleStore {
    pub fn new(initial: CandleData) -> Self {
        Self { current: initial, initial }
    }

    pub fn current(&self) -> &CandleData {
        &self.current
    }

    /// Parse `raw` and store it in `field`. Unparseable input stores `0.0`;
    /// the previous value is never kept.
    pub fn set_field(&mut self, field: CandleField, raw: &str) -> f64 {
        let value = parse_number(raw);
        self.current.set(field, value);
        value
    }

    /// Store an already-numeric value. Non-finite values are stored as `0.0`.
    pub fn set(&mut self, field: CandleField, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        self.current.set(field, value);
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    pub fn is_inconsistent(&self) -> bool {
        self.current.is_inconsistent()
    }
}
