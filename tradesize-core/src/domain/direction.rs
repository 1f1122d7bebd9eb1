use serde::{Deserialize, Serialize};
use std::fmt;

use super::candle::CandleData;

/// Trade direction used for sizing and for picking an advisory strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
}

impl TradeDirection {
    pub const ALL: [TradeDirection; 2] = [TradeDirection::Long, TradeDirection::Short];

    pub fn label(self) -> &'static str {
        match self {
            TradeDirection::Long => "LONG",
            TradeDirection::Short => "SHORT",
        }
    }

    /// Price the directional gap is measured against: low for LONG, high for SHORT.
    pub fn reference_price(self, candle: &CandleData) -> f64 {
        match self {
            TradeDirection::Long => candle.low,
            TradeDirection::Short => candle.high,
        }
    }

    /// Whether the candle body points this way. A flat candle counts as LONG.
    pub fn is_active(self, candle: &CandleData) -> bool {
        match self {
            TradeDirection::Long => candle.close >= candle.open,
            TradeDirection::Short => candle.close < candle.open,
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_candle_is_long() {
        let c = CandleData::new(100.0, 110.0, 90.0, 100.0);
        assert!(TradeDirection::Long.is_active(&c));
        assert!(!TradeDirection::Short.is_active(&c));
    }

    #[test]
    fn exactly_one_direction_active() {
        for close in [95.0, 100.0, 105.0] {
            let c = CandleData::new(100.0, 110.0, 90.0, close);
            let active = TradeDirection::ALL.iter().filter(|d| d.is_active(&c)).count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn reference_prices() {
        let c = CandleData::default();
        assert_eq!(TradeDirection::Long.reference_price(&c), 2980.0);
        assert_eq!(TradeDirection::Short.reference_price(&c), 3000.0);
    }
}
