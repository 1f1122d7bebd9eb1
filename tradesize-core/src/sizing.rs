//! Position sizing engine: lots required to realize a target profit.
//!
//! The engine is a set of pure functions. Nothing is cached: the front-ends
//! call [`compute_both`] on every render and always see the current inputs.
//!
//! # Responsibilities
//! - Measure the directional gap (close vs low for LONG, close vs high for SHORT)
//! - Convert the gap into a dollar value per lot
//! - Divide the target profit by that value
//!
//! # Non-Responsibilities
//! - No input validation: an inconsistent candle is still sized
//! - No rounding: formatting helpers exist for display only

use serde::Serialize;

use crate::domain::{CandleData, Instrument, TradeDirection};

/// Human-readable form of the sizing formula, shown under the result cards.
pub const FORMULA: &str = "Lots = Target ($) / ( |Close - Reference| * Lot Size )";

/// Sizing output for one direction.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CalculationResult {
    pub direction: TradeDirection,
    /// Absolute price gap between close and the direction's reference.
    pub points_captured: f64,
    /// Dollar value of that gap for a single lot.
    pub value_per_lot: f64,
    /// Lots needed to reach the target. Always finite and never negative
    /// for a non-negative target.
    pub required_lots: f64,
}

impl CalculationResult {
    pub fn is_active(&self, candle: &CandleData) -> bool {
        self.direction.is_active(candle)
    }
}

/// Compute the lot count for one direction.
///
/// Returns `required_lots == 0.0` when the gap or the lot size is zero,
/// and whenever the quotient would not be a finite number.
pub fn compute_required_lots(
    direction: TradeDirection,
    candle: &CandleData,
    instrument: &Instrument,
    target_profit: f64,
) -> CalculationResult {
    let points_captured = (candle.close - direction.reference_price(candle)).abs();
    let value_per_lot = points_captured * instrument.lot_size;

    let required_lots = if value_per_lot > 0.0 {
        let lots = target_profit / value_per_lot;
        if lots.is_finite() {
            lots
        } else {
            0.0
        }
    } else {
        0.0
    };

    CalculationResult { direction, points_captured, value_per_lot, required_lots }
}

/// Both cards, LONG first.
pub fn compute_both(
    candle: &CandleData,
    instrument: &Instrument,
    target_profit: f64,
) -> [CalculationResult; 2] {
    TradeDirection::ALL.map(|d| compute_required_lots(d, candle, instrument, target_profit))
}

pub fn format_lots(lots: f64) -> String {
    format!("{lots:.2}")
}

pub fn format_points(points: f64) -> String {
    format!("{points:.2}")
}

pub fn format_value_per_lot(value: f64) -> String {
    format!("{value:.4}")
}

/// One-line explanation printed on each card.
pub fn profit_sentence(result: &CalculationResult, target_profit: f64) -> String {
    format!(
        "If price moves {} pts, this size yields ${}.",
        format_points(result.points_captured),
        target_profit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eth() -> Instrument {
        Instrument::new("eth", "ETH Futures", 0.01)
    }

    #[test]
    fn reference_example_long() {
        let r = compute_required_lots(TradeDirection::Long, &CandleData::default(), &eth(), 1.0);
        assert!((r.points_captured - 15.0).abs() < 1e-9);
        assert!((r.value_per_lot - 0.15).abs() < 1e-9);
        assert_eq!(format_lots(r.required_lots), "6.67");
    }

    #[test]
    fn reference_example_short() {
        let r = compute_required_lots(TradeDirection::Short, &CandleData::default(), &eth(), 1.0);
        assert!((r.points_captured - 5.0).abs() < 1e-9);
        assert!((r.value_per_lot - 0.05).abs() < 1e-9);
        assert!((r.required_lots - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_gap_yields_zero_lots() {
        let candle = CandleData::new(2990.0, 3000.0, 2995.0, 2995.0);
        let r = compute_required_lots(TradeDirection::Long, &candle, &eth(), 100.0);
        assert_eq!(r.points_captured, 0.0);
        assert_eq!(r.required_lots, 0.0);
    }

    #[test]
    fn zero_lot_size_yields_zero_lots() {
        let inst = Instrument::new("z", "Zero", 0.0);
        let r = compute_required_lots(TradeDirection::Short, &CandleData::default(), &inst, 5.0);
        assert_eq!(r.value_per_lot, 0.0);
        assert_eq!(r.required_lots, 0.0);
    }

    #[test]
    fn overflowing_quotient_yields_zero() {
        let candle = CandleData::new(0.0, 1e-200, 0.0, 1e-200);
        let inst = Instrument::new("t", "Tiny", 1e-100);
        let r = compute_required_lots(TradeDirection::Long, &candle, &inst, 1e10);
        assert_eq!(r.required_lots, 0.0);
    }

    #[test]
    fn inconsistent_candle_is_still_sized() {
        let candle = CandleData::new(2990.0, 3000.0, 2980.0, 3010.0);
        let r = compute_required_lots(TradeDirection::Short, &candle, &eth(), 1.0);
        assert!((r.points_captured - 10.0).abs() < 1e-9);
        assert!(r.required_lots > 0.0);
    }

    #[test]
    fn compute_both_is_long_then_short() {
        let [long, short] = compute_both(&CandleData::default(), &eth(), 1.0);
        assert_eq!(long.direction, TradeDirection::Long);
        assert_eq!(short.direction, TradeDirection::Short);
        assert!(long.is_active(&CandleData::default()));
        assert!(!short.is_active(&CandleData::default()));
    }

    #[test]
    fn display_formatting() {
        assert_eq!(format_points(15.0), "15.00");
        assert_eq!(format_value_per_lot(0.15), "0.1500");
        let r = compute_required_lots(TradeDirection::Long, &CandleData::default(), &eth(), 1.0);
        assert_eq!(profit_sentence(&r, 1.0), "If price moves 15.00 pts, this size yields $1.");
    }
}
