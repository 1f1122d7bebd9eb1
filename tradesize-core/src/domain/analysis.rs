//! Advisory analysis types, shaped exactly like the service's JSON response.

use serde::{Deserialize, Serialize};

use super::direction::TradeDirection;

/// Suggested levels for one direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiStrategy {
    pub entry_price: f64,
    pub stop_loss_price: f64,
    pub target_price: f64,
    /// Likelihood score in `[0, 100]`.
    pub probability: f64,
}

impl AiStrategy {
    /// Range sanity: all prices finite, probability within `[0, 100]`.
    pub fn check_ranges(&self) -> Result<(), String> {
        let prices = [
            ("entryPrice", self.entry_price),
            ("stopLossPrice", self.stop_loss_price),
            ("targetPrice", self.target_price),
        ];
        for (name, value) in prices {
            if !value.is_finite() {
                return Err(format!("{name} is not finite"));
            }
        }
        if !(0.0..=100.0).contains(&self.probability) {
            return Err(format!("probability {} outside [0, 100]", self.probability));
        }
        Ok(())
    }
}

/// A complete advisory answer. Every field is required on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub bias: String,
    pub reasoning: String,
    pub long_strategy: AiStrategy,
    pub short_strategy: AiStrategy,
}

impl AiAnalysis {
    pub fn strategy(&self, direction: TradeDirection) -> &AiStrategy {
        match direction {
            TradeDirection::Long => &self.long_strategy,
            TradeDirection::Short => &self.short_strategy,
        }
    }

    pub fn check_ranges(&self) -> Result<(), String> {
        self.long_strategy
            .check_ranges()
            .map_err(|e| format!("longStrategy: {e}"))?;
        self.short_strategy
            .check_ranges()
            .map_err(|e| format!("shortStrategy: {e}"))
    }

    pub fn bias_kind(&self) -> Bias {
        Bias::classify(&self.bias)
    }
}

/// Coarse reading of the free-form bias label, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    pub fn classify(label: &str) -> Self {
        let lower = label.to_ascii_lowercase();
        if lower.contains("bull") {
            Bias::Bullish
        } else if lower.contains("bear") {
            Bias::Bearish
        } else {
            Bias::Neutral
        }
    }
}
