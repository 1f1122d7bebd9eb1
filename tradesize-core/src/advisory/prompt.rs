//! Prompt text and response schema for candle-structure analysis.

use serde_json::{json, Value};

use crate::domain::{CandleData, Instrument};

/// Build the analysis prompt for one instrument and candle.
pub fn build_prompt(instrument: &Instrument, candle: &CandleData) -> String {
    format!(
        "Analyze this market data for {name}:\n\
         Open: {open}\n\
         High: {high}\n\
         Low: {low}\n\
         Close: {close}\n\
         \n\
         Provide a trading analysis with specific price levels for BOTH Long and Short scenarios.\n\
         Consider the candle color (Green if Close > Open, Red if Close < Open) and the wicks for rejection.\n\
         \n\
         1. Determine immediate bias (Bullish/Bearish/Neutral).\n\
         2. Provide a short reasoning (max 2 sentences).\n\
         3. For LONG: Suggest Entry (likely Close or slight pullback), realistic Stop Loss (below Low/support), \
         Take Profit, and a Probability Score (0-100) based on structure.\n\
         4. For SHORT: Suggest Entry (likely Close or slight pullback), realistic Stop Loss (above High/resistance), \
         Take Profit, and a Probability Score (0-100) based on structure.\n",
        name = instrument.name,
        open = candle.open,
        high = candle.high,
        low = candle.low,
        close = candle.close,
    )
}

fn strategy_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "entryPrice": { "type": "NUMBER" },
            "stopLossPrice": { "type": "NUMBER" },
            "targetPrice": { "type": "NUMBER" },
            "probability": { "type": "NUMBER" }
        },
        "required": ["entryPrice", "stopLossPrice", "targetPrice", "probability"]
    })
}

/// Response schema sent with every request. Every field is required.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "bias": { "type": "STRING" },
            "reasoning": { "type": "STRING" },
            "longStrategy": strategy_schema(),
            "shortStrategy": strategy_schema()
        },
        "required": ["bias", "reasoning", "longStrategy", "shortStrategy"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_name_and_prices() {
        let inst = Instrument::new("eth", "ETH Futures", 0.01);
        let prompt = build_prompt(&inst, &CandleData::default());
        assert!(prompt.contains("Analyze this market data for ETH Futures:"));
        assert!(prompt.contains("Open: 2990\n"));
        assert!(prompt.contains("High: 3000\n"));
        assert!(prompt.contains("Low: 2980\n"));
        assert!(prompt.contains("Close: 2995\n"));
        assert!(prompt.contains("BOTH Long and Short"));
        assert!(prompt.contains("Stop Loss (above High/resistance)"));
    }

    #[test]
    fn prompt_keeps_fractional_prices() {
        let inst = Instrument::new("btc", "BTC Futures", 0.001);
        let prompt = build_prompt(&inst, &CandleData::new(1.5, 2.25, 1.0, 2.0));
        assert!(prompt.contains("Open: 1.5\n"));
        assert!(prompt.contains("High: 2.25\n"));
    }

    #[test]
    fn schema_requires_every_field() {
        let schema = response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        for side in ["longStrategy", "shortStrategy"] {
            let inner = schema["properties"][side]["required"].as_array().unwrap();
            assert_eq!(inner.len(), 4);
            assert!(inner.iter().any(|v| v == "probability"));
        }
    }
}
