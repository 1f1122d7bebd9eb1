//! TradeSize Core: instruments, candle data, position sizing, advisory client.
//!
//! This crate contains everything the front-ends share:
//! - Domain types (instruments, candles, directions, advisory analyses)
//! - Instrument registry with a floor of one instrument
//! - Candle data store with lenient numeric parsing
//! - Pure position sizing engine (lots required for a target profit)
//! - Advisory client that turns every failure into an absent result
//! - Calculator session that owns the invalidation contract
//! - TOML configuration and tracing setup

pub mod advisory;
pub mod candle_store;
pub mod config;
pub mod domain;
pub mod logging;
pub mod registry;
pub mod session;
pub mod sizing;

pub use advisory::{AdvisoryClient, AdvisoryConfig, AdvisoryOutcome};
pub use candle_store::CandleStore;
pub use config::{AppConfig, ConfigError};
pub use domain::{AiAnalysis, AiStrategy, CandleData, CandleField, Instrument, InstrumentId, TradeDirection};
pub use registry::InstrumentRegistry;
pub use session::{AdvisoryRequest, AnalysisMerge, CalculatorSession};
pub use sizing::{compute_both, compute_required_lots, CalculationResult};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything that crosses the worker channel is Send.
    ///
    /// The TUI moves advisory requests and outcomes between threads; a
    /// non-Send field added to any of these breaks the build here first.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Instrument>();
        require_sync::<Instrument>();
        require_send::<CandleData>();
        require_sync::<CandleData>();
        require_send::<AiAnalysis>();
        require_sync::<AiAnalysis>();
        require_send::<AdvisoryRequest>();
        require_send::<AdvisoryOutcome>();
        require_send::<AdvisoryClient>();
        require_send::<CalculationResult>();
    }
}
