//! Domain types for TradeSize

pub mod analysis;
pub mod candle;
pub mod direction;
pub mod instrument;

pub use analysis::{AiAnalysis, AiStrategy, Bias};
pub use candle::{parse_number, CandleData, CandleField};
pub use direction::TradeDirection;
pub use instrument::{Instrument, InstrumentError, InstrumentId};
