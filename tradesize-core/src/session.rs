//! Calculator session: the state behind one calculator screen.
//!
//! The session owns the registry, candle store, target profit and the held
//! advisory analysis, and enforces the invalidation rule: any change to the
//! candle or to the selected instrument clears the analysis in the same call.
//!
//! Each invalidating edit also bumps a revision counter. An advisory request
//! snapshots the revision it was issued at, so a response that arrives after
//! the inputs changed is recognized as stale and dropped.

use tracing::debug;

use crate::advisory::AdvisoryOutcome;
use crate::candle_store::CandleStore;
use crate::config::AppConfig;
use crate::domain::{parse_number, AiAnalysis, CandleData, CandleField, Instrument, InstrumentError, InstrumentId, TradeDirection};
use crate::registry::InstrumentRegistry;
use crate::sizing::{compute_both, CalculationResult};

/// Snapshot of the inputs an advisory call is made for.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryRequest {
    pub revision: u64,
    pub instrument: Instrument,
    pub candle: CandleData,
}

/// How a finished advisory call was merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMerge {
    Stored,
    Absent,
    Stale,
}

#[derive(Debug, Clone)]
pub struct CalculatorSession {
    registry: InstrumentRegistry,
    candle: CandleStore,
    target_profit: f64,
    analysis: Option<AiAnalysis>,
    busy: bool,
    revision: u64,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl CalculatorSession {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            registry: InstrumentRegistry::with_instruments(config.instruments.clone()),
            candle: CandleStore::new(config.candle),
            target_profit: config.sanitized_target_profit(),
            analysis: None,
            busy: false,
            revision: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn registry(&self) -> &InstrumentRegistry {
        &self.registry
    }

    pub fn selected_instrument(&self) -> &Instrument {
        self.registry.selected()
    }

    pub fn candle(&self) -> &CandleData {
        self.candle.current()
    }

    pub fn is_inconsistent(&self) -> bool {
        self.candle.is_inconsistent()
    }

    pub fn target_profit(&self) -> f64 {
        self.target_profit
    }

    pub fn analysis(&self) -> Option<&AiAnalysis> {
        self.analysis.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Both result cards, recomputed from the current inputs on every call.
    pub fn results(&self) -> [CalculationResult; 2] {
        compute_both(self.candle.current(), self.registry.selected(), self.target_profit)
    }

    // ── Candle edits (always invalidate) ─────────────────────────────

    pub fn set_candle_field(&mut self, field: CandleField, raw: &str) {
        self.candle.set_field(field, raw);
        self.invalidate("candle edit");
    }

    pub fn set_candle_value(&mut self, field: CandleField, value: f64) {
        self.candle.set(field, value);
        self.invalidate("candle edit");
    }

    pub fn reset_candle(&mut self) {
        self.candle.reset();
        self.invalidate("candle reset");
    }

    // ── Instrument edits ─────────────────────────────────────────────

    /// Invalidates only when the selection actually changes.
    pub fn select_instrument(&mut self, id: &InstrumentId) -> bool {
        let changed = self.registry.select(id);
        if changed {
            self.invalidate("instrument selected");
        }
        changed
    }

    /// Adding does not touch the selection, so the analysis survives.
    pub fn add_instrument(&mut self, name: &str, lot_size_raw: &str) -> Result<InstrumentId, InstrumentError> {
        self.registry.add(name, lot_size_raw)
    }

    /// Invalidates when the removal moved the selection.
    pub fn remove_instrument(&mut self, id: &InstrumentId) -> bool {
        let len_before = self.registry.len();
        let moved = self.registry.remove(id);
        if moved {
            self.invalidate("selected instrument removed");
        }
        self.registry.len() < len_before
    }

    // ── Target profit (never invalidates) ────────────────────────────

    /// Lenient parse; negative amounts are treated as zero.
    pub fn set_target_profit(&mut self, raw: &str) {
        self.target_profit = parse_number(raw).max(0.0);
    }

    // ── Advisory round trip ──────────────────────────────────────────

    /// Mark the session busy and snapshot the inputs. `None` while a call is
    /// already in flight.
    pub fn begin_analysis(&mut self) -> Option<AdvisoryRequest> {
        if self.busy {
            return None;
        }
        self.busy = true;
        Some(AdvisoryRequest {
            revision: self.revision,
            instrument: self.registry.selected().clone(),
            candle: *self.candle.current(),
        })
    }

    /// Merge a finished call. Busy is always cleared; the analysis is replaced
    /// only when the inputs are unchanged since the request was issued. A
    /// current `Absent` outcome replaces it with nothing.
    pub fn finish_analysis(&mut self, revision: u64, outcome: AdvisoryOutcome) -> AnalysisMerge {
        self.busy = false;
        match outcome {
            AdvisoryOutcome::Absent { .. } => {
                if revision == self.revision {
                    self.analysis = None;
                }
                AnalysisMerge::Absent
            }
            AdvisoryOutcome::Analysis(_) if revision != self.revision => {
                debug!(issued = revision, current = self.revision, "discarding stale analysis");
                AnalysisMerge::Stale
            }
            AdvisoryOutcome::Analysis(analysis) => {
                self.analysis = Some(analysis);
                AnalysisMerge::Stored
            }
        }
    }

    /// Copy the held analysis' entry price for `direction` into close.
    ///
    /// This is a candle edit, so it clears the analysis it came from.
    pub fn apply_entry(&mut self, direction: TradeDirection) -> bool {
        let Some(entry) = self.analysis.as_ref().map(|a| a.strategy(direction).entry_price) else {
            return false;
        };
        self.set_candle_value(CandleField::Close, entry);
        true
    }

    fn invalidate(&mut self, cause: &str) {
        self.revision += 1;
        if self.analysis.take().is_some() {
            debug!(cause, revision = self.revision, "analysis invalidated");
        }
    }
}
