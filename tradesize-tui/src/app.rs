//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The calculator itself is a
//! [`CalculatorSession`]; this layer adds cursors, the edit buffer, overlays
//! and the worker channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use tracing::debug;

use tradesize_core::advisory::AdvisoryOutcome;
use tradesize_core::domain::{CandleField, TradeDirection};
use tradesize_core::session::{AnalysisMerge, CalculatorSession};
use tradesize_core::sizing::format_lots;

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Which panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Instruments,
    Inputs,
    Results,
}

impl Panel {
    const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Panel::Instruments => 0,
            Panel::Inputs => 1,
            Panel::Results => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Instruments),
            1 => Some(Panel::Inputs),
            2 => Some(Panel::Results),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Instruments => "Instruments",
            Panel::Inputs => "Inputs",
            Panel::Results => "Results",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Instruments)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Instruments)
    }
}

/// One editable row of the inputs panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRow {
    Candle(CandleField),
    TargetProfit,
}

impl InputRow {
    pub const ALL: [InputRow; 5] = [
        InputRow::Candle(CandleField::Open),
        InputRow::Candle(CandleField::High),
        InputRow::Candle(CandleField::Low),
        InputRow::Candle(CandleField::Close),
        InputRow::TargetProfit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InputRow::Candle(field) => field.label(),
            InputRow::TargetProfit => "Target Profit ($)",
        }
    }
}

/// In-progress text edit of an input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub row: InputRow,
    pub buffer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    Name,
    LotSize,
}

/// The "add instrument" form.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub name: String,
    pub lot_size: String,
    pub focus: AddField,
}

impl AddForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AddField::Name => &mut self.name,
            AddField::LotSize => &mut self.lot_size,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AddField::Name => AddField::LotSize,
            AddField::LotSize => AddField::Name,
        };
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Advisory,
    Input,
    Worker,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Advisory => "AI",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Worker => "WRK",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
    AddInstrument,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    pub session: CalculatorSession,
    pub advisory_enabled: bool,

    // Panel cursors
    pub instrument_cursor: usize,
    pub input_cursor: usize,
    pub editing: Option<EditState>,
    pub results_focus: TradeDirection,
    pub add_form: AddForm,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        session: CalculatorSession,
        advisory_enabled: bool,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let instrument_cursor = session.registry().selected_index();
        Self {
            active_panel: Panel::Inputs,
            running: true,
            session,
            advisory_enabled,
            instrument_cursor,
            input_cursor: 0,
            editing: None,
            results_focus: TradeDirection::Long,
            add_form: AddForm::default(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    // ── Advisory ─────────────────────────────────────────────────────

    /// Send the current inputs to the worker unless a call is in flight.
    pub fn request_analysis(&mut self) {
        let Some(request) = self.session.begin_analysis() else {
            self.set_warning("Analysis already in progress");
            return;
        };
        let revision = request.revision;
        if self.worker_tx.send(WorkerCommand::Analyze(request)).is_err() {
            self.session.finish_analysis(revision, AdvisoryOutcome::Absent { reason: "worker stopped".into() });
            self.push_error(ErrorCategory::Worker, "Worker is not running".into(), "analyze".into());
            return;
        }
        self.set_status("Analyzing candle...");
    }

    /// Merge a worker response into the session and report it.
    pub fn on_analysis_done(&mut self, revision: u64, outcome: AdvisoryOutcome) {
        let reason = match &outcome {
            AdvisoryOutcome::Absent { reason } => Some(reason.clone()),
            AdvisoryOutcome::Analysis(_) => None,
        };
        match self.session.finish_analysis(revision, outcome) {
            AnalysisMerge::Stored => self.set_status("Analysis ready"),
            AnalysisMerge::Stale => self.set_warning("Inputs changed during analysis; result discarded"),
            AnalysisMerge::Absent => {
                let context = self.session.selected_instrument().name.clone();
                self.push_error(
                    ErrorCategory::Advisory,
                    format!("No analysis available: {}", reason.unwrap_or_default()),
                    context,
                );
            }
        }
    }

    // ── Instruments ──────────────────────────────────────────────────

    pub fn select_at_cursor(&mut self) {
        let Some(id) = self.session.registry().iter().nth(self.instrument_cursor).map(|i| i.id.clone()) else {
            return;
        };
        if self.session.select_instrument(&id) {
            let name = self.session.selected_instrument().name.clone();
            self.set_status(format!("Selected {name}"));
        }
    }

    pub fn remove_at_cursor(&mut self) {
        let Some(inst) = self.session.registry().iter().nth(self.instrument_cursor).cloned() else {
            return;
        };
        if self.session.remove_instrument(&inst.id) {
            self.set_status(format!("Removed {}", inst.name));
        } else {
            self.set_warning("Cannot remove the last instrument");
        }
        let last = self.session.registry().len().saturating_sub(1);
        self.instrument_cursor = self.instrument_cursor.min(last);
    }

    pub fn open_add_form(&mut self) {
        self.add_form = AddForm::default();
        self.overlay = Overlay::AddInstrument;
    }

    /// Validate and add the form's instrument. The overlay stays open on a
    /// validation error so the user can correct it.
    pub fn submit_add_form(&mut self) {
        let form = self.add_form.clone();
        match self.session.add_instrument(&form.name, &form.lot_size) {
            Ok(id) => {
                debug!(%id, "instrument added");
                self.set_status(format!("Added {}", form.name.trim()));
                self.overlay = Overlay::None;
                self.add_form = AddForm::default();
            }
            Err(e) => {
                self.push_error(ErrorCategory::Input, e.to_string(), format!("add '{}'", form.name));
            }
        }
    }

    // ── Inputs ───────────────────────────────────────────────────────

    pub fn cursor_row(&self) -> InputRow {
        InputRow::ALL[self.input_cursor.min(InputRow::ALL.len() - 1)]
    }

    pub fn row_value(&self, row: InputRow) -> f64 {
        match row {
            InputRow::Candle(field) => self.session.candle().get(field),
            InputRow::TargetProfit => self.session.target_profit(),
        }
    }

    pub fn begin_edit(&mut self) {
        let row = self.cursor_row();
        self.editing = Some(EditState { row, buffer: self.row_value(row).to_string() });
    }

    pub fn edit_push(&mut self, c: char) {
        if let Some(edit) = &mut self.editing {
            edit.buffer.push(c);
        }
        self.apply_edit_buffer();
    }

    pub fn edit_backspace(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.buffer.pop();
        }
        self.apply_edit_buffer();
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    /// Every keystroke reaches the session, so results and invalidation
    /// track the buffer live.
    fn apply_edit_buffer(&mut self) {
        let Some(edit) = &self.editing else {
            return;
        };
        match edit.row {
            InputRow::Candle(field) => self.session.set_candle_field(field, &edit.buffer),
            InputRow::TargetProfit => self.session.set_target_profit(&edit.buffer),
        }
    }

    pub fn reset_candle(&mut self) {
        self.editing = None;
        self.session.reset_candle();
        self.set_status("Candle reset to defaults");
    }

    // ── Results ──────────────────────────────────────────────────────

    pub fn apply_focused_entry(&mut self) {
        let dir = self.results_focus;
        if self.session.apply_entry(dir) {
            let [long, short] = self.session.results();
            let lots = match dir {
                TradeDirection::Long => long.required_lots,
                TradeDirection::Short => short.required_lots,
            };
            self.set_status(format!(
                "Close set to {} entry ({}); {} lots",
                dir.label(),
                self.session.candle().close,
                format_lots(lots)
            ));
        } else {
            self.set_warning("No analysis to apply");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::mpsc;

    use tradesize_core::domain::{AiAnalysis, AiStrategy};

    pub(crate) fn test_app() -> (AppState, Receiver<WorkerCommand>) {
        let (tx, rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(CalculatorSession::default(), false, tx, resp_rx), rx)
    }

    pub(crate) fn analysis() -> AiAnalysis {
        AiAnalysis {
            bias: "BEARISH".into(),
            reasoning: "Rejection from the high.".into(),
            long_strategy: AiStrategy { entry_price: 2985.0, stop_loss_price: 2975.0, target_price: 3005.0, probability: 40.0 },
            short_strategy: AiStrategy { entry_price: 2998.0, stop_loss_price: 3005.0, target_price: 2980.0, probability: 60.0 },
        }
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Instruments.next(), Panel::Inputs);
        assert_eq!(Panel::Results.next(), Panel::Instruments);
        assert_eq!(Panel::Instruments.prev(), Panel::Results);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..3 {
            assert_eq!(Panel::from_index(i).unwrap().index(), i);
        }
        assert!(Panel::from_index(3).is_none());
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _rx) = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Advisory, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn request_sends_and_marks_busy() {
        let (mut app, rx) = test_app();
        app.request_analysis();
        assert!(app.session.is_busy());
        assert!(matches!(rx.try_recv(), Ok(WorkerCommand::Analyze(_))));

        app.request_analysis();
        assert!(rx.try_recv().is_err());
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Warning);
    }

    #[test]
    fn request_with_dead_worker_clears_busy() {
        let (mut app, rx) = test_app();
        drop(rx);
        app.request_analysis();
        assert!(!app.session.is_busy());
        assert_eq!(app.error_history[0].category, ErrorCategory::Worker);
    }

    #[test]
    fn absent_outcome_is_recorded() {
        let (mut app, _rx) = test_app();
        app.request_analysis();
        let rev = app.session.revision();
        app.on_analysis_done(rev, AdvisoryOutcome::Absent { reason: "rate limited".into() });
        assert!(!app.session.is_busy());
        assert!(app.session.analysis().is_none());
        assert!(app.error_history[0].message.contains("rate limited"));
    }

    #[test]
    fn live_edit_invalidates_and_updates() {
        let (mut app, _rx) = test_app();
        app.request_analysis();
        app.on_analysis_done(app.session.revision(), AdvisoryOutcome::Analysis(analysis()));
        assert!(app.session.analysis().is_some());

        app.input_cursor = 3; // Close
        app.begin_edit();
        assert_eq!(app.editing.as_ref().unwrap().buffer, "2995");
        app.edit_backspace();
        assert_eq!(app.session.candle().close, 299.0);
        assert!(app.session.analysis().is_none());
        app.edit_push('7');
        assert_eq!(app.session.candle().close, 2997.0);
        app.end_edit();
        assert!(app.editing.is_none());
    }

    #[test]
    fn target_edit_keeps_analysis() {
        let (mut app, _rx) = test_app();
        app.request_analysis();
        app.on_analysis_done(app.session.revision(), AdvisoryOutcome::Analysis(analysis()));

        app.input_cursor = 4;
        app.begin_edit();
        app.edit_push('0');
        assert_eq!(app.session.target_profit(), 10.0);
        assert!(app.session.analysis().is_some());
    }

    #[test]
    fn remove_clamps_cursor() {
        let (mut app, _rx) = test_app();
        app.instrument_cursor = 3;
        app.remove_at_cursor();
        assert_eq!(app.session.registry().len(), 3);
        assert_eq!(app.instrument_cursor, 2);
    }

    #[test]
    fn add_form_validation_keeps_overlay() {
        let (mut app, _rx) = test_app();
        app.open_add_form();
        app.add_form.name = "Gold".into();
        app.add_form.lot_size = "abc".into();
        app.submit_add_form();
        assert_eq!(app.overlay, Overlay::AddInstrument);
        assert_eq!(app.error_history[0].category, ErrorCategory::Input);

        app.add_form.lot_size = "0.1".into();
        app.submit_add_form();
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.session.registry().len(), 5);
    }

    #[test]
    fn apply_entry_reports() {
        let (mut app, _rx) = test_app();
        app.apply_focused_entry();
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Warning);

        app.request_analysis();
        app.on_analysis_done(app.session.revision(), AdvisoryOutcome::Analysis(analysis()));
        app.results_focus = TradeDirection::Short;
        app.apply_focused_entry();
        assert_eq!(app.session.candle().close, 2998.0);
        assert!(app.session.analysis().is_none());
    }
}
