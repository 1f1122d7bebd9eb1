//! Top-level UI layout: dashboard frame with status bar.
//!
//! ```text
//! ┌ Instruments ┐┌ LONG ─────┐┌ SHORT ────┐
//! │             ││           ││           │
//! ├ Inputs ─────┤└───────────┘└───────────┘
//! │             │┌ AI Analysis ───────────┐
//! └─────────────┘└────────────────────────┘
//! ```

pub mod advisory_panel;
pub mod input_panel;
pub mod instrument_panel;
pub mod overlays;
pub mod result_cards;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(main_area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(11)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(18), Constraint::Min(6)])
        .split(columns[1]);

    let inner = panel_block(f, left[0], app, Panel::Instruments);
    instrument_panel::render(f, inner, app);

    let inner = panel_block(f, left[1], app, Panel::Inputs);
    input_panel::render(f, inner, app);

    result_cards::render(f, right[0], app);
    advisory_panel::render(f, right[1], app);

    status_bar::render(f, status_area, app);

    match app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::AddInstrument => overlays::render_add_instrument(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw a panel border and return its inner area.
fn panel_block(f: &mut Frame, area: Rect, app: &AppState, panel: Panel) -> Rect {
    let is_active = app.active_panel == panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_active))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(is_active));

    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
