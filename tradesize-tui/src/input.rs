//! Keyboard input dispatch: overlays → edit mode → global keys → panel handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tradesize_core::domain::TradeDirection;

use crate::app::{AppState, InputRow, Overlay, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::AddInstrument => {
            handle_add_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. An active edit owns every key.
    if app.editing.is_some() {
        handle_edit_key(app, key);
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.active_panel = Panel::Instruments;
            return;
        }
        KeyCode::Char('2') => {
            app.active_panel = Panel::Inputs;
            return;
        }
        KeyCode::Char('3') => {
            app.active_panel = Panel::Results;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('a') => {
            app.request_analysis();
            return;
        }
        KeyCode::Char('r') => {
            app.reset_candle();
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        _ => {}
    }

    // 4. Panel-specific keys.
    match app.active_panel {
        Panel::Instruments => handle_instruments_key(app, key),
        Panel::Inputs => handle_inputs_key(app, key),
        Panel::Results => handle_results_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_add_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.overlay = Overlay::None,
        KeyCode::Enter => app.submit_add_form(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.add_form.toggle_focus(),
        KeyCode::Backspace => {
            app.add_form.focused_mut().pop();
        }
        KeyCode::Char(c) => app.add_form.focused_mut().push(c),
        _ => {}
    }
}

fn handle_edit_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.end_edit(),
        KeyCode::Backspace => app.edit_backspace(),
        KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E') => app.edit_push(c),
        _ => {}
    }
}

fn handle_instruments_key(app: &mut AppState, key: KeyEvent) {
    let count = app.session.registry().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.instrument_cursor + 1 < count {
                app.instrument_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.instrument_cursor = app.instrument_cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.select_at_cursor(),
        KeyCode::Char('n') => app.open_add_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_at_cursor(),
        _ => {}
    }
}

fn handle_inputs_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.input_cursor + 1 < InputRow::ALL.len() {
                app.input_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Enter => app.begin_edit(),
        _ => {}
    }
}

fn handle_results_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.results_focus = TradeDirection::Long,
        KeyCode::Char('l') | KeyCode::Right => app.results_focus = TradeDirection::Short,
        KeyCode::Enter => app.apply_focused_entry(),
        _ => {}
    }
}
