//! Inputs panel (2): the four candle prices and the target profit.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use tradesize_core::candle_store::INCONSISTENT_WARNING;

use crate::app::{AppState, InputRow, Panel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.active_panel == Panel::Inputs;
    let mut lines: Vec<Line> = Vec::new();

    for (i, row) in InputRow::ALL.iter().enumerate() {
        let is_cursor = focused && i == app.input_cursor;
        let editing = app.editing.as_ref().filter(|e| e.row == *row);

        let value = match editing {
            Some(edit) => format!("{}_", edit.buffer),
            None => app.row_value(*row).to_string(),
        };
        let value_style = if editing.is_some() {
            theme::accent_bold()
        } else if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::text()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:>18}: ", row.label()), theme::muted()),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    if app.session.is_inconsistent() {
        lines.push(Line::from(Span::styled(INCONSISTENT_WARNING, theme::warning())));
    } else {
        lines.push(Line::from(Span::styled("[Enter]edit [r]eset candle", theme::muted())));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
