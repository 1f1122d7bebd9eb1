//! Instruments panel (1): registry list with selection marker and lot sizes.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Panel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let registry = app.session.registry();
    let focused = app.active_panel == Panel::Instruments;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("[Enter]select [n]ew [d]elete", theme::muted())));
    lines.push(Line::from(""));

    for (row, inst) in registry.iter().enumerate() {
        let is_selected = row == registry.selected_index();
        let is_cursor = focused && row == app.instrument_cursor;

        let marker = if is_selected { "● " } else { "  " };
        let name_style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if is_selected {
            theme::accent_bold()
        } else {
            theme::text()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, theme::positive()),
            Span::styled(inst.name.as_str(), name_style),
            Span::styled(format!("  lot {}", inst.lot_size), theme::muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}
