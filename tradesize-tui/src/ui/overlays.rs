//! Overlay widgets: help, error history, add-instrument form.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{AddField, AppState};
use crate::theme;
use crate::ui::centered_rect;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keyboard Shortcuts [any key]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-3", "Focus panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "a", "Analyze the current candle with AI");
    key(&mut lines, "r", "Reset candle to defaults");
    key(&mut lines, "e", "Open error history");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Instruments");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "Enter", "Select instrument");
    key(&mut lines, "n", "Add a custom instrument");
    key(&mut lines, "d", "Delete instrument (the last one stays)");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2: Inputs");
    key(&mut lines, "j / k", "Move between fields");
    key(&mut lines, "Enter", "Edit field; results update as you type");
    key(&mut lines, "Enter / Esc", "Finish editing");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3: Results");
    key(&mut lines, "h / l", "Focus LONG / SHORT card");
    key(&mut lines, "Enter", "Use the AI entry price as Close");
    lines.push(Line::from(""));

    section(&mut lines, "Notes");
    key(&mut lines, "", "Editing the candle or switching instrument clears the AI analysis");

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(" Error History ({}) [Esc]close [j/k]scroll ", app.error_history.len()))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        f.render_widget(Paragraph::new(Span::styled("No errors recorded.", theme::muted())), inner);
        return;
    }

    let start = app.error_scroll;
    let end = (start + inner.height as usize).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().take(end).skip(start) {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", err.timestamp.format("%H:%M:%S")), theme::muted()),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![Span::raw("  "), Span::styled(err.context.as_str(), theme::muted())]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_add_instrument(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(50, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Add Instrument [Enter]add [Tab]field [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let form = &app.add_form;
    let lines = vec![
        Line::from(""),
        form_line("Name", &form.name, form.focus == AddField::Name),
        form_line("Lot Size", &form.lot_size, form.focus == AddField::LotSize),
        Line::from(""),
        Line::from(Span::styled("Lot size: units of the underlying per lot, e.g. 0.01", theme::muted())),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

fn form_line<'a>(label: &str, value: &'a str, focused: bool) -> Line<'a> {
    let (marker, style) = if focused {
        ("> ", theme::accent_bold())
    } else {
        ("  ", theme::text())
    };
    let mut spans = vec![
        Span::styled(marker, theme::accent()),
        Span::styled(format!("{label:>9}: "), theme::muted()),
        Span::styled(value, style),
    ];
    if focused {
        spans.push(Span::styled("_", theme::accent()));
    }
    Line::from(spans)
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
