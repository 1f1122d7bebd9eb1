//! AI analysis panel: bias and reasoning, busy indicator, sizing formula.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use tradesize_core::sizing::FORMULA;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" AI Analysis ")
        .title_style(theme::accent_bold());

    let session = &app.session;
    let mut lines: Vec<Line> = Vec::new();

    if session.is_busy() {
        lines.push(Line::from(Span::styled("Analyzing Candle...", theme::warning())));
    } else if let Some(analysis) = session.analysis() {
        lines.push(Line::from(vec![
            Span::styled("Bias: ", theme::muted()),
            Span::styled(analysis.bias.as_str(), theme::bias(analysis.bias_kind())),
        ]));
        lines.push(Line::from(Span::styled(analysis.reasoning.as_str(), theme::text())));
    } else if app.advisory_enabled {
        lines.push(Line::from(Span::styled(
            format!("[a] Analyze {} candle with AI", session.selected_instrument().name),
            theme::accent(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "AI analysis unavailable: set GEMINI_API_KEY to enable",
            theme::muted(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(FORMULA, theme::neutral())));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}
