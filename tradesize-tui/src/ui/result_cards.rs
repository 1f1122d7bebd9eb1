//! Results panel (3): one sizing card per direction, with the matching AI
//! strategy underneath when an analysis is held.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use tradesize_core::domain::AiStrategy;
use tradesize_core::sizing::{format_lots, format_points, format_value_per_lot, profit_sentence, CalculationResult};

use crate::app::{AppState, Panel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Recomputed every frame from the session's current inputs.
    let results = app.session.results();
    for (result, col) in results.iter().zip(cols.iter()) {
        render_card(f, *col, app, result);
    }
}

fn render_card(f: &mut Frame, area: Rect, app: &AppState, result: &CalculationResult) {
    let dir = result.direction;
    let candle = app.session.candle();
    let is_active = result.is_active(candle);
    let is_focused = app.active_panel == Panel::Results && app.results_focus == dir;

    let border_style = if is_focused {
        theme::direction(dir).add_modifier(Modifier::BOLD)
    } else if is_active {
        theme::direction(dir)
    } else {
        theme::muted()
    };
    let title = if is_active {
        format!(" {} ● [3] ", dir.label())
    } else {
        format!(" {} [3] ", dir.label())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(theme::direction(dir).add_modifier(Modifier::BOLD));

    let target = app.session.target_profit();
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Required Position Size", theme::muted())),
        Line::from(vec![
            Span::styled(format_lots(result.required_lots), theme::direction(dir).add_modifier(Modifier::BOLD)),
            Span::styled(" Lots", theme::muted()),
        ]),
        Line::from(""),
        stat_line("Risk Gap (pts)", format_points(result.points_captured)),
        stat_line("Value per Lot", format!("${}", format_value_per_lot(result.value_per_lot))),
        Line::from(Span::styled(profit_sentence(result, target), theme::muted())),
    ];

    if let Some(analysis) = app.session.analysis() {
        lines.push(Line::from(""));
        strategy_lines(&mut lines, analysis.strategy(dir), is_focused);
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn stat_line<'a>(label: &str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), theme::muted()),
        Span::styled(value, theme::text()),
    ])
}

const PROBABILITY_BAR_WIDTH: usize = 20;

/// Probability in percent as a fixed-width bar, clamped to [0, 100].
fn probability_bar(probability: f64, width: usize) -> String {
    let frac = (probability / 100.0).clamp(0.0, 1.0);
    let filled = (frac * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}

fn strategy_lines(lines: &mut Vec<Line<'_>>, strategy: &AiStrategy, focused: bool) {
    lines.push(Line::from(vec![
        Span::styled("AI Strategy  ", theme::accent_bold()),
        Span::styled(format!("{}%", strategy.probability), theme::probability(strategy.probability)),
    ]));
    lines.push(Line::from(Span::styled(
        probability_bar(strategy.probability, PROBABILITY_BAR_WIDTH),
        theme::probability(strategy.probability),
    )));
    lines.push(stat_line("Suggested Entry", strategy.entry_price.to_string()));
    lines.push(stat_line("Stop Loss", strategy.stop_loss_price.to_string()));
    lines.push(stat_line("Target", strategy.target_price.to_string()));
    if focused {
        lines.push(Line::from(Span::styled("[Enter] use entry as Close", theme::muted())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_lines_include_hint_only_when_focused() {
        let s = AiStrategy { entry_price: 1.0, stop_loss_price: 0.5, target_price: 2.0, probability: 55.0 };
        let mut lines = Vec::new();
        strategy_lines(&mut lines, &s, false);
        assert_eq!(lines.len(), 5);
        strategy_lines(&mut lines, &s, true);
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn probability_bar_fills_proportionally() {
        assert_eq!(probability_bar(50.0, 10), "[=====     ]");
        assert_eq!(probability_bar(0.0, 4), "[    ]");
        assert_eq!(probability_bar(100.0, 4), "[====]");
        assert_eq!(probability_bar(150.0, 4), "[====]");
    }
}
