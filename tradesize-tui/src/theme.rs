//! Slate/neon theme tokens for the TradeSize TUI
//!
//! # Color Palette
//! - **Accent**: Indigo (focus, highlights, the advisory panel)
//! - **Positive**: Green (LONG card, bullish bias)
//! - **Negative**: Red (SHORT card, bearish bias, errors)
//! - **Warning**: Amber (inconsistent candle, stale results)
//! - **Neutral**: Violet (neutral bias, secondary info)
//! - **Muted**: Slate (labels, hints, inactive cards)

use ratatui::style::{Color, Modifier, Style};

use tradesize_core::domain::{Bias, TradeDirection};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::slate_neon()
    }
}

impl Theme {
    pub fn slate_neon() -> Self {
        Self {
            accent: Color::Rgb(129, 140, 248),
            positive: Color::Rgb(74, 222, 128),
            negative: Color::Rgb(248, 113, 113),
            warning: Color::Rgb(251, 191, 36),
            neutral: Color::Rgb(167, 139, 250),
            muted: Color::Rgb(148, 163, 184),
            text_primary: Color::White,
        }
    }

    /// LONG is green, SHORT is red.
    pub fn direction_color(&self, direction: TradeDirection) -> Color {
        match direction {
            TradeDirection::Long => self.positive,
            TradeDirection::Short => self.negative,
        }
    }

    pub fn bias_color(&self, bias: Bias) -> Color {
        match bias {
            Bias::Bullish => self.positive,
            Bias::Bearish => self.negative,
            Bias::Neutral => self.neutral,
        }
    }

    /// Probability gradient: strong setups stand out, weak ones fade.
    pub fn probability_color(&self, probability: f64) -> Color {
        match probability {
            p if p >= 70.0 => self.positive,
            p if p >= 50.0 => self.accent,
            p if p >= 30.0 => self.warning,
            _ => self.muted,
        }
    }
}

fn theme() -> Theme {
    Theme::default()
}

pub fn accent() -> Style {
    Style::default().fg(theme().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(theme().positive)
}

pub fn negative() -> Style {
    Style::default().fg(theme().negative)
}

pub fn warning() -> Style {
    Style::default().fg(theme().warning)
}

pub fn neutral() -> Style {
    Style::default().fg(theme().neutral)
}

pub fn muted() -> Style {
    Style::default().fg(theme().muted)
}

pub fn text() -> Style {
    Style::default().fg(theme().text_primary)
}

pub fn direction(direction: TradeDirection) -> Style {
    Style::default().fg(theme().direction_color(direction))
}

pub fn bias(bias: Bias) -> Style {
    Style::default().fg(theme().bias_color(bias)).add_modifier(Modifier::BOLD)
}

pub fn probability(probability: f64) -> Style {
    Style::default().fg(theme().probability_color(probability))
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_colors() {
        let t = Theme::default();
        assert_eq!(t.direction_color(TradeDirection::Long), t.positive);
        assert_eq!(t.direction_color(TradeDirection::Short), t.negative);
    }

    #[test]
    fn bias_colors() {
        let t = Theme::default();
        assert_eq!(t.bias_color(Bias::Bullish), t.positive);
        assert_eq!(t.bias_color(Bias::Bearish), t.negative);
        assert_eq!(t.bias_color(Bias::Neutral), t.neutral);
    }

    #[test]
    fn probability_gradient() {
        let t = Theme::default();
        assert_eq!(t.probability_color(85.0), t.positive);
        assert_eq!(t.probability_color(55.0), t.accent);
        assert_eq!(t.probability_color(35.0), t.warning);
        assert_eq!(t.probability_color(10.0), t.muted);
    }

    #[test]
    fn panel_styles_follow_focus() {
        assert_eq!(panel_border(true), accent());
        assert_eq!(panel_border(false), muted());
        assert_eq!(panel_title(true), accent_bold());
    }
}
