//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme; change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub const SAND: Color = Color::Rgb(0xdd, 0xd4, 0xc8);
    pub const UMBER: Color = Color::Rgb(0x5a, 0x3e, 0x2b);
    pub const TERRACOTTA: Color = Color::Rgb(0xc1, 0x55, 0x3d);
    pub const RUST: Color = Color::Rgb(0x94, 0x32, 0x04);
    pub const EMBER: Color = Color::Rgb(0xd9, 0x4a, 0x2e);
    pub const IVORY: Color = Color::Rgb(0xf2, 0xe9, 0xe2);

    // ── sections ───────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default().fg(Self::UMBER).add_modifier(Modifier::BOLD)
    }

    pub fn accent_style() -> Style {
        Style::default().fg(Self::TERRACOTTA)
    }

    pub fn axis_style() -> Style {
        Style::default().fg(Self::TERRACOTTA)
    }

    /// Text style for content at `opacity`.  Terminals have no alpha, so
    /// opacity is bucketed into hidden / dim / normal / bold.
    pub fn faded(base: Style, opacity: f64) -> Option<Style> {
        if opacity < 0.15 {
            None
        } else if opacity < 0.5 {
            Some(base.add_modifier(Modifier::DIM))
        } else if opacity < 0.95 {
            Some(base)
        } else {
            Some(base.add_modifier(Modifier::BOLD))
        }
    }

    pub fn hud_style() -> Style {
        Style::default().fg(Self::IVORY)
    }

    pub fn marker_style() -> Style {
        Style::default().fg(Self::EMBER).add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Self::TERRACOTTA)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_buckets() {
        let base = Style::default();
        assert_eq!(Theme::faded(base, 0.0), None);
        assert_eq!(Theme::faded(base, 0.3), Some(base.add_modifier(Modifier::DIM)));
        assert_eq!(Theme::faded(base, 0.7), Some(base));
        assert_eq!(Theme::faded(base, 1.0), Some(base.add_modifier(Modifier::BOLD)));
    }
}
