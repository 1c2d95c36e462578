//! Static sections: hero, culture card stack and footer.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::core::card_stack::CardStack;

use super::theme::Theme;

// ───────────────────────────────────────── hero ──────────────

pub struct HeroPanel;

impl Widget for HeroPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pad = area.height.saturating_sub(5) / 2;
        let mut lines = vec![Line::raw(""); pad as usize];
        lines.push(Line::from(Span::styled("MyKolachi", Theme::heading_style())));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "The story of Karachi, from fishing village to megacity",
            Theme::accent_style(),
        )));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "scroll ↓",
            Theme::hud_style().add_modifier(Modifier::DIM),
        )));
        Paragraph::new(lines).alignment(Alignment::Center).render(area, buf);
    }
}

// ───────────────────────────────────────── card stack ────────

/// Cascaded deck; each card sits one row and two columns below the card
/// on top of it.
pub struct CardStackPanel<'a> {
    stack: &'a CardStack,
}

impl<'a> CardStackPanel<'a> {
    pub fn new(stack: &'a CardStack) -> Self {
        Self { stack }
    }
}

impl<'a> Widget for CardStackPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Paragraph::new(Line::from(Span::styled("Culture of Karachi", Theme::heading_style())))
            .alignment(Alignment::Center);
        title.render(Rect { height: 1, ..area }, buf);

        let count = self.stack.len() as u16;
        if count == 0 || area.height < 4 {
            return;
        }
        let card_w = (area.width / 3).max(16).min(area.width);
        let card_h = (area.height / 2).max(3);
        let span_w = card_w + 2 * (count - 1);
        let left = area.x + area.width.saturating_sub(span_w) / 2;
        let top = area.y + 2;

        // Bottom card first; the top card ends up drawn last, up-left.
        for (depth, card) in self.stack.iter().enumerate() {
            let offset = count - 1 - depth as u16;
            let rect = Rect {
                x: left + 2 * offset,
                y: top + offset,
                width: card_w,
                height: card_h,
            }
            .intersection(area);
            if rect.is_empty() {
                continue;
            }
            let is_top = offset == 0;
            let style = if is_top {
                Theme::title_style()
            } else {
                Theme::border_style().add_modifier(Modifier::DIM)
            };
            Clear.render(rect, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(style)
                .title(Span::styled(format!(" {} ", card.label), style));
            let body = if is_top {
                vec![Line::raw(""), Line::from(Span::styled("⏎ next card", Theme::hud_style()))]
            } else {
                Vec::new()
            };
            Paragraph::new(body)
                .alignment(Alignment::Center)
                .block(block)
                .render(rect, buf);
        }
    }
}

// ───────────────────────────────────────── footer ────────────

pub struct FooterPanel;

impl Widget for FooterPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled("MyKolachi", Theme::title_style())),
            Line::from(Span::styled(
                "Heritage · Culture · Community",
                Theme::hud_style().add_modifier(Modifier::DIM),
            )),
        ];
        Paragraph::new(lines).alignment(Alignment::Center).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card_stack::Card;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .flat_map(|y| (area.x..area.x + area.width).map(move |x| (x, y)))
            .filter_map(|pos| buf.cell(pos).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn top_card_is_drawn_last() {
        let stack = CardStack::new([Card::new(1, "Food"), Card::new(2, "Music")]);
        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        CardStackPanel::new(&stack).render(area, &mut buf);
        let text = text(&buf);
        assert!(text.contains("Music"));
        assert!(text.contains("next card"));
    }

    #[test]
    fn hero_shows_the_title() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        HeroPanel.render(area, &mut buf);
        assert!(text(&buf).contains("MyKolachi"));
    }
}
