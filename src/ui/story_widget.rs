//! "Then vs Now": stacked story cards joined by dotted connectors.
//!
//! The section scrolls as one long block.  Cards appear once they have
//! been seen and each connector fills downward with its draw progress.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::app::content::StoryCard;
use crate::app::page::CELL_H_PX;
use crate::app::sections::StorySection;

use super::theme::Theme;

const CONNECTOR: &str = "┊";

pub struct StoryWidget<'a> {
    section: &'a StorySection,
    cards: &'a [StoryCard],
    viewport_height: f64,
}

impl<'a> StoryWidget<'a> {
    pub fn new(section: &'a StorySection, cards: &'a [StoryCard], viewport_height: f64) -> Self {
        Self {
            section,
            cards,
            viewport_height,
        }
    }

    fn row(&self, px: f64, area: Rect) -> u16 {
        let row = (px / CELL_H_PX).round().max(0.0) as u16;
        area.y + row.min(area.height)
    }
}

fn verse_panel(card: &StoryCard) -> Paragraph<'_> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style())
        .title(Span::styled(format!(" {} ", card.title), Theme::title_style()));
    let lines: Vec<Line> = card
        .verse
        .lines()
        .map(|l| Line::from(Span::styled(l, Theme::hud_style().add_modifier(Modifier::ITALIC))))
        .collect();
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true })
}

fn photo_panel(card: &StoryCard) -> Paragraph<'_> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::heading_style());
    Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled("▣", Theme::accent_style())),
        Line::from(Span::styled(card.caption, Theme::accent_style().add_modifier(Modifier::ITALIC))),
    ])
    .alignment(Alignment::Center)
    .block(block)
    .wrap(Wrap { trim: true })
}

impl<'a> Widget for StoryWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height < 3 {
            return;
        }
        let layout = self.section.layout();
        let vh = self.viewport_height;

        let heading = Paragraph::new(vec![
            Line::raw(""),
            Line::from(Span::styled("Then vs Now", Theme::heading_style())),
            Line::from(Span::styled(
                "A Tale Through Time",
                Theme::accent_style().add_modifier(Modifier::ITALIC),
            )),
        ])
        .alignment(Alignment::Center);
        heading.render(Rect { height: 3.min(area.height), ..area }, buf);

        // Connectors first so cards sit on top of them.
        let mid_x = area.x + area.width / 2;
        for (index, progress) in self.section.lines().iter().enumerate() {
            let (start, end) = layout.connector_span(index, vh);
            let (from, to) = (self.row(start, area), self.row(end, area));
            let drawn = (f64::from(to - from) * progress).round() as u16;
            for y in from..from + drawn {
                buf.set_string(mid_x, y, CONNECTOR, Theme::axis_style());
            }
        }

        let half = area.width / 2;
        for (index, card) in self.cards.iter().enumerate() {
            if !self.section.card_shown(index) {
                continue;
            }
            let (top, bottom) = layout.card_span(index, vh);
            let (y, end) = (self.row(top, area), self.row(bottom, area));
            if end <= y {
                continue;
            }
            let left = Rect::new(area.x, y, half, end - y);
            let right = Rect::new(area.x + half, y, area.width - half, end - y);
            let (text_rect, photo_rect) = if card.reverse { (right, left) } else { (left, right) };
            verse_panel(card).render(text_rect, buf);
            photo_panel(card).render(photo_rect, buf);
        }

        let (_, last) = layout.card_span(self.cards.len().saturating_sub(1), vh);
        let ornament_y = self.row(last, area) + 1;
        if ornament_y < area.y + area.height {
            Paragraph::new(Line::from(Span::styled("──── ✦ ────", Theme::accent_style())))
                .alignment(Alignment::Center)
                .render(Rect { y: ornament_y, height: 1, ..area }, buf);
        }
    }
}
