//! Testimonials: a heading, the endless card marquee and a row of city
//! stats.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::app::content::Testimonial;
use crate::app::page::CELL_W_PX;
use crate::app::sections::TributeSection;

use super::blit::render_clipped;
use super::theme::Theme;

const HEADING_ROWS: u16 = 5;
const CARD_ROWS: u16 = 9;
const STAT_ROWS: u16 = 4;
/// Columns between neighbouring cards.
const CARD_GAP_COLS: u16 = 3;

pub struct TributeWidget<'a> {
    section: &'a TributeSection,
    items: &'a [Testimonial],
    stats: &'a [(&'a str, &'a str)],
}

impl<'a> TributeWidget<'a> {
    pub fn new(section: &'a TributeSection, items: &'a [Testimonial], stats: &'a [(&'a str, &'a str)]) -> Self {
        Self { section, items, stats }
    }

    fn render_marquee(&self, band: Rect, buf: &mut Buffer) {
        let marquee = self.section.marquee();
        let pitch_px = f64::from(marquee.card_px());
        let pitch = (pitch_px / CELL_W_PX).round() as u16;
        let card_w = pitch.saturating_sub(CARD_GAP_COLS).max(8);
        if self.items.is_empty() || pitch == 0 {
            return;
        }

        for slot in 0..marquee.track_len() {
            let x = ((slot as f64 * pitch_px + marquee.offset_px()) / CELL_W_PX).round() as i32;
            if x >= i32::from(band.width) {
                break;
            }
            if x + i32::from(card_w) <= 0 {
                continue;
            }
            let item = &self.items[slot % self.items.len()];
            render_clipped(testimonial_card(item), x, 0, card_w, band.height, band, buf);
        }
    }

    fn render_stats(&self, area: Rect, buf: &mut Buffer) {
        if self.stats.is_empty() {
            return;
        }
        let count = self.stats.len() as u32;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(self.stats.iter().map(|_| Constraint::Ratio(1, count)))
            .split(area);
        for (&(value, label), cell) in self.stats.iter().zip(cells.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border_style());
            Paragraph::new(vec![
                Line::from(Span::styled(value, Theme::title_style())),
                Line::from(Span::styled(label, Theme::hud_style().add_modifier(Modifier::DIM))),
            ])
            .alignment(Alignment::Center)
            .block(block)
            .render(*cell, buf);
        }
    }
}

fn testimonial_card(item: &Testimonial) -> Paragraph<'_> {
    let initial: String = item.name.chars().take(1).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::accent_style())
        .title(Span::styled(" ❝ ", Theme::accent_style()));
    Paragraph::new(vec![
        Line::from(Span::styled(item.quote, Theme::hud_style())),
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!("({initial}) "), Theme::marker_style()),
            Span::styled(item.name, Theme::title_style()),
        ]),
        Line::from(Span::styled(item.title, Theme::hud_style().add_modifier(Modifier::DIM))),
    ])
    .block(block)
    .wrap(Wrap { trim: true })
}

impl<'a> Widget for TributeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < HEADING_ROWS {
            return;
        }

        let heading = Paragraph::new(vec![
            Line::from(Span::styled("[ Testimonials ]", Theme::accent_style())),
            Line::from(Span::styled("Voices of Karachi", Theme::heading_style())),
            Line::from(Span::styled(
                "Hear what people say about the city that never sleeps",
                Theme::hud_style(),
            )),
            Line::from(Span::styled("──── • ────", Theme::accent_style())),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        heading.render(Rect { height: HEADING_ROWS, ..area }, buf);

        let band_rows = CARD_ROWS.min(area.height - HEADING_ROWS);
        let band = Rect {
            y: area.y + HEADING_ROWS,
            height: band_rows,
            ..area
        };
        self.render_marquee(band, buf);

        let stats_y = band.y + band.height + 1;
        if stats_y + STAT_ROWS <= area.y + area.height {
            self.render_stats(
                Rect {
                    y: stats_y,
                    height: STAT_ROWS,
                    ..area
                },
                buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::content;
    use crate::config::MotionConfig;
    use crate::core::progress::ScrollFrame;
    use std::time::{Duration, Instant};

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .flat_map(|y| (area.x..area.x + area.width).map(move |x| (x, y)))
            .filter_map(|pos| buf.cell(pos).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn render(section: &TributeSection) -> Buffer {
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        TributeWidget::new(section, content::TESTIMONIALS, content::CITY_STATS).render(area, &mut buf);
        buf
    }

    #[test]
    fn first_card_and_stats_at_rest() {
        let motion = MotionConfig::default();
        let section = TributeSection::new(content::TESTIMONIALS.len(), &motion);
        let buf = render(&section);
        let text = text(&buf);
        assert!(text.contains("Voices of Karachi"));
        assert!(text.contains("Ahmed Khan"));
        assert!(text.contains("16M+"));
        assert!(text.contains("Largest City"));
        // Card border starts at the left edge.
        assert_eq!(buf.cell((0, HEADING_ROWS)).map(|c| c.symbol()), Some("╭"));
    }

    #[test]
    fn one_pitch_of_travel_shows_the_next_card() {
        let motion = MotionConfig::default();
        let mut section = TributeSection::new(content::TESTIMONIALS.len(), &motion);
        let t0 = Instant::now();
        let frame = ScrollFrame::new(0.0, 640.0, 640.0);
        section.update(&frame, t0, &motion);
        // 400 px at one pixel per 30 ms.
        section.update(&frame, t0 + Duration::from_millis(12_000), &motion);
        assert_eq!(section.marquee().offset_px(), -400.0);

        let buf = render(&section);
        let card_rows: String = (HEADING_ROWS..HEADING_ROWS + CARD_ROWS).map(|y| row(&buf, y)).collect();
        assert!(card_rows.contains("Sara Ahmed"));
        assert!(!card_rows.contains("Ahmed Khan"));
    }
}
