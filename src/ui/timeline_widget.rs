//! Horizontal timeline strip for the origins section.
//!
//! Cards alternate above and below a horizontal axis and pan from right to
//! left as the section's scroll progress goes from 0 to 1.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::app::page::{CELL_H_PX, CELL_W_PX};
use crate::app::sections::TimelineSection;
use crate::core::segments::{Segment, SegmentPosition, SegmentVisualState};

use super::blit::render_clipped;
use super::theme::Theme;

/// Rows between the axis and the nearest card edge.
const CONNECTOR_ROWS: i32 = 2;
const CARD_ROWS: u16 = 7;

pub struct TimelineWidget<'a> {
    section: &'a TimelineSection,
    block: Option<Block<'a>>,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(section: &'a TimelineSection) -> Self {
        Self { section, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

fn card<'a>(segment: &'a Segment, state: &SegmentVisualState) -> Option<Paragraph<'a>> {
    let text = Theme::faded(Theme::hud_style(), state.opacity)?;
    let heading = Theme::faded(Theme::title_style(), state.opacity)?;
    let border = Theme::faded(Theme::border_style(), state.opacity)?;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(Span::styled(format!(" {} ", segment.heading), heading));
    let lines = vec![
        Line::from(Span::styled(segment.title.as_str(), text.add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(segment.body.as_str(), text)),
    ];
    Some(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }))
}

impl<'a> Widget for TimelineWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.height < 4 || inner.width < 8 {
            return;
        }

        // ── heading ────────────────────────────────────────────
        let heading = Paragraph::new(vec![
            Line::from(Span::styled("Origin of Karachi", Theme::heading_style())),
            Line::from(Span::styled("TIMELINE HISTORY", Theme::accent_style())),
        ])
        .alignment(Alignment::Center);
        heading.render(Rect { height: 2, ..inner }, buf);

        // ── axis ───────────────────────────────────────────────
        let axis_row = i32::from(inner.height / 2);
        let axis_y = inner.y + inner.height / 2;
        buf.set_string(inner.x, axis_y, "─".repeat(inner.width as usize), Theme::axis_style());

        let metrics = self.section.metrics();
        let progress = self.section.progress();
        let slot_cols = (metrics.segment_width / CELL_W_PX).round() as i32;

        for (segment, state) in self.section.segments().iter().zip(self.section.states()) {
            let left = (metrics.segment_x(progress, segment.index) / CELL_W_PX).floor() as i32;
            let center = left + slot_cols / 2;
            let below = segment.position == SegmentPosition::BelowLine;

            if let Some(style) = Theme::faded(Theme::marker_style(), state.marker_opacity) {
                if let Ok(col) = u16::try_from(center) {
                    if col < inner.width {
                        buf.set_string(inner.x + col, axis_y, "◆", style);
                        let step = if below { 1 } else { -1 };
                        for r in 1..CONNECTOR_ROWS {
                            if let Ok(row) = u16::try_from(axis_row + step * r) {
                                if row < inner.height {
                                    buf.set_string(inner.x + col, inner.y + row, "│", style);
                                }
                            }
                        }
                    }
                }
            }

            let Some(paragraph) = card(segment, state) else {
                continue;
            };
            let width = ((slot_cols as f64 * state.scale).round() as u16).max(8);
            let lift = (state.translate_offset / CELL_H_PX).round() as i32;
            let top = if below {
                axis_row + CONNECTOR_ROWS + lift
            } else {
                axis_row - CONNECTOR_ROWS - i32::from(CARD_ROWS) + 1 + lift
            };
            let x = center - i32::from(width) / 2;
            render_clipped(paragraph, x, top, width, CARD_ROWS, inner, buf);
        }

        // ── progress ───────────────────────────────────────────
        let percent = (progress * 100.0).round() as u32;
        let bar_cols = 20usize;
        let filled = ((progress * bar_cols as f64).round() as usize).min(bar_cols);
        let line = Line::from(vec![
            Span::styled("▰".repeat(filled), Theme::accent_style()),
            Span::styled("▱".repeat(bar_cols - filled), Theme::border_style()),
            Span::styled(format!(" {percent:>3}%"), Theme::hud_style()),
            Span::styled(
                if self.section.is_compact() { "  compact" } else { "" },
                Theme::border_style(),
            ),
        ]);
        let last = inner.y + inner.height - 1;
        buf.set_line(inner.x + 1, last, &line, inner.width.saturating_sub(1));
    }
}
