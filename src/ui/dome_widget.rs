//! Culture dome: a ring of labels that turns with the scroll-driven angle.

use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::app::sections::DomeSection;

use super::theme::Theme;

/// Vertical squash of the ring, as seen from slightly above.
const TILT: f64 = 0.35;

pub struct DomeWidget<'a> {
    section: &'a DomeSection,
    labels: &'a [&'a str],
    block: Option<Block<'a>>,
}

impl<'a> DomeWidget<'a> {
    pub fn new(section: &'a DomeSection, labels: &'a [&'a str]) -> Self {
        Self {
            section,
            labels,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

/// Cell position and depth (`1` nearest the viewer) of label `index` on a
/// ring of `count` turned by `angle`.
pub fn ring_position(index: usize, count: usize, angle: f64, area: Rect) -> (u16, u16, f64) {
    let theta = angle + index as f64 * TAU / count.max(1) as f64;
    let cx = f64::from(area.width) / 2.0;
    let cy = f64::from(area.height) / 2.0;
    let rx = f64::from(area.width) * 0.38;
    let ry = f64::from(area.height) * TILT;
    let x = cx + rx * theta.sin();
    let y = cy + ry * theta.cos();
    let x = x.round().clamp(0.0, f64::from(area.width.saturating_sub(1))) as u16;
    let y = y.round().clamp(0.0, f64::from(area.height.saturating_sub(1))) as u16;
    (area.x + x, area.y + y, theta.cos())
}

impl<'a> Widget for DomeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.height < 3 || inner.width < 10 {
            return;
        }

        let angle = self.section.angle();
        // Back of the ring first so the front labels overwrite it.
        let mut placed: Vec<(u16, u16, f64, &str)> = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let (x, y, depth) = ring_position(i, self.labels.len(), angle, inner);
                (x, y, depth, *label)
            })
            .collect();
        placed.sort_by(|a, b| a.2.total_cmp(&b.2));

        for (x, y, depth, label) in placed {
            let opacity = 0.3 + 0.7 * (depth + 1.0) / 2.0;
            let Some(style) = Theme::faded(Theme::accent_style(), opacity) else {
                continue;
            };
            let half = (label.chars().count() / 2) as u16;
            let x = x.saturating_sub(half).max(inner.x);
            let room = inner.x + inner.width - x;
            buf.set_stringn(x, y, label, room as usize, style);
        }

        let title = "CULTURE";
        let cx = inner.x + (inner.width / 2).saturating_sub(title.len() as u16 / 2);
        buf.set_string(cx, inner.y + inner.height / 2, title, Theme::heading_style());

        if self.section.is_rotating() {
            let hint = Line::from(vec![
                Span::styled("Scroll to rotate: ", Theme::hud_style().add_modifier(Modifier::DIM)),
                Span::styled(format!("{}%", self.section.percent()), Theme::marker_style()),
            ]);
            let width = hint.width() as u16;
            let x = inner.x + (inner.width.saturating_sub(width)) / 2;
            buf.set_line(x, inner.y + inner.height - 1, &hint, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_positions_stay_inside_the_area() {
        let area = Rect::new(2, 3, 40, 12);
        for i in 0..12 {
            for step in 0..8 {
                let (x, y, depth) = ring_position(i, 12, step as f64 * 0.8, area);
                assert!(x >= area.x && x < area.x + area.width);
                assert!(y >= area.y && y < area.y + area.height);
                assert!((-1.0..=1.0).contains(&depth));
            }
        }
    }

    #[test]
    fn first_label_faces_the_viewer_at_rest() {
        let area = Rect::new(0, 0, 40, 20);
        let (x, y, depth) = ring_position(0, 4, 0.0, area);
        assert_eq!((x, y), (20, 17));
        assert!((depth - 1.0).abs() < 1e-12);
    }
}
