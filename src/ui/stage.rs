//! The stage: one viewport onto the virtual page.
//!
//! Every section that overlaps the viewport is drawn at its on-screen
//! position.  Sticky sections keep their content fixed to the top of the
//! stage for the length of their scroll range; flowing sections are drawn
//! at full height and slide past.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::app::content;
use crate::app::page::{SectionKind, SectionSpec, CELL_H_PX};
use crate::app::state::AppState;
use crate::core::progress::ScrollFrame;

use super::blit::render_clipped;
use super::dome_widget::DomeWidget;
use super::globe_widget::GlobeWidget;
use super::panels::{CardStackPanel, FooterPanel, HeroPanel};
use super::story_widget::StoryWidget;
use super::timeline_widget::TimelineWidget;
use super::tribute_widget::TributeWidget;

/// Top of a section's viewport-high content, in pixels relative to the
/// viewport.  Tall sections stick at 0 while pinned.
pub fn sticky_top(frame: &ScrollFrame) -> f64 {
    frame.top.max((frame.bottom - frame.viewport_height).min(0.0))
}

/// Pixel rows `[top, bottom)` the section's content occupies on screen.
pub fn content_span(spec: &SectionSpec, frame: &ScrollFrame) -> (f64, f64) {
    if spec.sticky {
        let top = sticky_top(frame);
        (top, frame.bottom.min(top + frame.viewport_height))
    } else {
        (frame.top, frame.bottom)
    }
}

/// Section drawn at `y_px` (virtual pixels from the stage top).  Later
/// sections paint over earlier ones, so the last match wins.
pub fn hit_test(state: &AppState, y_px: f64) -> Option<SectionKind> {
    let scroll_y = state.scroll.offset();
    let vh = state.viewport.height;
    state
        .page
        .sections()
        .iter()
        .filter(|spec| {
            state.page.frame(spec.kind, scroll_y, vh).is_some_and(|frame| {
                let (top, bottom) = content_span(spec, &frame);
                (top..bottom).contains(&y_px)
            })
        })
        .last()
        .map(|spec| spec.kind)
}

pub struct Stage<'a> {
    state: &'a AppState,
}

impl<'a> Stage<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn render_section<W: Widget>(&self, widget: W, spec: &SectionSpec, frame: &ScrollFrame, area: Rect, buf: &mut Buffer) {
        let (top, bottom) = content_span(spec, frame);
        let y = (top / CELL_H_PX).round() as i32;
        let bottom = (bottom / CELL_H_PX).round() as i32;
        let max_rows = if spec.sticky {
            i32::from(area.height)
        } else {
            i32::from(u16::MAX)
        };
        let rows = (bottom - y).clamp(0, max_rows);
        render_clipped(widget, 0, y, area.width, rows as u16, area, buf);
    }
}

impl<'a> Widget for Stage<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let scroll_y = state.scroll.offset();
        let vh = state.viewport.height;

        for spec in state.page.sections() {
            let Some(frame) = state.page.frame(spec.kind, scroll_y, vh) else {
                continue;
            };
            if frame.visible_fraction() <= 0.0 {
                continue;
            }
            match spec.kind {
                SectionKind::Hero => self.render_section(HeroPanel, spec, &frame, area, buf),
                SectionKind::Geography => {
                    let widget = GlobeWidget::new(&state.globe, state.now).mesh(state.mesh.as_deref());
                    self.render_section(widget, spec, &frame, area, buf);
                }
                SectionKind::Origins => {
                    self.render_section(TimelineWidget::new(&state.timeline), spec, &frame, area, buf)
                }
                SectionKind::Dome => self.render_section(
                    DomeWidget::new(&state.dome, content::DOME_LABELS),
                    spec,
                    &frame,
                    area,
                    buf,
                ),
                SectionKind::CultureStack => {
                    self.render_section(CardStackPanel::new(state.cards.stack()), spec, &frame, area, buf)
                }
                SectionKind::ThenVsNow => self.render_section(
                    StoryWidget::new(&state.story, content::STORY, vh),
                    spec,
                    &frame,
                    area,
                    buf,
                ),
                SectionKind::Tribute => self.render_section(
                    TributeWidget::new(&state.tribute, content::TESTIMONIALS, content::CITY_STATS),
                    spec,
                    &frame,
                    area,
                    buf,
                ),
                SectionKind::Footer => self.render_section(FooterPanel, spec, &frame, area, buf),
            }
        }
    }
}
