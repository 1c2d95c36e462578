//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::card_stack::CardStack;
use crate::core::stl::Mesh;
use crate::ui::layout::AppLayout;
use crate::ui::smooth_scroll::SmoothScroll;

use super::content;
use super::page::{Page, SectionKind, Viewport};
use super::sections::{CardStackSection, DomeSection, GlobeSection, StorySection, TimelineSection, TributeSection};

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    pub page: Page,
    /// Last known terminal size.
    pub terminal_area: Rect,
    /// Stage size in virtual pixels.
    pub viewport: Viewport,
    /// Forced compact layout (`--compact`).
    pub force_compact: bool,
    pub scroll: SmoothScroll,
    pub timeline: TimelineSection,
    pub dome: DomeSection,
    pub globe: GlobeSection,
    pub cards: CardStackSection,
    pub story: StorySection,
    pub tribute: TributeSection,
    /// Optional 3D map mesh shown after the globe zoom.
    pub mesh: Option<Arc<Mesh>>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Time of the last [`update`](Self::update).
    pub now: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, terminal_area: Rect, force_compact: bool, now: Instant) -> Self {
        let viewport = Self::effective_viewport(&config, Self::stage_viewport(terminal_area), force_compact);
        let compact = config.motion.strip.is_compact(viewport.width);
        let page = Page::mykolachi(compact);
        let mut scroll = SmoothScroll::new(config.motion.scroll_smoothing);
        scroll.set_max(page.max_scroll(viewport.height));
        let timeline = TimelineSection::new(content::timeline_segments(), viewport, &config.motion);
        let dome = DomeSection::new(&config.motion, now);
        let cards = CardStackSection::new(CardStack::new(content::culture_cards()));
        let story = StorySection::new(content::STORY.len(), &config.motion);
        let tribute = TributeSection::new(content::TESTIMONIALS.len(), &config.motion);
        let mut state = Self {
            config,
            page,
            terminal_area,
            viewport,
            force_compact,
            scroll,
            timeline,
            dome,
            globe: GlobeSection::default(),
            cards,
            story,
            tribute,
            mesh: None,
            should_quit: false,
            status_message: None,
            now,
        };
        state.update(now);
        state
    }

    fn stage_viewport(terminal_area: Rect) -> Viewport {
        let stage = AppLayout::from_area(terminal_area).stage_area;
        Viewport::from_cells(stage.width, stage.height)
    }

    /// A forced compact layout narrows the viewport the core sees to just
    /// under the breakpoint.
    fn effective_viewport(config: &AppConfig, viewport: Viewport, force_compact: bool) -> Viewport {
        let breakpoint = config.motion.strip.breakpoint;
        if force_compact && viewport.width >= breakpoint {
            Viewport {
                width: (breakpoint - 1.0).max(1.0),
                ..viewport
            }
        } else {
            viewport
        }
    }

    /// Terminal resized.  Geometry is recomputed on the next update.
    pub fn resize(&mut self, terminal_area: Rect) {
        let old_height = self.viewport.height;
        self.terminal_area = terminal_area;
        let viewport = Self::stage_viewport(terminal_area);
        self.viewport = Self::effective_viewport(&self.config, viewport, self.force_compact);
        let compact = self.config.motion.strip.is_compact(self.viewport.width);
        self.page = Page::mykolachi(compact);

        // Keep the same relative position in the document.
        let ratio = if old_height > 0.0 {
            self.scroll.offset() / old_height
        } else {
            0.0
        };
        self.scroll.set_max(self.page.max_scroll(self.viewport.height));
        self.scroll.jump_to(ratio * self.viewport.height);
        tracing::debug!(width = self.viewport.width, height = self.viewport.height, compact, "resized");
    }

    /// Advance one frame: ease the page scroll, then recompute every
    /// section from the resulting geometry.
    pub fn update(&mut self, now: Instant) {
        self.now = now;
        self.scroll.tick();
        let scroll_y = self.scroll.offset();
        let vh = self.viewport.height;
        let motion = &self.config.motion;

        if let Some(frame) = self.page.frame(SectionKind::Origins, scroll_y, vh) {
            self.timeline.update(&frame, self.viewport, motion);
        }
        if let Some(frame) = self.page.frame(SectionKind::Dome, scroll_y, vh) {
            self.dome.update(&frame, now, motion);
        }
        if let Some(frame) = self.page.frame(SectionKind::Geography, scroll_y, vh) {
            self.globe.update(&frame, now, motion);
        }
        if let Some(frame) = self.page.frame(SectionKind::CultureStack, scroll_y, vh) {
            self.cards.update(&frame, now, motion);
        }
        if let Some(frame) = self.page.frame(SectionKind::ThenVsNow, scroll_y, vh) {
            self.story.update(&frame, self.viewport, motion);
        }
        if let Some(frame) = self.page.frame(SectionKind::Tribute, scroll_y, vh) {
            self.tribute.update(&frame, now, motion);
        }
    }

    pub fn current_section(&self) -> Option<SectionKind> {
        self.page.dominant(self.scroll.offset(), self.viewport.height)
    }

    /// Fraction of the whole document scrolled.
    pub fn page_progress(&self) -> f64 {
        let max = self.page.max_scroll(self.viewport.height);
        if max <= 0.0 {
            1.0
        } else {
            (self.scroll.offset() / max).clamp(0.0, 1.0)
        }
    }

    /// Release every section's timers and animations.
    pub fn teardown(&mut self) {
        self.globe.unmount();
        self.dome.teardown();
        self.cards.teardown();
        self.tribute.teardown();
    }
}
