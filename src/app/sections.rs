//! Per-section controllers.
//!
//! Each section owns its own trackers and timers.  Sections with timed
//! effects mount when they scroll into view and unmount when they leave;
//! unmounting drops the [`MountGuard`], which cancels everything the mount
//! scheduled, and the next mount starts fresh.

use std::time::{Duration, Instant};

use crate::config::MotionConfig;
use crate::core::card_stack::CardStack;
use crate::core::geo::GeoView;
use crate::core::lifecycle::{IntervalTimer, MountGuard};
use crate::core::marquee::Marquee;
use crate::core::phase::{Phase, PhaseStateMachine, TriggerSource};
use crate::core::progress::{line_progress, RevealLatch, ScrollFrame, ScrollProgressTracker};
use crate::core::rotation::RotationFollower;
use crate::core::segments::{compute_segment_states, Segment, SegmentVisualState, StripMetrics};
use crate::core::typewriter::Typewriter;

use super::content;
use super::page::{StoryLayout, Viewport};

/// An [`IntervalTimer`] that only exists while its section is on screen.
/// Every appearance starts a fresh mount and period.
#[derive(Debug, Default)]
struct VisibleTicker {
    timer: Option<(MountGuard, IntervalTimer)>,
}

impl VisibleTicker {
    /// Periods elapsed since the last poll; 0 while hidden.
    fn poll(&mut self, visible: bool, now: Instant, period: Duration) -> u32 {
        match (&mut self.timer, visible) {
            (None, true) => {
                let guard = MountGuard::new(now);
                let timer = IntervalTimer::new(now, period, guard.token());
                self.timer = Some((guard, timer));
                0
            }
            (Some(_), false) => {
                self.timer = None;
                0
            }
            (Some((_, timer)), true) => timer.poll(now),
            (None, false) => 0,
        }
    }

    fn stop(&mut self) {
        self.timer = None;
    }

    fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}

// ───────────────────────────────────────── timeline ──────────

/// Horizontally scrubbing timeline pinned for the height of its section.
pub struct TimelineSection {
    segments: Vec<Segment>,
    tracker: ScrollProgressTracker,
    states: Vec<SegmentVisualState>,
    metrics: StripMetrics,
    compact: bool,
}

impl TimelineSection {
    pub fn new(segments: Vec<Segment>, viewport: Viewport, motion: &MotionConfig) -> Self {
        let compact = motion.strip.is_compact(viewport.width);
        let metrics = StripMetrics::measure(motion.strip.select(viewport.width), segments.len(), viewport.width);
        let states = compute_segment_states(0.0, &segments, &motion.segment_curve);
        Self {
            segments,
            tracker: ScrollProgressTracker::new(),
            states,
            metrics,
            compact,
        }
    }

    /// Recompute from the current frame.  Strip metrics depend on the
    /// viewport width, so they are rebuilt on every call.
    pub fn update(&mut self, frame: &ScrollFrame, viewport: Viewport, motion: &MotionConfig) {
        let update = self.tracker.update(frame);
        if update.entered {
            tracing::debug!(entries = self.tracker.entries(), "timeline pinned");
        }
        self.compact = motion.strip.is_compact(viewport.width);
        let layout = motion.strip.select(viewport.width);
        self.metrics = StripMetrics::measure(layout, self.segments.len(), viewport.width);
        self.states = compute_segment_states(update.progress, &self.segments, &motion.segment_curve);
    }

    pub fn progress(&self) -> f64 {
        self.tracker.progress()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn states(&self) -> &[SegmentVisualState] {
        &self.states
    }

    pub fn metrics(&self) -> &StripMetrics {
        &self.metrics
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }
}

// ───────────────────────────────────────── dome ──────────────

/// Culture dome: rotates a full turn across its pinned scroll range.
pub struct DomeSection {
    guard: MountGuard,
    tracker: ScrollProgressTracker,
    follower: RotationFollower,
    in_view: bool,
    visible: f64,
}

impl DomeSection {
    pub fn new(motion: &MotionConfig, now: Instant) -> Self {
        let guard = MountGuard::new(now);
        let follower = RotationFollower::new(motion.rotation, guard.token());
        Self {
            guard,
            tracker: ScrollProgressTracker::new(),
            follower,
            in_view: false,
            visible: 0.0,
        }
    }

    pub fn update(&mut self, frame: &ScrollFrame, now: Instant, motion: &MotionConfig) {
        self.visible = frame.visible_fraction();
        let in_view = self.visible >= motion.rotation.min_visible;
        if in_view != self.in_view {
            self.in_view = in_view;
            if in_view {
                tracing::debug!("dome entered view");
                self.follower.enter_view(now);
            } else {
                tracing::debug!("dome left view");
                self.follower.leave_view();
            }
        }
        let update = self.tracker.update(frame);
        if self.in_view {
            self.follower.on_scroll(update.progress, self.visible);
        }
        self.follower.step(now);
    }

    pub fn angle(&self) -> f64 {
        self.follower.angle()
    }

    pub fn percent(&self) -> u32 {
        self.follower.percent()
    }

    pub fn is_rotating(&self) -> bool {
        self.follower.is_rotating()
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    pub fn teardown(&mut self) {
        self.guard.token().cancel();
    }
}

// ───────────────────────────────────────── globe ─────────────

/// State that exists only while the globe section is on screen.
pub struct GlobeMount {
    guard: MountGuard,
    machine: PhaseStateMachine<GeoView>,
    typewriter: Typewriter,
    last_tick: Instant,
}

impl GlobeMount {
    fn new(motion: &MotionConfig, now: Instant) -> Self {
        let guard = MountGuard::new(now);
        let machine = PhaseStateMachine::new(
            GeoView::ORBITAL,
            GeoView::KARACHI,
            motion.phase,
            now,
            guard.token(),
        );
        Self {
            guard,
            machine,
            typewriter: Typewriter::new(content::CITY_FACTS.iter().copied(), motion.typewriter),
            last_tick: now,
        }
    }

    fn tick(&mut self, now: Instant) {
        self.machine.tick(now);
        let dt = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        if self.machine.phase() != Phase::Initial {
            self.typewriter.advance(dt);
        }
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn view(&self) -> GeoView {
        self.machine.current()
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn transition_progress(&self, now: Instant) -> f64 {
        self.machine.transition_progress(now)
    }

    pub fn auto_trigger_in(&self, now: Instant) -> Option<Duration> {
        self.machine.auto_trigger_in(now)
    }

    pub fn mounted_at(&self) -> Instant {
        self.guard.mounted_at()
    }
}

/// Globe → 3D map section.  Mounted while any part of it is visible.
#[derive(Default)]
pub struct GlobeSection {
    mount: Option<GlobeMount>,
    mounts: u64,
}

impl GlobeSection {
    pub fn update(&mut self, frame: &ScrollFrame, now: Instant, motion: &MotionConfig) {
        let visible = frame.visible_fraction() > 0.0;
        match (&mut self.mount, visible) {
            (None, true) => {
                self.mounts += 1;
                tracing::info!(mount = self.mounts, "globe mounted");
                let mut mount = GlobeMount::new(motion, now);
                mount.tick(now);
                self.mount = Some(mount);
            }
            (Some(_), false) => self.unmount(),
            (Some(mount), true) => mount.tick(now),
            (None, false) => {}
        }
    }

    /// User click on the globe.  Returns `true` if it started the zoom.
    pub fn click(&mut self, now: Instant) -> bool {
        self.mount
            .as_mut()
            .is_some_and(|m| m.machine.trigger(TriggerSource::Click, now))
    }

    pub fn unmount(&mut self) {
        if let Some(mut mount) = self.mount.take() {
            tracing::info!(phase = mount.phase().label(), "globe unmounted");
            mount.machine.teardown();
        }
    }

    pub fn mounted(&self) -> Option<&GlobeMount> {
        self.mount.as_ref()
    }

    pub fn mount_count(&self) -> u64 {
        self.mounts
    }
}

// ───────────────────────────────────────── card stack ────────

/// Culture card stack; cycles on a fixed interval while on screen.
pub struct CardStackSection {
    stack: CardStack,
    ticker: VisibleTicker,
}

impl CardStackSection {
    pub fn new(stack: CardStack) -> Self {
        Self {
            stack,
            ticker: VisibleTicker::default(),
        }
    }

    pub fn update(&mut self, frame: &ScrollFrame, now: Instant, motion: &MotionConfig) {
        let visible = frame.visible_fraction() > 0.0;
        let ticks = self.ticker.poll(visible, now, motion.card_interval);
        self.stack.rotate_by(ticks);
    }

    pub fn send_top_to_back(&mut self) {
        if let Some(id) = self.stack.top().map(|c| c.id) {
            self.stack.send_to_back(id);
        }
    }

    pub fn stack(&self) -> &CardStack {
        &self.stack
    }

    pub fn is_cycling(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn teardown(&mut self) {
        self.ticker.stop();
    }
}

// ───────────────────────────────────────── then vs now ───────

/// Before/after story: cards fade in once seen, and the connector below
/// each card draws itself as the viewport bottom passes over its gap.
pub struct StorySection {
    layout: StoryLayout,
    latch: RevealLatch,
    lines: Vec<f64>,
    compact: bool,
}

impl StorySection {
    pub fn new(cards: usize, motion: &MotionConfig) -> Self {
        Self {
            layout: StoryLayout::default(),
            latch: RevealLatch::new(cards, motion.reveal_threshold),
            lines: vec![0.0; cards.saturating_sub(1)],
            compact: false,
        }
    }

    pub fn update(&mut self, frame: &ScrollFrame, viewport: Viewport, motion: &MotionConfig) {
        let vh = frame.viewport_height;
        self.compact = viewport.width < motion.story_breakpoint;

        for index in 0..self.card_count() {
            let (top, bottom) = self.layout.card_span(index, vh);
            let card = ScrollFrame::new(frame.top + top, frame.top + bottom, vh);
            if self.latch.observe(index, card.intersection_ratio()) {
                tracing::debug!(card = index, "story card revealed");
            }
        }
        for (index, line) in self.lines.iter_mut().enumerate() {
            *line = if self.compact {
                1.0
            } else {
                let (start, end) = self.layout.connector_span(index, vh);
                line_progress(vh, frame.top + start, frame.top + end)
            };
        }
    }

    pub fn card_count(&self) -> usize {
        self.lines.len() + 1
    }

    /// Compact layouts show every card without waiting for it to be seen.
    pub fn card_shown(&self, index: usize) -> bool {
        index < self.card_count() && (self.compact || self.latch.is_revealed(index))
    }

    /// Draw progress of the connector below each card but the last.
    pub fn lines(&self) -> &[f64] {
        &self.lines
    }

    pub fn layout(&self) -> &StoryLayout {
        &self.layout
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }
}

// ───────────────────────────────────────── tribute ───────────

/// Testimonial marquee; steps one pixel per period while on screen.
pub struct TributeSection {
    marquee: Marquee,
    ticker: VisibleTicker,
}

impl TributeSection {
    pub fn new(items: usize, motion: &MotionConfig) -> Self {
        Self {
            marquee: Marquee::new(items, motion.marquee_card_px),
            ticker: VisibleTicker::default(),
        }
    }

    pub fn update(&mut self, frame: &ScrollFrame, now: Instant, motion: &MotionConfig) {
        let visible = frame.visible_fraction() > 0.0;
        let steps = self.ticker.poll(visible, now, motion.marquee_speed.step_period());
        self.marquee.advance(steps);
    }

    pub fn marquee(&self) -> &Marquee {
        &self.marquee
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn teardown(&mut self) {
        self.ticker.stop();
    }
}
