//! Scroll position → normalized progress for a pinned ("sticky") section.
//!
//! A pinned section is taller than the viewport.  While its top edge has
//! scrolled above the viewport and its bottom edge is still below it, the
//! inner content stays fixed on screen and progress advances from 0 to 1.

use super::easing::clamp01;

/// Geometry of the tracked element relative to the viewport, sampled once
/// per scroll/resize event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    /// Distance from the viewport top to the element top (negative once the
    /// element has scrolled past the top edge).
    pub top: f64,
    /// Distance from the viewport top to the element bottom.
    pub bottom: f64,
    pub viewport_height: f64,
}

impl ScrollFrame {
    pub fn new(top: f64, bottom: f64, viewport_height: f64) -> Self {
        Self {
            top,
            bottom,
            viewport_height,
        }
    }

    /// Build a frame from an element's document offset and height plus the
    /// current scroll position.
    pub fn from_document(element_top: f64, element_height: f64, scroll_y: f64, viewport_height: f64) -> Self {
        let top = element_top - scroll_y;
        Self::new(top, top + element_height, viewport_height)
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// How far the element can scroll while pinned.
    pub fn scrollable_height(&self) -> f64 {
        self.height() - self.viewport_height
    }

    pub fn pin_state(&self) -> PinState {
        if self.top > 0.0 {
            PinState::Before
        } else if self.bottom <= self.viewport_height {
            PinState::After
        } else {
            PinState::Pinned
        }
    }

    /// Fraction of the viewport covered by the element, in `[0, 1]`.
    pub fn visible_fraction(&self) -> f64 {
        if self.viewport_height <= 0.0 {
            return 0.0;
        }
        if self.top > self.viewport_height || self.bottom < 0.0 {
            return 0.0;
        }
        let visible = self.bottom.min(self.viewport_height) - self.top.max(0.0);
        clamp01(visible / self.viewport_height)
    }

    /// Fraction of the element itself that is on screen, in `[0, 1]`.
    /// Zero-height elements count as fully visible while inside the viewport.
    pub fn intersection_ratio(&self) -> f64 {
        let height = self.height();
        if self.top > self.viewport_height || self.bottom < 0.0 {
            return 0.0;
        }
        if height <= 0.0 {
            return 1.0;
        }
        let visible = self.bottom.min(self.viewport_height) - self.top.max(0.0);
        clamp01(visible / height)
    }
}

/// Where the viewport is relative to the pinned region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinState {
    /// Element top is still below the viewport top.
    Before,
    /// Element is held on screen; progress is advancing.
    Pinned,
    /// Element bottom has risen to or above the viewport bottom.
    After,
}

/// Pure progress function.  Never divides by a non-positive height: a
/// section no taller than the viewport jumps straight to 1 at the pin point.
pub fn compute_progress(frame: &ScrollFrame) -> f64 {
    if frame.top > 0.0 {
        return 0.0;
    }
    let scrollable = frame.scrollable_height();
    if scrollable <= 0.0 || frame.bottom <= frame.viewport_height {
        return 1.0;
    }
    clamp01(frame.top.abs() / scrollable)
}

/// Draw progress of a connector running from `start` down to `end`, both
/// measured from the viewport top.  The line fills as the viewport bottom
/// passes over it; a zero-length line is drawn whole once reached.
pub fn line_progress(viewport_bottom: f64, start: f64, end: f64) -> f64 {
    if viewport_bottom <= start {
        return 0.0;
    }
    let length = end - start;
    if length <= 0.0 {
        return 1.0;
    }
    clamp01((viewport_bottom - start) / length)
}

/// One-way reveal flags for a fixed list of elements.  An element is
/// revealed the first time at least `threshold` of it is on screen and
/// stays revealed.
#[derive(Debug, Clone)]
pub struct RevealLatch {
    revealed: Vec<bool>,
    threshold: f64,
}

impl RevealLatch {
    pub fn new(count: usize, threshold: f64) -> Self {
        Self {
            revealed: vec![false; count],
            threshold: clamp01(threshold),
        }
    }

    /// Feed the current intersection ratio of element `index`.  Returns
    /// `true` only on the call that reveals it.
    pub fn observe(&mut self, index: usize, ratio: f64) -> bool {
        let threshold = self.threshold;
        match self.revealed.get_mut(index) {
            Some(flag) if !*flag && ratio > 0.0 && ratio >= threshold => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }
}

/// Result of feeding one frame into the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerUpdate {
    pub progress: f64,
    pub state: PinState,
    /// `true` on the first update that found the section pinned after it
    /// was not.
    pub entered: bool,
}

/// Stateful wrapper around [`compute_progress`] that watches the pin edge.
#[derive(Debug, Clone, Default)]
pub struct ScrollProgressTracker {
    progress: f64,
    was_pinned: bool,
    entries: u64,
}

impl ScrollProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, frame: &ScrollFrame) -> TrackerUpdate {
        let state = frame.pin_state();
        let pinned = state == PinState::Pinned;
        let entered = pinned && !self.was_pinned;
        if entered {
            // Drop whatever the previous pass through the section left behind.
            self.progress = 0.0;
            self.entries += 1;
        }
        self.was_pinned = pinned;
        self.progress = compute_progress(frame);
        TrackerUpdate {
            progress: self.progress,
            state,
            entered,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Number of times the section has been entered since construction.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f64 = 800.0;

    fn frame_at(top: f64, height: f64) -> ScrollFrame {
        ScrollFrame::new(top, top + height, VH)
    }

    #[test]
    fn zero_before_entry_and_one_after_exit() {
        let h = 4.0 * VH;
        assert_eq!(compute_progress(&frame_at(10.0, h)), 0.0);
        assert_eq!(compute_progress(&frame_at(-(h - VH), h)), 1.0);
        assert_eq!(compute_progress(&frame_at(-h * 2.0, h)), 1.0);
    }

    #[test]
    fn pinned_scenario_matches_ratio() {
        // 400vh element, 800 px viewport, top at -1200.
        let h = 4.0 * VH;
        let p = compute_progress(&frame_at(-1200.0, h));
        assert!((p - 1200.0 / (h - VH)).abs() < 1e-12);
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_height_is_terminal_at_pin_point() {
        // Exactly viewport-sized element.
        assert_eq!(compute_progress(&frame_at(0.0, VH)), 1.0);
        assert_eq!(compute_progress(&frame_at(-50.0, VH)), 1.0);
        // Shorter than the viewport, not yet at the pin point.
        assert_eq!(compute_progress(&frame_at(25.0, VH / 2.0)), 0.0);
        // Zero-height element at the top edge.
        assert_eq!(compute_progress(&frame_at(0.0, 0.0)), 1.0);
    }

    #[test]
    fn tracker_reports_entry_once_per_pass() {
        let h = 3.0 * VH;
        let mut t = ScrollProgressTracker::new();

        assert!(!t.update(&frame_at(100.0, h)).entered);
        let first = t.update(&frame_at(-10.0, h));
        assert!(first.entered);
        assert_eq!(first.state, PinState::Pinned);
        assert!(!t.update(&frame_at(-400.0, h)).entered);

        // Leave past the bottom, then scroll back into the pinned region.
        assert_eq!(t.update(&frame_at(-h, h)).state, PinState::After);
        let again = t.update(&frame_at(-800.0, h));
        assert!(again.entered);
        assert!((again.progress - 0.5).abs() < 1e-12);
        assert_eq!(t.entries(), 2);
    }

    #[test]
    fn visible_fraction_covers_partial_overlap() {
        assert_eq!(frame_at(900.0, VH).visible_fraction(), 0.0);
        assert_eq!(frame_at(-100.0, 4.0 * VH).visible_fraction(), 1.0);
        assert!((frame_at(400.0, VH).visible_fraction() - 0.5).abs() < 1e-12);
        assert_eq!(ScrollFrame::new(0.0, 10.0, 0.0).visible_fraction(), 0.0);
    }

    #[test]
    fn intersection_ratio_is_relative_to_the_element() {
        assert_eq!(ScrollFrame::new(100.0, 300.0, VH).intersection_ratio(), 1.0);
        assert!((ScrollFrame::new(700.0, 900.0, VH).intersection_ratio() - 0.5).abs() < 1e-12);
        assert_eq!(ScrollFrame::new(900.0, 1100.0, VH).intersection_ratio(), 0.0);
        assert_eq!(ScrollFrame::new(-300.0, -100.0, VH).intersection_ratio(), 0.0);
    }

    #[test]
    fn line_fills_as_the_viewport_bottom_passes() {
        assert_eq!(line_progress(800.0, 900.0, 1100.0), 0.0);
        assert_eq!(line_progress(900.0, 900.0, 1100.0), 0.0);
        assert!((line_progress(1000.0, 900.0, 1100.0) - 0.5).abs() < 1e-12);
        assert_eq!(line_progress(1500.0, 900.0, 1100.0), 1.0);
        // Degenerate line.
        assert_eq!(line_progress(901.0, 900.0, 900.0), 1.0);
        assert_eq!(line_progress(899.0, 900.0, 900.0), 0.0);
    }

    #[test]
    fn reveal_latch_fires_once_at_threshold() {
        let mut latch = RevealLatch::new(3, 0.2);
        assert!(!latch.observe(1, 0.19));
        assert!(!latch.is_revealed(1));
        assert!(latch.observe(1, 0.2));
        assert!(!latch.observe(1, 0.9));
        // Scrolling away does not hide it again.
        assert!(!latch.observe(1, 0.0));
        assert!(latch.is_revealed(1));
        assert_eq!(latch.revealed_count(), 1);
        // Out of range indices are ignored.
        assert!(!latch.observe(7, 1.0));
        assert!(!latch.is_revealed(7));
    }
}
