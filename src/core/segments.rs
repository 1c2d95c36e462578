//! Fan a section's global progress out to its ordered segments.
//!
//! Segment `i` of `N` owns the window `[i/N, (i+1)/N)`.  Inside that window
//! the segment fades and scales in; the whole strip pans horizontally so the
//! active segment drifts through the middle of the viewport.

use super::easing::clamp01;

/// Which side of the timeline axis a segment hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPosition {
    AboveLine,
    BelowLine,
}

impl SegmentPosition {
    /// Alternate above/below, starting above.
    pub fn alternating(index: usize) -> Self {
        if index % 2 == 0 {
            Self::AboveLine
        } else {
            Self::BelowLine
        }
    }
}

/// One immutable content item in a segmented section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    /// Short label shown on the axis (a year, a category).
    pub heading: String,
    pub title: String,
    pub body: String,
    pub position: SegmentPosition,
}

impl Segment {
    pub fn new(
        index: usize,
        heading: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            index,
            heading: heading.into(),
            title: title.into(),
            body: body.into(),
            position: SegmentPosition::alternating(index),
        }
    }
}

/// Per-segment visual parameters derived from progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentVisualState {
    pub local_progress: f64,
    pub is_active: bool,
    pub opacity: f64,
    pub scale: f64,
    /// Vertical lift in pixels; shrinks to 0 as the segment settles.
    pub translate_offset: f64,
    /// Scale of the segment's marker image.
    pub media_scale: f64,
    /// Opacity of the axis marker (dimmed until the segment is active).
    pub marker_opacity: f64,
}

/// Shape of the per-segment fade/scale curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentCurve {
    /// `opacity = min(1, local * fade_gain)`.
    pub fade_gain: f64,
    /// `scale = scale_base + local * (1 - scale_base)`.
    pub scale_base: f64,
    /// `translate_offset = (1 - local) * rise_px`.
    pub rise_px: f64,
    pub media_scale_base: f64,
    pub inactive_marker_opacity: f64,
}

impl Default for SegmentCurve {
    fn default() -> Self {
        Self {
            fade_gain: 2.5,
            scale_base: 0.92,
            rise_px: 15.0,
            media_scale_base: 0.85,
            inactive_marker_opacity: 0.3,
        }
    }
}

impl SegmentCurve {
    /// Visual state of segment `index` out of `count` at global `progress`.
    pub fn state_for(&self, progress: f64, index: usize, count: usize) -> SegmentVisualState {
        let n = count.max(1) as f64;
        let start = index as f64 / n;
        let end = (index + 1) as f64 / n;
        let local = clamp01((progress - start) / (end - start));
        let is_active = progress >= start;
        SegmentVisualState {
            local_progress: local,
            is_active,
            opacity: (local * self.fade_gain).min(1.0),
            scale: self.scale_base + local * (1.0 - self.scale_base),
            translate_offset: (1.0 - local) * self.rise_px,
            media_scale: self.media_scale_base + local * (1.0 - self.media_scale_base),
            marker_opacity: if is_active {
                1.0
            } else {
                self.inactive_marker_opacity
            },
        }
    }
}

/// Visual state for every segment, in order.  Pure: no hidden state.
pub fn compute_segment_states(
    progress: f64,
    segments: &[Segment],
    curve: &SegmentCurve,
) -> Vec<SegmentVisualState> {
    let count = segments.len();
    segments
        .iter()
        .enumerate()
        .map(|(i, _)| curve.state_for(progress, i, count))
        .collect()
}

// ───────────────────────────────────────── strip layout ──────

/// Where the first segment sits at progress 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartAnchor {
    /// First segment centred in the viewport.
    Centered,
    /// Left edge at this fraction of the viewport width.
    Fraction(f64),
}

/// How far the strip pans between progress 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollExtent {
    /// Bring the strip end to the viewport centre, plus
    /// `trailing_margin * viewport_width` of extra travel.
    CenterLast { trailing_margin: f64 },
    /// Travel until `fraction * viewport_width` of the strip end is visible.
    VisibleFraction(f64),
}

/// Fixed per-segment sizing for a horizontally panning strip (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripLayout {
    pub segment_width: f64,
    pub gap: f64,
    pub end_padding: f64,
    pub anchor: StartAnchor,
    pub extent: ScrollExtent,
}

impl StripLayout {
    pub fn wide() -> Self {
        Self {
            segment_width: 360.0,
            gap: 100.0,
            end_padding: 5.0,
            anchor: StartAnchor::Centered,
            extent: ScrollExtent::CenterLast {
                trailing_margin: 0.1,
            },
        }
    }

    pub fn compact() -> Self {
        Self {
            segment_width: 320.0,
            gap: 80.0,
            end_padding: 100.0,
            anchor: StartAnchor::Fraction(0.08),
            extent: ScrollExtent::VisibleFraction(0.7),
        }
    }

    pub fn pitch(&self) -> f64 {
        self.segment_width + self.gap
    }
}

/// Responsive pair of layouts split at a viewport-width breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsiveStrip {
    pub breakpoint: f64,
    pub wide: StripLayout,
    pub compact: StripLayout,
}

impl Default for ResponsiveStrip {
    fn default() -> Self {
        Self {
            breakpoint: 1024.0,
            wide: StripLayout::wide(),
            compact: StripLayout::compact(),
        }
    }
}

impl ResponsiveStrip {
    pub fn is_compact(&self, viewport_width: f64) -> bool {
        viewport_width < self.breakpoint
    }

    pub fn select(&self, viewport_width: f64) -> &StripLayout {
        if self.is_compact(viewport_width) {
            &self.compact
        } else {
            &self.wide
        }
    }
}

/// Dimensions of a strip measured against one viewport width.  Rebuild on
/// every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripMetrics {
    pub viewport_width: f64,
    pub total_width: f64,
    pub start_offset: f64,
    pub max_scroll: f64,
    pub pitch: f64,
    pub segment_width: f64,
}

impl StripMetrics {
    pub fn measure(layout: &StripLayout, count: usize, viewport_width: f64) -> Self {
        let total_width = count as f64 * layout.pitch() + layout.end_padding;
        let start_offset = match layout.anchor {
            StartAnchor::Centered => viewport_width / 2.0 - layout.segment_width / 2.0,
            StartAnchor::Fraction(f) => viewport_width * f,
        };
        let max_scroll = match layout.extent {
            ScrollExtent::CenterLast { trailing_margin } => {
                total_width - viewport_width / 2.0 - layout.segment_width / 2.0
                    + viewport_width * trailing_margin
            }
            ScrollExtent::VisibleFraction(f) => total_width - viewport_width * f,
        };
        Self {
            viewport_width,
            total_width,
            start_offset,
            max_scroll,
            pitch: layout.pitch(),
            segment_width: layout.segment_width,
        }
    }

    /// Horizontal pan of the whole strip at `progress`.
    pub fn horizontal_offset(&self, progress: f64) -> f64 {
        self.start_offset - clamp01(progress) * self.max_scroll
    }

    /// Left edge of segment `index` on screen at `progress`.
    pub fn segment_x(&self, progress: f64, index: usize) -> f64 {
        self.horizontal_offset(progress) + index as f64 * self.pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segments(n: usize) -> Vec<Segment> {
        (0..n)
            .map(|i| Segment::new(i, format!("{}", 1700 + i), "t", "b"))
            .collect()
    }

    #[test]
    fn opacity_front_loads_the_fade() {
        let curve = SegmentCurve::default();
        // One segment: local progress equals global progress.
        let at = |p| curve.state_for(p, 0, 1);
        assert!((at(0.4).opacity - 1.0).abs() < 1e-12);
        assert!((at(0.2).opacity - 0.5).abs() < 1e-12);
        assert!((at(0.0).scale - 0.92).abs() < 1e-12);
        assert!((at(1.0).scale - 1.0).abs() < 1e-12);
        assert!((at(0.0).translate_offset - 15.0).abs() < 1e-12);
        assert_eq!(at(1.0).translate_offset, 0.0);
    }

    #[test]
    fn windows_split_progress_evenly() {
        let curve = SegmentCurve::default();
        let segs = segments(4);
        let states = compute_segment_states(0.5, &segs, &curve);
        assert_eq!(states.len(), 4);
        assert_eq!(states[0].local_progress, 1.0);
        assert_eq!(states[1].local_progress, 1.0);
        assert_eq!(states[2].local_progress, 0.0);
        assert!(states[2].is_active);
        assert!(!states[3].is_active);
        assert_eq!(states[3].marker_opacity, 0.3);
    }

    #[test]
    fn no_segments_no_states() {
        let states = compute_segment_states(0.7, &[], &SegmentCurve::default());
        assert!(states.is_empty());
    }

    #[test]
    fn recomputation_is_bitwise_stable() {
        let curve = SegmentCurve::default();
        let segs = segments(7);
        let a = compute_segment_states(0.3137, &segs, &curve);
        let b = compute_segment_states(0.3137, &segs, &curve);
        assert_eq!(a, b);
    }

    #[test]
    fn positions_alternate() {
        let segs = segments(3);
        assert_eq!(segs[0].position, SegmentPosition::AboveLine);
        assert_eq!(segs[1].position, SegmentPosition::BelowLine);
        assert_eq!(segs[2].position, SegmentPosition::AboveLine);
    }

    #[test]
    fn wide_strip_centres_first_segment() {
        let m = StripMetrics::measure(&StripLayout::wide(), 7, 1200.0);
        assert_eq!(m.total_width, 7.0 * 460.0 + 5.0);
        assert_eq!(m.start_offset, 600.0 - 180.0);
        assert!((m.max_scroll - (m.total_width - 600.0 - 180.0 + 120.0)).abs() < 1e-9);
        assert_eq!(m.horizontal_offset(0.0), m.start_offset);
        assert_eq!(m.horizontal_offset(1.0), m.start_offset - m.max_scroll);
        assert_eq!(m.segment_x(0.0, 2), m.start_offset + 920.0);
    }

    #[test]
    fn compact_strip_uses_edge_anchor() {
        let strip = ResponsiveStrip::default();
        assert!(strip.is_compact(800.0));
        let m = StripMetrics::measure(strip.select(800.0), 7, 800.0);
        assert_eq!(m.total_width, 7.0 * 400.0 + 100.0);
        assert!((m.start_offset - 64.0).abs() < 1e-9);
        assert!((m.max_scroll - (m.total_width - 560.0)).abs() < 1e-9);
        assert!(!strip.is_compact(1024.0));
    }
}
