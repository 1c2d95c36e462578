use kolachi_scroll::core::segments::{compute_segment_states, Segment, SegmentCurve, StripLayout, StripMetrics};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn segments(n: usize) -> Vec<Segment> {
    (0..n).map(|i| Segment::new(i, format!("{i}"), "title", "body")).collect()
}

proptest! {
    #[test]
    fn local_progress_saturates_outside_its_window(n in 1usize..12, p in 0.0f64..=1.0) {
        let states = compute_segment_states(p, &segments(n), &SegmentCurve::default());
        for (i, s) in states.iter().enumerate() {
            let start = i as f64 / n as f64;
            let end = (i + 1) as f64 / n as f64;
            if p <= start {
                prop_assert_eq!(s.local_progress, 0.0);
            }
            if p >= end {
                prop_assert_eq!(s.local_progress, 1.0);
            }
            prop_assert!((0.0..=1.0).contains(&s.opacity));
            prop_assert!((0.92..=1.0).contains(&s.scale));
            prop_assert_eq!(s.is_active, p >= start);
        }
    }

    #[test]
    fn segment_states_are_idempotent(n in 0usize..12, p in -0.5f64..1.5) {
        let segs = segments(n);
        let curve = SegmentCurve::default();
        let first = compute_segment_states(p, &segs, &curve);
        let second = compute_segment_states(p, &segs, &curve);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn strip_pans_monotonically(n in 3usize..12, vw in 320.0f64..2560.0, a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let metrics = StripMetrics::measure(&StripLayout::wide(), n, vw);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(metrics.horizontal_offset(lo) >= metrics.horizontal_offset(hi) - 1e-9);
    }
}

#[test]
fn curve_reference_points() {
    let curve = SegmentCurve::default();
    // One segment: local progress equals global progress.
    assert_eq!(curve.state_for(0.4, 0, 1).opacity, 1.0);
    assert!((curve.state_for(0.2, 0, 1).opacity - 0.5).abs() < 1e-12);
    assert!((curve.state_for(0.0, 0, 1).scale - 0.92).abs() < 1e-12);
    assert!((curve.state_for(1.0, 0, 1).scale - 1.0).abs() < 1e-12);
}

#[test]
fn empty_segment_list_is_empty() {
    assert!(compute_segment_states(0.5, &[], &SegmentCurve::default()).is_empty());
}
