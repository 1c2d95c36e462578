//! The virtual document: ordered sections with heights in viewport units.
//!
//! The terminal shows one viewport of this document at a time.  Section
//! geometry is expressed in virtual pixels so the motion core sees the same
//! numbers a browser would hand it.

use crate::core::progress::ScrollFrame;

use super::content;

/// Virtual pixels per terminal column.
pub const CELL_W_PX: f64 = 8.0;
/// Virtual pixels per terminal row.
pub const CELL_H_PX: f64 = 16.0;

/// Viewport size in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self {
            width: f64::from(cols) * CELL_W_PX,
            height: f64::from(rows) * CELL_H_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Geography,
    Origins,
    Dome,
    CultureStack,
    ThenVsNow,
    Tribute,
    Footer,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Hero => "MyKolachi",
            SectionKind::Geography => "Geography",
            SectionKind::Origins => "Origin of Karachi",
            SectionKind::Dome => "Culture",
            SectionKind::CultureStack => "Culture Cards",
            SectionKind::ThenVsNow => "Then vs Now",
            SectionKind::Tribute => "Voices of Karachi",
            SectionKind::Footer => "Footer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpec {
    pub kind: SectionKind,
    /// Height as a multiple of the viewport height.
    pub height_vh: f64,
    /// Tall sticky sections hold their first viewport of content on screen
    /// while they scroll; the others scroll as one long block.
    pub sticky: bool,
}

/// Vertical layout of the story section, in viewport heights from the
/// section top.  Cards are stacked with a connector in each gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoryLayout {
    pub header_vh: f64,
    pub card_vh: f64,
    pub gap_vh: f64,
    pub footer_vh: f64,
}

impl Default for StoryLayout {
    fn default() -> Self {
        Self {
            header_vh: 0.25,
            card_vh: 0.3,
            gap_vh: 0.15,
            footer_vh: 0.1,
        }
    }
}

impl StoryLayout {
    pub fn height_vh(&self, cards: usize) -> f64 {
        let gaps = cards.saturating_sub(1) as f64;
        self.header_vh + cards as f64 * self.card_vh + gaps * self.gap_vh + self.footer_vh
    }

    /// Top and bottom of card `index`, in pixels from the section top.
    pub fn card_span(&self, index: usize, viewport_height: f64) -> (f64, f64) {
        let top = self.header_vh + index as f64 * (self.card_vh + self.gap_vh);
        (top * viewport_height, (top + self.card_vh) * viewport_height)
    }

    /// The gap below card `index`, where its connector runs.
    pub fn connector_span(&self, index: usize, viewport_height: f64) -> (f64, f64) {
        let (_, start) = self.card_span(index, viewport_height);
        (start, start + self.gap_vh * viewport_height)
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    sections: Vec<SectionSpec>,
}

impl Page {
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        Self { sections }
    }

    /// The MyKolachi page.  Compact viewports get a shorter timeline.
    pub fn mykolachi(compact: bool) -> Self {
        use SectionKind::*;
        let pinned = |kind, height_vh| SectionSpec {
            kind,
            height_vh,
            sticky: true,
        };
        let flowing = |kind, height_vh| SectionSpec {
            kind,
            height_vh,
            sticky: false,
        };
        Self::new(vec![
            pinned(Hero, 1.0),
            pinned(Geography, 1.0),
            pinned(Origins, if compact { 3.5 } else { 4.0 }),
            pinned(Dome, 4.0),
            pinned(CultureStack, 1.0),
            flowing(ThenVsNow, StoryLayout::default().height_vh(content::STORY.len())),
            flowing(Tribute, 1.0),
            pinned(Footer, 0.5),
        ])
    }

    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    /// Document offset of `kind`'s top edge and its height, in pixels.
    pub fn placement(&self, kind: SectionKind, viewport_height: f64) -> Option<(f64, f64)> {
        let mut top = 0.0;
        for s in &self.sections {
            let height = s.height_vh * viewport_height;
            if s.kind == kind {
                return Some((top, height));
            }
            top += height;
        }
        None
    }

    pub fn total_height(&self, viewport_height: f64) -> f64 {
        self.sections.iter().map(|s| s.height_vh * viewport_height).sum()
    }

    pub fn max_scroll(&self, viewport_height: f64) -> f64 {
        (self.total_height(viewport_height) - viewport_height).max(0.0)
    }

    pub fn frame(&self, kind: SectionKind, scroll_y: f64, viewport_height: f64) -> Option<ScrollFrame> {
        let (top, height) = self.placement(kind, viewport_height)?;
        Some(ScrollFrame::from_document(top, height, scroll_y, viewport_height))
    }

    /// Section covering the most of the viewport; earlier sections win ties.
    pub fn dominant(&self, scroll_y: f64, viewport_height: f64) -> Option<SectionKind> {
        let mut best: Option<(SectionKind, f64)> = None;
        for s in &self.sections {
            let Some(frame) = self.frame(s.kind, scroll_y, viewport_height) else {
                continue;
            };
            let visible = frame.visible_fraction();
            if best.map_or(true, |(_, v)| visible > v) {
                best = Some((s.kind, visible));
            }
        }
        best.map(|(kind, _)| kind)
    }

    /// Scroll offset that brings the next section's top to the viewport top.
    pub fn next_section_top(&self, scroll_y: f64, viewport_height: f64) -> f64 {
        let mut top = 0.0;
        for s in &self.sections {
            if top > scroll_y + 1.0 {
                return top.min(self.max_scroll(viewport_height));
            }
            top += s.height_vh * viewport_height;
        }
        self.max_scroll(viewport_height)
    }

    pub fn prev_section_top(&self, scroll_y: f64, viewport_height: f64) -> f64 {
        let mut prev = 0.0;
        let mut top = 0.0;
        for s in &self.sections {
            if top >= scroll_y - 1.0 {
                break;
            }
            prev = top;
            top += s.height_vh * viewport_height;
        }
        prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f64 = 640.0;

    #[test]
    fn placement_stacks_sections() {
        let page = Page::mykolachi(false);
        assert_eq!(page.placement(SectionKind::Hero, VH), Some((0.0, VH)));
        assert_eq!(page.placement(SectionKind::Origins, VH), Some((2.0 * VH, 4.0 * VH)));
        let story = page.placement(SectionKind::ThenVsNow, VH).map(|p| p.1);
        assert!(story.is_some_and(|h| (h - 3.35 * VH).abs() < 1e-9));
        assert!((page.total_height(VH) - 15.85 * VH).abs() < 1e-9);
        assert!((page.max_scroll(VH) - 14.85 * VH).abs() < 1e-9);
    }

    #[test]
    fn story_cards_and_connectors_alternate() {
        let layout = StoryLayout::default();
        let (top0, bottom0) = layout.card_span(0, 1000.0);
        assert!((top0 - 250.0).abs() < 1e-9);
        assert!((bottom0 - 550.0).abs() < 1e-9);
        let (start, end) = layout.connector_span(0, 1000.0);
        let (top1, _) = layout.card_span(1, 1000.0);
        assert_eq!(start, bottom0);
        assert!((end - top1).abs() < 1e-9);
        assert!((layout.height_vh(0) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn only_the_flowing_sections_scroll_as_a_block() {
        let page = Page::mykolachi(false);
        let flowing: Vec<SectionKind> = page.sections().iter().filter(|s| !s.sticky).map(|s| s.kind).collect();
        assert_eq!(flowing, vec![SectionKind::ThenVsNow, SectionKind::Tribute]);
    }

    #[test]
    fn compact_timeline_is_shorter() {
        let page = Page::mykolachi(true);
        assert_eq!(page.placement(SectionKind::Origins, VH).map(|p| p.1), Some(3.5 * VH));
    }

    #[test]
    fn frame_tracks_scroll() {
        let page = Page::mykolachi(false);
        let f = page.frame(SectionKind::Origins, 3.0 * VH, VH).unwrap();
        assert_eq!(f.top, -VH);
        assert_eq!(f.bottom, 3.0 * VH);
    }

    #[test]
    fn section_jumps() {
        let page = Page::mykolachi(false);
        assert_eq!(page.next_section_top(0.0, VH), VH);
        assert_eq!(page.next_section_top(VH, VH), 2.0 * VH);
        assert_eq!(page.prev_section_top(2.0 * VH, VH), VH);
        assert_eq!(page.prev_section_top(2.5 * VH, VH), 2.0 * VH);
        assert_eq!(page.prev_section_top(0.0, VH), 0.0);
        assert_eq!(page.dominant(0.0, VH), Some(SectionKind::Hero));
        assert_eq!(page.dominant(3.0 * VH, VH), Some(SectionKind::Origins));
    }
}
