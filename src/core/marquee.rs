//! Endless horizontal marquee for the testimonial cards.
//!
//! The track holds the item list three times over and shifts left one
//! pixel per step.  Once it has moved one full copy of the list it wraps to
//! zero, which looks seamless because the next copy is identical.

use std::time::Duration;

/// Step rate of the marquee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarqueeSpeed {
    #[default]
    Slow,
    Normal,
    Fast,
}

impl MarqueeSpeed {
    /// Time between one-pixel steps.
    pub fn step_period(self) -> Duration {
        match self {
            MarqueeSpeed::Slow => Duration::from_millis(30),
            MarqueeSpeed::Normal => Duration::from_millis(20),
            MarqueeSpeed::Fast => Duration::from_millis(10),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarqueeSpeed::Slow => "slow",
            MarqueeSpeed::Normal => "normal",
            MarqueeSpeed::Fast => "fast",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Some(MarqueeSpeed::Slow),
            "normal" => Some(MarqueeSpeed::Normal),
            "fast" => Some(MarqueeSpeed::Fast),
            _ => None,
        }
    }
}

/// Copies of the item list laid end to end on the track.
pub const TRACK_COPIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marquee {
    item_count: usize,
    /// Horizontal pitch of one card, gap included.
    card_px: u32,
    shift_px: u64,
}

impl Marquee {
    pub fn new(item_count: usize, card_px: u32) -> Self {
        Self {
            item_count,
            card_px,
            shift_px: 0,
        }
    }

    /// Distance after which the track returns to its start.
    pub fn wrap_px(&self) -> u64 {
        self.item_count as u64 * u64::from(self.card_px)
    }

    /// Move left by `steps` pixels.
    pub fn advance(&mut self, steps: u32) {
        let wrap = self.wrap_px();
        if wrap == 0 {
            return;
        }
        self.shift_px = (self.shift_px + u64::from(steps)) % wrap;
    }

    /// Track translation in pixels; zero or negative.
    pub fn offset_px(&self) -> f64 {
        -(self.shift_px as f64)
    }

    pub fn card_px(&self) -> u32 {
        self.card_px
    }

    /// Number of cards on the track.
    pub fn track_len(&self) -> usize {
        self.item_count * TRACK_COPIES
    }

    /// Item under `x_px`, measured from the left edge of the window.
    pub fn item_at(&self, x_px: f64) -> Option<usize> {
        if self.item_count == 0 || self.card_px == 0 {
            return None;
        }
        let pos = x_px.max(0.0) + self.shift_px as f64;
        Some((pos / f64::from(self.card_px)) as usize % self.item_count)
    }

    pub fn reset(&mut self) {
        self.shift_px = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_one_pixel_per_step() {
        let mut m = Marquee::new(5, 400);
        m.advance(1);
        assert_eq!(m.offset_px(), -1.0);
        m.advance(399);
        assert_eq!(m.offset_px(), -400.0);
        assert_eq!(m.item_at(0.0), Some(1));
    }

    #[test]
    fn wraps_after_one_copy_of_the_list() {
        let mut m = Marquee::new(5, 400);
        assert_eq!(m.wrap_px(), 2000);
        m.advance(1999);
        assert_eq!(m.offset_px(), -1999.0);
        m.advance(1);
        assert_eq!(m.offset_px(), 0.0);
        m.advance(2005);
        assert_eq!(m.offset_px(), -5.0);
        assert_eq!(m.track_len(), 15);
    }

    #[test]
    fn empty_track_stays_put() {
        let mut m = Marquee::new(0, 400);
        m.advance(50);
        assert_eq!(m.offset_px(), 0.0);
        assert_eq!(m.item_at(10.0), None);
    }

    #[test]
    fn speed_periods() {
        assert_eq!(MarqueeSpeed::Slow.step_period(), Duration::from_millis(30));
        assert_eq!(MarqueeSpeed::Normal.step_period(), Duration::from_millis(20));
        assert_eq!(MarqueeSpeed::Fast.step_period(), Duration::from_millis(10));
        assert_eq!(MarqueeSpeed::parse("FAST"), Some(MarqueeSpeed::Fast));
        assert_eq!(MarqueeSpeed::parse("warp"), None);
    }
}
