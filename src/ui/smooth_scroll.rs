//! Page scroll with exponential ease-out.
//!
//! Scroll input moves a target offset; each tick the displayed offset closes
//! a fixed fraction of the remaining distance, so a key press glides the
//! page instead of jumping it.

/// Pixel-offset smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Displayed offset (virtual pixels from the top of the page).
    current: f64,
    target: f64,
    max: f64,
    /// Damping: `gap *= (1 - speed)` each tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            max: 0.0,
            speed: speed.clamp(0.05, 1.0),
        }
    }

    /// Set the scrollable range.  Offsets beyond it are pulled back.
    pub fn set_max(&mut self, max: f64) {
        self.max = max.max(0.0);
        self.target = self.target.clamp(0.0, self.max);
        self.current = self.current.clamp(0.0, self.max);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.target + delta);
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.target = offset.clamp(0.0, self.max);
    }

    /// Scroll to `offset` without easing.
    pub fn jump_to(&mut self, offset: f64) {
        self.scroll_to(offset);
        self.current = self.target;
    }

    /// Close part of the gap.  Call once per frame.
    pub fn tick(&mut self) {
        let gap = self.target - self.current;
        self.current += gap * self.speed;
        if (self.target - self.current).abs() < 0.5 {
            self.current = self.target;
        }
    }

    pub fn offset(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True while the page is still gliding toward its target.
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glides_to_target_and_settles() {
        let mut s = SmoothScroll::new(0.3);
        s.set_max(1000.0);
        s.scroll_by(100.0);
        s.tick();
        assert!((s.offset() - 30.0).abs() < 1e-9);
        for _ in 0..50 {
            s.tick();
        }
        assert_eq!(s.offset(), 100.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn target_is_clamped_to_range() {
        let mut s = SmoothScroll::new(0.3);
        s.set_max(200.0);
        s.scroll_by(-50.0);
        assert_eq!(s.target(), 0.0);
        s.scroll_to(5000.0);
        assert_eq!(s.target(), 200.0);
        s.jump_to(150.0);
        assert_eq!(s.offset(), 150.0);
        s.set_max(100.0);
        assert_eq!(s.offset(), 100.0);
    }
}
