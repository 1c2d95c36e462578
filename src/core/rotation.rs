//! Scroll-coupled rotation with a smoothed follower.
//!
//! Section progress sets a target angle; every frame the displayed angle
//! closes a fixed fraction of the gap.  User interaction with the rotating
//! object stays locked until the rotation is essentially complete.

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use super::easing::Approach;
use super::lifecycle::{OneShotTimer, StopToken};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationConfig {
    /// Full turns swept between progress 0 and 1.
    pub turns: f64,
    /// Fraction of the remaining gap closed per frame.
    pub smoothing: f64,
    /// Snap to target when within this many radians.
    pub snap_epsilon: f64,
    /// Ignore target changes smaller than this (radians).
    pub retarget_threshold: f64,
    /// Progress at which the rotation counts as complete.
    pub complete_at: f64,
    /// Scroll samples are ignored while less than this much of the viewport
    /// shows the section.
    pub min_visible: f64,
    /// Interaction unlock delay after the section comes into view.
    pub unlock_after: Duration,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            turns: 1.0,
            smoothing: 0.1,
            snap_epsilon: 0.001,
            retarget_threshold: 0.01,
            complete_at: 0.99,
            min_visible: 0.1,
            unlock_after: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug)]
pub struct RotationFollower {
    config: RotationConfig,
    approach: Approach,
    target: f64,
    current: f64,
    animating: bool,
    completed: bool,
    locked: bool,
    unlock: Option<OneShotTimer>,
    token: StopToken,
}

impl RotationFollower {
    pub fn new(config: RotationConfig, token: StopToken) -> Self {
        Self {
            approach: Approach::new(config.smoothing, config.snap_epsilon),
            config,
            target: 0.0,
            current: 0.0,
            animating: false,
            completed: false,
            locked: true,
            unlock: None,
            token,
        }
    }

    /// Section came into view: restart from zero and arm the unlock timer.
    pub fn enter_view(&mut self, now: Instant) {
        self.target = 0.0;
        self.current = 0.0;
        self.animating = true;
        self.locked = true;
        self.unlock = Some(OneShotTimer::new(now, self.config.unlock_after, self.token.clone()));
    }

    pub fn leave_view(&mut self) {
        self.animating = false;
        self.unlock = None;
    }

    /// Feed a scroll sample.  Returns `true` when the target moved.
    pub fn on_scroll(&mut self, progress: f64, visible_fraction: f64) -> bool {
        if self.token.is_cancelled() || visible_fraction <= self.config.min_visible {
            return false;
        }
        let new_target = progress * self.config.turns * TAU;
        let moved = (self.target - new_target).abs() > self.config.retarget_threshold;
        if moved {
            self.target = new_target;
            self.animating = true;
        }
        let complete = progress >= self.config.complete_at;
        if complete != self.completed {
            self.completed = complete;
            self.locked = !complete;
        }
        moved
    }

    /// Advance one frame.  Returns the displayed angle.
    pub fn step(&mut self, now: Instant) -> f64 {
        if self.token.is_cancelled() {
            return self.current;
        }
        if self.unlock.as_mut().is_some_and(|t| t.poll(now)) {
            self.locked = false;
        }
        if self.animating {
            let (next, settled) = self.approach.step(self.current, self.target);
            self.current = next;
            self.animating = !settled;
        }
        self.current
    }

    pub fn angle(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// `true` while interaction with the rotating object is locked.
    pub fn is_rotating(&self) -> bool {
        self.locked
    }

    /// Displayed angle as a whole-number percentage of the full sweep.
    pub fn percent(&self) -> u32 {
        let sweep = self.config.turns * TAU;
        if sweep <= 0.0 {
            return 0;
        }
        (self.current / sweep * 100.0).round().clamp(0.0, 100.0) as u32
    }
}
