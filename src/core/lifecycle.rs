//! Mount-scoped cancellation.
//!
//! A section acquires a [`MountGuard`] when it comes into view and hands
//! clones of its [`StopToken`] to everything it schedules.  Dropping the
//! guard cancels the token, so a timer or animation step polled after
//! teardown does nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancellation flag.  Cheap to clone; all clones observe the same
/// state.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    cancelled: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Owns the token for one mount of a section.
#[derive(Debug)]
pub struct MountGuard {
    token: StopToken,
    mounted_at: Instant,
}

impl MountGuard {
    pub fn new(now: Instant) -> Self {
        Self {
            token: StopToken::new(),
            mounted_at: now,
        }
    }

    pub fn token(&self) -> StopToken {
        self.token.clone()
    }

    pub fn mounted_at(&self) -> Instant {
        self.mounted_at
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// A delay that fires at most once.  Polled from the update loop.
#[derive(Debug, Clone)]
pub struct OneShotTimer {
    fire_at: Instant,
    fired: bool,
    token: StopToken,
}

impl OneShotTimer {
    pub fn new(start: Instant, delay: Duration, token: StopToken) -> Self {
        Self {
            fire_at: start + delay,
            fired: false,
            token,
        }
    }

    /// `true` exactly once: on the first poll at or after the deadline,
    /// unless the token was cancelled first.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || self.token.is_cancelled() || now < self.fire_at {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        !self.fired && !self.token.is_cancelled()
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.fire_at.saturating_duration_since(now)
    }
}

/// Fixed-period repeating timer, polled like [`OneShotTimer`].  Returns how
/// many periods elapsed since the last poll so a stalled frame catches up.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_at: Instant,
    token: StopToken,
}

impl IntervalTimer {
    pub fn new(start: Instant, period: Duration, token: StopToken) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_at: start + period,
            token,
        }
    }

    pub fn poll(&mut self, now: Instant) -> u32 {
        if self.token.is_cancelled() || now < self.next_at {
            return 0;
        }
        let behind = (now - self.next_at).as_nanos() / self.period.as_nanos();
        let ticks = behind + 1;
        let advance = u32::try_from(ticks)
            .ok()
            .and_then(|n| self.period.checked_mul(n))
            .and_then(|d| self.next_at.checked_add(d));
        // Past what a `Duration` can step in one go: restart the phase at `now`.
        self.next_at = advance.unwrap_or(now + self.period);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once() {
        let t0 = Instant::now();
        let mut timer = OneShotTimer::new(t0, Duration::from_millis(100), StopToken::new());
        assert!(!timer.poll(t0 + Duration::from_millis(50)));
        assert!(timer.poll(t0 + Duration::from_millis(100)));
        assert!(!timer.poll(t0 + Duration::from_millis(500)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn dropping_guard_cancels_scheduled_work() {
        let t0 = Instant::now();
        let guard = MountGuard::new(t0);
        let mut timer = OneShotTimer::new(t0, Duration::from_millis(10), guard.token());
        let mut interval = IntervalTimer::new(t0, Duration::from_millis(10), guard.token());
        drop(guard);
        assert!(!timer.poll(t0 + Duration::from_secs(1)));
        assert_eq!(interval.poll(t0 + Duration::from_secs(1)), 0);
    }

    #[test]
    fn interval_catches_up_after_stall() {
        let t0 = Instant::now();
        let mut interval = IntervalTimer::new(t0, Duration::from_millis(100), StopToken::new());
        assert_eq!(interval.poll(t0 + Duration::from_millis(99)), 0);
        assert_eq!(interval.poll(t0 + Duration::from_millis(350)), 3);
        assert_eq!(interval.poll(t0 + Duration::from_millis(399)), 0);
        assert_eq!(interval.poll(t0 + Duration::from_millis(400)), 1);
    }

    #[test]
    fn long_stall_is_counted_in_one_step() {
        let t0 = Instant::now();
        let mut interval = IntervalTimer::new(t0, Duration::from_millis(1), StopToken::new());
        let later = t0 + Duration::from_secs(3 * 60 * 60);
        assert_eq!(interval.poll(later), 10_800_000);
        assert_eq!(interval.poll(later), 0);
        assert_eq!(interval.poll(later + Duration::from_millis(1)), 1);
    }
}
