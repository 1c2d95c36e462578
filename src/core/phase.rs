//! One-shot, irreversible visual phase transition.
//!
//! `Initial → Transitioning → Final`.  The transition can be started by an
//! auto-trigger timer, a click, or a scroll gesture; whichever arrives first
//! wins and every later trigger is ignored.  While transitioning, a value is
//! interpolated from its start to its target with a cubic ease-out.

use std::time::{Duration, Instant};

use super::easing::{ease_out_cubic, Lerp};
use super::lifecycle::{OneShotTimer, StopToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Initial,
    Transitioning,
    Final,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Initial => "initial",
            Phase::Transitioning => "transitioning",
            Phase::Final => "final",
        }
    }
}

/// What started the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Timer,
    Click,
    Scroll,
}

/// One interpolation sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample<V> {
    /// Linear time fraction in `[0, 1]`.
    pub t: f64,
    pub eased: f64,
    pub value: V,
}

impl<V> TweenSample<V> {
    pub fn is_done(&self) -> bool {
        self.t >= 1.0
    }
}

/// Fixed-duration ease-out interpolation between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<V> {
    pub from: V,
    pub to: V,
    pub duration: Duration,
}

impl<V: Lerp> Tween<V> {
    pub fn new(from: V, to: V, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn sample(&self, elapsed: Duration) -> TweenSample<V> {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        let eased = ease_out_cubic(t);
        TweenSample {
            t,
            eased,
            value: self.from.lerp(self.to, eased),
        }
    }
}

/// Timing for a [`PhaseStateMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseConfig {
    /// Start the transition on its own after this long.  `None` waits for
    /// an explicit trigger.
    pub auto_trigger_after: Option<Duration>,
    pub transition: Duration,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            auto_trigger_after: Some(Duration::from_millis(6000)),
            transition: Duration::from_millis(5000),
        }
    }
}

/// Per-mount phase controller.  Construct on mount; drop or
/// [`teardown`](Self::teardown) on unmount.
#[derive(Debug)]
pub struct PhaseStateMachine<V> {
    phase: Phase,
    has_triggered: bool,
    source: Option<TriggerSource>,
    tween: Tween<V>,
    started_at: Option<Instant>,
    current: V,
    auto_trigger: Option<OneShotTimer>,
    token: StopToken,
}

impl<V: Lerp> PhaseStateMachine<V> {
    pub fn new(from: V, to: V, config: PhaseConfig, mounted_at: Instant, token: StopToken) -> Self {
        let auto_trigger = config
            .auto_trigger_after
            .map(|delay| OneShotTimer::new(mounted_at, delay, token.clone()));
        Self {
            phase: Phase::Initial,
            has_triggered: false,
            source: None,
            tween: Tween::new(from, to, config.transition),
            started_at: None,
            current: from,
            auto_trigger,
            token,
        }
    }

    /// Start the transition.  Returns `true` only for the trigger that
    /// actually started it.
    pub fn trigger(&mut self, source: TriggerSource, now: Instant) -> bool {
        if self.has_triggered || self.token.is_cancelled() {
            tracing::trace!(?source, phase = self.phase.label(), "phase trigger ignored");
            return false;
        }
        self.has_triggered = true;
        self.source = Some(source);
        self.phase = Phase::Transitioning;
        self.started_at = Some(now);
        tracing::debug!(?source, "phase transition started");
        true
    }

    /// Advance one animation tick.  Returns the interpolated value while
    /// the machine is live, `None` once torn down.
    pub fn tick(&mut self, now: Instant) -> Option<V> {
        if self.token.is_cancelled() {
            return None;
        }
        if self.phase == Phase::Initial {
            let due = self.auto_trigger.as_mut().is_some_and(|t| t.poll(now));
            if due {
                self.trigger(TriggerSource::Timer, now);
            }
        }
        if self.phase == Phase::Transitioning {
            let started = self.started_at.unwrap_or(now);
            let sample = self.tween.sample(now.saturating_duration_since(started));
            self.current = sample.value;
            if sample.is_done() {
                self.phase = Phase::Final;
                tracing::debug!("phase transition finished");
            }
        }
        Some(self.current)
    }

    /// Cancel every pending step.  Idempotent.
    pub fn teardown(&mut self) {
        self.token.cancel();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> V {
        self.current
    }

    pub fn source(&self) -> Option<TriggerSource> {
        self.source
    }

    pub fn has_triggered(&self) -> bool {
        self.has_triggered
    }

    /// Fraction of the transition completed (0 before, 1 after).
    pub fn transition_progress(&self, now: Instant) -> f64 {
        match (self.phase, self.started_at) {
            (Phase::Initial, _) => 0.0,
            (Phase::Final, _) => 1.0,
            (Phase::Transitioning, Some(started)) => {
                self.tween.sample(now.saturating_duration_since(started)).t
            }
            (Phase::Transitioning, None) => 0.0,
        }
    }

    /// Time left before the auto trigger fires, if it is still pending.
    pub fn auto_trigger_in(&self, now: Instant) -> Option<Duration> {
        if self.phase != Phase::Initial {
            return None;
        }
        self.auto_trigger
            .as_ref()
            .filter(|t| t.is_pending())
            .map(|t| t.remaining(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn machine(t0: Instant, config: PhaseConfig) -> PhaseStateMachine<f64> {
        PhaseStateMachine::new(0.0, 2.0 * PI, config, t0, StopToken::new())
    }

    fn manual() -> PhaseConfig {
        PhaseConfig {
            auto_trigger_after: None,
            transition: Duration::from_millis(5000),
        }
    }

    #[test]
    fn tween_midpoint_is_eased() {
        let tween = Tween::new(0.0, 2.0 * PI, Duration::from_millis(5000));
        let s = tween.sample(Duration::from_millis(2500));
        assert!((s.t - 0.5).abs() < 1e-12);
        assert!((s.eased - 0.875).abs() < 1e-12);
        assert!((s.value - 1.75 * PI).abs() < 1e-9);
    }

    #[test]
    fn racing_triggers_start_exactly_once() {
        let t0 = Instant::now();
        let mut m = machine(t0, manual());
        assert!(m.trigger(TriggerSource::Timer, t0));
        assert!(!m.trigger(TriggerSource::Click, t0));
        assert_eq!(m.phase(), Phase::Transitioning);
        assert_eq!(m.source(), Some(TriggerSource::Timer));
    }

    #[test]
    fn reaches_final_and_stays() {
        let t0 = Instant::now();
        let mut m = machine(t0, manual());
        m.trigger(TriggerSource::Click, t0);
        let mid = m.tick(t0 + Duration::from_millis(2500)).unwrap();
        assert!((mid - 1.75 * PI).abs() < 1e-9);
        assert_eq!(m.phase(), Phase::Transitioning);

        let end = m.tick(t0 + Duration::from_millis(5000)).unwrap();
        assert_eq!(end, 2.0 * PI);
        assert_eq!(m.phase(), Phase::Final);

        assert!(!m.trigger(TriggerSource::Click, t0 + Duration::from_secs(6)));
        assert_eq!(m.phase(), Phase::Final);
    }

    #[test]
    fn auto_trigger_fires_after_delay() {
        let t0 = Instant::now();
        let mut m = machine(t0, PhaseConfig::default());
        m.tick(t0 + Duration::from_millis(5999));
        assert_eq!(m.phase(), Phase::Initial);
        assert!(m.auto_trigger_in(t0).is_some());
        m.tick(t0 + Duration::from_millis(6000));
        assert_eq!(m.phase(), Phase::Transitioning);
        assert_eq!(m.source(), Some(TriggerSource::Timer));
    }

    #[test]
    fn click_before_timer_suppresses_timer() {
        let t0 = Instant::now();
        let mut m = machine(t0, PhaseConfig::default());
        assert!(m.trigger(TriggerSource::Click, t0 + Duration::from_millis(100)));
        m.tick(t0 + Duration::from_millis(7000));
        assert_eq!(m.source(), Some(TriggerSource::Click));
    }

    #[test]
    fn teardown_stops_ticks_and_triggers() {
        let t0 = Instant::now();
        let mut m = machine(t0, PhaseConfig::default());
        m.teardown();
        assert_eq!(m.tick(t0 + Duration::from_secs(10)), None);
        assert!(!m.trigger(TriggerSource::Click, t0));
        assert_eq!(m.phase(), Phase::Initial);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let t0 = Instant::now();
        let mut m = PhaseStateMachine::new(
            1.0,
            3.0,
            PhaseConfig {
                auto_trigger_after: None,
                transition: Duration::ZERO,
            },
            t0,
            StopToken::new(),
        );
        m.trigger(TriggerSource::Scroll, t0);
        assert_eq!(m.tick(t0), Some(3.0));
        assert_eq!(m.phase(), Phase::Final);
    }
}
