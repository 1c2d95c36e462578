//! Scalar easing helpers shared by every controller.

/// Clamp `v` into `[0, 1]`.  NaN maps to 0 so a bad sample can never
/// escape the unit range.
#[inline]
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic ease-out: `1 - (1 - t)^3`.  Fast start, gentle stop.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - clamp01(t);
    1.0 - inv * inv * inv
}

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    fn lerp(self, target: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, target: Self, t: f64) -> Self {
        lerp(self, target, t)
    }
}

/// Exponential approach toward a moving target.
///
/// Each [`step`](Approach::step) closes `factor` of the remaining gap and
/// snaps once the gap is within `epsilon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    pub factor: f64,
    pub epsilon: f64,
}

impl Approach {
    pub fn new(factor: f64, epsilon: f64) -> Self {
        Self {
            factor: factor.clamp(0.01, 1.0),
            epsilon: epsilon.abs(),
        }
    }

    /// Advance `current` one frame toward `target`.  Returns the new value and
    /// whether it has settled on the target.
    pub fn step(&self, current: f64, target: f64) -> (f64, bool) {
        let next = current + (target - current) * self.factor;
        if (target - next).abs() <= self.epsilon {
            (target, true)
        } else {
            (next, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_cubic_endpoints_and_midpoint() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        // Out-of-range input is clamped, not extrapolated.
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert_eq!(ease_out_cubic(-1.0), 0.0);
    }

    #[test]
    fn clamp01_handles_nan() {
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(-0.5), 0.0);
    }

    #[test]
    fn approach_converges_and_snaps() {
        let a = Approach::new(0.1, 0.001);
        let mut v = 0.0;
        let mut settled = false;
        for _ in 0..200 {
            let (next, done) = a.step(v, 1.0);
            v = next;
            if done {
                settled = true;
                break;
            }
        }
        assert!(settled);
        assert_eq!(v, 1.0);
    }
}
