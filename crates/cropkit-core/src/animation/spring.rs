//! Damped spring response used to time frame transitions.
//!
//! The response is the analytic solution of a damped harmonic oscillator
//! released at distance 1 from its target with an initial velocity. The
//! natural frequency is chosen so the oscillation envelope has decayed to
//! [`SETTLE_THRESHOLD`] by the end of the configured duration.
//!
//! # Parameters
//!
//! - `damping`: damping ratio ζ. Below 1.0 the response overshoots.
//!   At or above 1.0 it is treated as critically damped.
//! - `velocity`: initial velocity in "distances per second", so 1.0 would
//!   cover the whole travel in one second at constant speed.

use crate::config::AnimationSpec;

/// Envelope amplitude left at the end of the duration.
pub const SETTLE_THRESHOLD: f64 = 1e-3;

/// Precomputed spring parameters for one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringTiming {
    duration: f64,
    omega: f64,
    damping: f64,
    velocity: f64,
}

impl SpringTiming {
    /// Derive the spring for `spec`. A zero duration yields a spring that is
    /// settled immediately.
    pub fn new(spec: &AnimationSpec) -> Self {
        let duration = spec.duration.max(0.0);
        let damping = spec.spring_damping.max(f64::EPSILON);
        let decay = -SETTLE_THRESHOLD.ln();
        let omega = if duration > 0.0 {
            decay / (damping.min(1.0) * duration)
        } else {
            0.0
        };
        Self {
            duration,
            omega,
            damping,
            velocity: spec.spring_velocity,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Progress at `seconds` after release: 0.0 at the start, converging to
    /// 1.0, possibly overshooting on the way. Exactly 1.0 once the duration
    /// has elapsed.
    pub fn progress_at(&self, seconds: f64) -> f64 {
        if self.duration <= 0.0 || seconds >= self.duration {
            return 1.0;
        }
        let s = seconds.max(0.0);
        let w = self.omega;
        let zeta = self.damping;

        // displacement from target, starting at -1
        let offset = if zeta < 1.0 {
            let wd = w * (1.0 - zeta * zeta).sqrt();
            let b = (self.velocity - zeta * w) / wd;
            (-zeta * w * s).exp() * (-(wd * s).cos() + b * (wd * s).sin())
        } else {
            let b = self.velocity - w;
            (-w * s).exp() * (-1.0 + b * s)
        };
        1.0 + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(damping: f64, velocity: f64) -> AnimationSpec {
        AnimationSpec {
            spring_damping: damping,
            spring_velocity: velocity,
            ..AnimationSpec::default()
        }
    }

    #[test]
    fn test_starts_at_zero_and_ends_at_one() {
        let spring = SpringTiming::new(&AnimationSpec::default());
        assert!(spring.progress_at(0.0).abs() < 1e-12);
        assert_eq!(spring.progress_at(1.0), 1.0);
        assert_eq!(spring.progress_at(5.0), 1.0);
    }

    #[test]
    fn test_settles_near_target_before_end() {
        for damping in [0.3, 0.9, 1.0, 2.0] {
            let spring = SpringTiming::new(&spec(damping, 0.0));
            let late = spring.progress_at(0.999);
            assert!(
                (late - 1.0).abs() < 0.01,
                "damping {damping}: progress {late} not settled"
            );
        }
    }

    #[test]
    fn test_low_damping_overshoots() {
        let spring = SpringTiming::new(&spec(0.3, 13.0));
        let peak = (1..100)
            .map(|i| spring.progress_at(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "expected overshoot, peak was {peak}");
    }

    #[test]
    fn test_critical_damping_does_not_overshoot_from_rest() {
        let spring = SpringTiming::new(&spec(1.0, 0.0));
        for i in 0..100 {
            let p = spring.progress_at(i as f64 / 100.0);
            assert!(p <= 1.0 + 1e-12, "overshoot at step {i}: {p}");
        }
    }

    #[test]
    fn test_zero_duration_is_settled() {
        let spring = SpringTiming::new(&AnimationSpec {
            duration: 0.0,
            ..AnimationSpec::default()
        });
        assert_eq!(spring.progress_at(0.0), 1.0);
    }
}
