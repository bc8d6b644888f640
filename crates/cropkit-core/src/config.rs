//! Frame configuration and animation parameters.
//!
//! Both types deserialize with `#[serde(default)]`, so a host may pass a
//! partial object and get the documented defaults for everything else.

use crate::error::FrameError;
use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Default minimum frame size in points.
pub const DEFAULT_MIN_SIZE: Size = Size {
    width: 50.0,
    height: 50.0,
};

/// Default maximum frame size in points.
pub const DEFAULT_MAX_SIZE: Size = Size {
    width: 300.0,
    height: 300.0,
};

/// Default distance around a grip that still grabs it.
pub const DEFAULT_HIT_SLOP: f64 = 20.0;

/// Time curve applied before the spring response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationCurve {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl AnimationCurve {
    /// Map normalized time `t` (clamped to 0.0-1.0) through the curve.
    pub fn ease(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            AnimationCurve::Linear => t,
            AnimationCurve::EaseIn => t * t,
            AnimationCurve::EaseOut => t * (2.0 - t),
            // smoothstep: zero velocity at both ends
            AnimationCurve::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Parameters of a spring transition. Copied into each transition when it
/// starts, so changing them never affects an animation in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSpec {
    /// Transition length in seconds.
    pub duration: f64,
    pub curve: AnimationCurve,
    /// Initial velocity relative to the distance travelled (1.0 covers the
    /// whole distance in one second).
    pub spring_velocity: f64,
    /// Damping ratio; 1.0 is critically damped, lower values overshoot.
    pub spring_damping: f64,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: 1.0,
            curve: AnimationCurve::EaseInOut,
            spring_velocity: 13.0,
            spring_damping: 0.9,
        }
    }
}

impl AnimationSpec {
    /// Check every parameter is in range.
    pub fn validate(&self) -> Result<(), FrameError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(FrameError::InvalidAnimation(format!(
                "duration must be finite and non-negative, got {}",
                self.duration
            )));
        }
        if !self.spring_damping.is_finite() || self.spring_damping <= 0.0 {
            return Err(FrameError::InvalidAnimation(format!(
                "spring damping must be finite and positive, got {}",
                self.spring_damping
            )));
        }
        if !self.spring_velocity.is_finite() {
            return Err(FrameError::InvalidAnimation(format!(
                "spring velocity must be finite, got {}",
                self.spring_velocity
            )));
        }
        Ok(())
    }
}

/// Everything a host can tune on a [`ScalableFrame`](crate::ScalableFrame).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub min_size: Size,
    pub max_size: Size,
    /// Lock the ratio captured from the current geometry.
    pub ratio_enabled: bool,
    /// Grip hit slop in points.
    pub hit_slop: f64,
    pub animation: AnimationSpec,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            ratio_enabled: false,
            hit_slop: DEFAULT_HIT_SLOP,
            animation: AnimationSpec::default(),
        }
    }
}

impl FrameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report degenerate configuration instead of reconciling it.
    pub fn validate(&self) -> Result<(), FrameError> {
        validate_size_range(self.min_size, self.max_size)?;
        if !self.hit_slop.is_finite() || self.hit_slop < 0.0 {
            return Err(FrameError::InvalidHitSlop(self.hit_slop));
        }
        self.animation.validate()
    }
}

/// `min` and `max` are positive, finite and ordered component-wise.
pub fn validate_size_range(min: Size, max: Size) -> Result<(), FrameError> {
    if !min.is_positive() {
        return Err(FrameError::NonPositiveSize(min));
    }
    if !max.is_positive() {
        return Err(FrameError::NonPositiveSize(max));
    }
    if !min.fits_within(&max) {
        return Err(FrameError::InvalidSizeRange { min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FrameConfig::new();
        assert_eq!(config.min_size, Size::new(50.0, 50.0));
        assert_eq!(config.max_size, Size::new(300.0, 300.0));
        assert!(!config.ratio_enabled);
        assert_eq!(config.animation.duration, 1.0);
        assert_eq!(config.animation.spring_velocity, 13.0);
        assert_eq!(config.animation.spring_damping, 0.9);
        assert_eq!(config.animation.curve, AnimationCurve::EaseInOut);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = FrameConfig::new();
        config.min_size = Size::new(400.0, 50.0);
        assert!(matches!(
            config.validate(),
            Err(FrameError::InvalidSizeRange { .. })
        ));
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let mut config = FrameConfig::new();
        config.min_size = Size::new(0.0, 50.0);
        assert!(matches!(config.validate(), Err(FrameError::NonPositiveSize(_))));

        config.min_size = Size::new(50.0, 50.0);
        config.max_size = Size::new(f64::INFINITY, 300.0);
        assert!(matches!(config.validate(), Err(FrameError::NonPositiveSize(_))));
    }

    #[test]
    fn test_invalid_animation_rejected() {
        let mut spec = AnimationSpec::default();
        spec.duration = -1.0;
        assert!(spec.validate().is_err());

        let mut spec = AnimationSpec::default();
        spec.spring_damping = 0.0;
        assert!(spec.validate().is_err());

        let mut spec = AnimationSpec::default();
        spec.spring_velocity = f64::NAN;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_invalid_hit_slop_rejected() {
        let mut config = FrameConfig::new();
        config.hit_slop = -3.0;
        assert_eq!(config.validate(), Err(FrameError::InvalidHitSlop(-3.0)));
    }

    #[test]
    fn test_curve_endpoints() {
        for curve in [
            AnimationCurve::Linear,
            AnimationCurve::EaseIn,
            AnimationCurve::EaseOut,
            AnimationCurve::EaseInOut,
        ] {
            assert_eq!(curve.ease(0.0), 0.0);
            assert_eq!(curve.ease(1.0), 1.0);
            assert_eq!(curve.ease(2.0), 1.0);
        }
        assert_eq!(AnimationCurve::EaseInOut.ease(0.5), 0.5);
        assert!(AnimationCurve::EaseIn.ease(0.5) < 0.5);
        assert!(AnimationCurve::EaseOut.ease(0.5) > 0.5);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // serde(default) fills in every missing field
        let spec: AnimationSpec = serde::Deserialize::deserialize(
            serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
                std::iter::empty::<(&str, f64)>(),
            ),
        )
        .unwrap();
        assert_eq!(spec, AnimationSpec::default());
    }
}
