//! Geometry constraint engine.
//!
//! Every geometry the frame commits, whether it comes from a live drag or an
//! animation target, passes through [`clamp`] (or [`clamp_driven`]). The
//! engine never rejects a rect: it derives the locked-ratio dimension, clamps
//! the size, then translates the origin so the rect sits inside the bounds.
//!
//! # Precedence
//!
//! 1. Locked ratio (when one is set, `width / height == ratio` always holds)
//! 2. Min/max size
//! 3. Bounds size (last resort: a rect larger than the bounds is shrunk)
//! 4. Bounds containment (origin only)
//!
//! All functions here are pure, deterministic and idempotent.

use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Which dimension a gesture is driving.
///
/// With a locked ratio the driving dimension is clamped first and the other
/// one is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// The full set of limits a frame geometry must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub min_size: Size,
    pub max_size: Size,
    /// Locked `width / height`, if any.
    pub ratio: Option<f64>,
    /// Containing rectangle.
    pub bounds: Rect,
}

impl Constraints {
    pub fn new(min_size: Size, max_size: Size, ratio: Option<f64>, bounds: Rect) -> Self {
        Self {
            min_size,
            max_size,
            ratio,
            bounds,
        }
    }

    /// Same limits without the ratio lock.
    pub fn without_ratio(&self) -> Self {
        Self {
            ratio: None,
            ..*self
        }
    }
}

/// Filters out ratios the engine cannot honour (zero, negative, NaN, infinite).
pub fn usable_ratio(ratio: Option<f64>) -> Option<f64> {
    ratio.filter(|k| k.is_finite() && *k > 0.0)
}

/// Clamp a candidate rect, driving a locked ratio from its width.
pub fn clamp(candidate: Rect, constraints: &Constraints) -> Rect {
    clamp_driven(candidate, constraints, Axis::Horizontal)
}

/// Clamp a candidate rect, driving a locked ratio from `drive`.
pub fn clamp_driven(candidate: Rect, constraints: &Constraints, drive: Axis) -> Rect {
    let bounds = sanitize_bounds(constraints.bounds);
    let size = constrain_size(candidate.size(), constraints, drive);

    let x = finite_or(candidate.x, bounds.x);
    let y = finite_or(candidate.y, bounds.y);
    contain(Rect::new(x, y, size.width, size.height), &bounds)
}

/// Size half of [`clamp_driven`]: ratio, min/max and bounds size.
pub fn constrain_size(size: Size, constraints: &Constraints, drive: Axis) -> Size {
    let bounds = sanitize_bounds(constraints.bounds);
    let min = constraints.min_size;
    let max = constraints.max_size;

    let width = finite_or(size.width, min.width);
    let height = finite_or(size.height, min.height);

    match usable_ratio(constraints.ratio) {
        None => Size::new(
            fit(width, (min.width, max.width), (min.width, max.width), bounds.width),
            fit(height, (min.height, max.height), (min.height, max.height), bounds.height),
        ),
        Some(k) => match drive {
            Axis::Horizontal => {
                let w = fit(
                    width,
                    (min.width.max(min.height * k), max.width.min(max.height * k)),
                    (min.width, max.width),
                    bounds.width.min(bounds.height * k),
                );
                Size::new(w, w / k)
            }
            Axis::Vertical => {
                let h = fit(
                    height,
                    (min.height.max(min.width / k), max.height.min(max.width / k)),
                    (min.height, max.height),
                    bounds.height.min(bounds.width / k),
                );
                Size::new(h * k, h)
            }
        },
    }
}

/// Translate `rect` so it lies inside `bounds`. The size is left untouched;
/// a dimension larger than the bounds pins that origin to the bounds origin.
pub fn contain(rect: Rect, bounds: &Rect) -> Rect {
    let x = rect.x.min(bounds.x + (bounds.width - rect.width)).max(bounds.x);
    let y = rect.y.min(bounds.y + (bounds.height - rect.height)).max(bounds.y);
    Rect::new(x, y, rect.width, rect.height)
}

/// The largest size with `ratio` that fits inside `bounds`.
///
/// Returns `None` for an unusable ratio.
pub fn max_size_for_ratio(ratio: f64, bounds: &Rect) -> Option<Size> {
    let k = usable_ratio(Some(ratio))?;
    let bounds = sanitize_bounds(*bounds);
    let width = bounds.width.min(bounds.height * k);
    Some(Size::new(width, width / k))
}

/// Clamp `value` into `range`, falling back to `fallback` when the range is
/// empty (a locked ratio that cannot meet both size ranges), then cap at the
/// bounds extent.
///
/// `min(max(v, lo), hi).min(cap)` is idempotent for fixed parameters, which
/// is what keeps `clamp(clamp(r)) == clamp(r)`.
fn fit(value: f64, range: (f64, f64), fallback: (f64, f64), cap: f64) -> f64 {
    let (lo, hi) = if range.0 <= range.1 { range } else { fallback };
    value.max(lo).min(hi).min(cap).max(0.0)
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn sanitize_bounds(bounds: Rect) -> Rect {
    let extent = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Rect::new(
        finite_or(bounds.x, 0.0),
        finite_or(bounds.y, 0.0),
        extent(bounds.width),
        extent(bounds.height),
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    /// Candidate rects, including negative and oversized ones.
    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (
            -2000.0f64..2000.0,
            -2000.0f64..2000.0,
            -500.0f64..3000.0,
            -500.0f64..3000.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    /// Bounds large enough to hold the maximum size.
    fn roomy_bounds_strategy() -> impl Strategy<Value = Rect> {
        (-100.0f64..100.0, -100.0f64..100.0, 1200.0f64..2000.0, 1200.0f64..2000.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    /// Any bounds, including ones smaller than the minimum size.
    fn any_bounds_strategy() -> impl Strategy<Value = Rect> {
        (-100.0f64..100.0, -100.0f64..100.0, 0.0f64..2000.0, 0.0f64..2000.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    fn ratio_strategy() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![Just(None), (0.25f64..4.0).prop_map(Some)]
    }

    fn constraints(ratio: Option<f64>, bounds: Rect) -> Constraints {
        Constraints::new(Size::new(50.0, 50.0), Size::new(300.0, 300.0), ratio, bounds)
    }

    proptest! {
        /// Property: clamping twice equals clamping once.
        #[test]
        fn prop_clamp_idempotent(
            r in rect_strategy(),
            bounds in any_bounds_strategy(),
            ratio in ratio_strategy(),
            vertical in any::<bool>(),
        ) {
            let c = constraints(ratio, bounds);
            let drive = if vertical { Axis::Vertical } else { Axis::Horizontal };
            let once = clamp_driven(r, &c, drive);
            let twice = clamp_driven(once, &c, drive);
            prop_assert_eq!(once, twice);
        }

        /// Property: a locked ratio is preserved exactly (up to rounding).
        #[test]
        fn prop_ratio_preserved(
            r in rect_strategy(),
            bounds in any_bounds_strategy(),
            k in 0.25f64..4.0,
        ) {
            let c = constraints(Some(k), bounds);
            let out = clamp(r, &c);
            prop_assume!(out.height > 0.0);
            prop_assert!((out.width / out.height - k).abs() <= TOLERANCE * k);
        }

        /// Property: results always lie inside roomy bounds and obey size limits.
        #[test]
        fn prop_contained_and_sized(
            r in rect_strategy(),
            bounds in roomy_bounds_strategy(),
            ratio in ratio_strategy(),
        ) {
            let c = constraints(ratio, bounds);
            let out = clamp(r, &c);
            prop_assert!(bounds.contains_rect(&out, TOLERANCE * 1000.0));
            prop_assert!(out.width >= 50.0 - TOLERANCE && out.width <= 300.0 + TOLERANCE);
            prop_assert!(out.height >= 50.0 - TOLERANCE && out.height <= 300.0 + TOLERANCE);
        }

        /// Property: even tiny bounds never produce negative or non-finite output.
        #[test]
        fn prop_never_negative(
            r in rect_strategy(),
            bounds in any_bounds_strategy(),
            ratio in ratio_strategy(),
        ) {
            let out = clamp(r, &constraints(ratio, bounds));
            prop_assert!(out.is_finite());
            prop_assert!(out.width >= 0.0);
            prop_assert!(out.height >= 0.0);
            prop_assert!(out.width <= bounds.width + TOLERANCE * 1000.0);
            prop_assert!(out.height <= bounds.height + TOLERANCE * 1000.0);
        }
    }
}
