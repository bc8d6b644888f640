//! Error types for frame configuration and geometry queries.

use crate::geometry::Size;
use thiserror::Error;

/// Failures a [`ScalableFrame`](crate::ScalableFrame) reports to its caller.
///
/// Geometry input is never rejected (it is clamped instead); these errors
/// cover degenerate configuration and undefined queries only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// The minimum size exceeds the maximum size on some axis.
    #[error("Invalid size range: min {min:?} exceeds max {max:?}")]
    InvalidSizeRange { min: Size, max: Size },

    /// A size limit is zero, negative or not finite.
    #[error("Size limits must be positive and finite, got {0:?}")]
    NonPositiveSize(Size),

    /// The aspect ratio is undefined for a zero-height frame.
    #[error("Cannot compute ratio of a frame with zero height")]
    ZeroHeight,

    /// An animation parameter is out of range.
    #[error("Invalid animation parameter: {0}")]
    InvalidAnimation(String),

    /// A requested ratio is zero, negative or not finite.
    #[error("Invalid aspect ratio: {0}")]
    InvalidRatio(f64),

    /// The handle hit slop is negative or not finite.
    #[error("Invalid hit slop: {0}")]
    InvalidHitSlop(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_error_display() {
        assert_eq!(
            FrameError::ZeroHeight.to_string(),
            "Cannot compute ratio of a frame with zero height"
        );
        assert_eq!(
            FrameError::InvalidRatio(-1.0).to_string(),
            "Invalid aspect ratio: -1"
        );
        assert_eq!(
            FrameError::InvalidAnimation("duration".to_string()).to_string(),
            "Invalid animation parameter: duration"
        );
    }
}
