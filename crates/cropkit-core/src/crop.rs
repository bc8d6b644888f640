//! Conversion of the on-screen frame into crop coordinates.
//!
//! The frame lives in view coordinates, on top of an image displayed in some
//! rect. A downstream crop step wants the selection relative to the image:
//! normalized values in `[0, 1]` where `(0, 0)` is the top-left corner and
//! `(1, 1)` the bottom-right corner, independent of the pixel dimensions.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Crop region in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCrop {
    /// Left edge (0.0 to 1.0)
    pub left: f64,
    /// Top edge (0.0 to 1.0)
    pub top: f64,
    /// Width (0.0 to 1.0)
    pub width: f64,
    /// Height (0.0 to 1.0)
    pub height: f64,
}

impl Default for NormalizedCrop {
    fn default() -> Self {
        Self::FULL
    }
}

/// Integer pixel region of a concrete image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl NormalizedCrop {
    /// The whole image.
    pub const FULL: NormalizedCrop = NormalizedCrop {
        left: 0.0,
        top: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Crop selected by `frame` over an image displayed in `image`.
    ///
    /// The part of the frame outside the image is cut off. A degenerate
    /// image rect (zero or non-finite extent) yields [`NormalizedCrop::FULL`].
    pub fn from_frame(frame: &Rect, image: &Rect) -> Self {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(image.width) || !usable(image.height) || !frame.is_finite() {
            return Self::FULL;
        }

        let left = ((frame.x - image.x) / image.width).clamp(0.0, 1.0);
        let top = ((frame.y - image.y) / image.height).clamp(0.0, 1.0);
        let right = ((frame.max_x() - image.x) / image.width).clamp(left, 1.0);
        let bottom = ((frame.max_y() - image.y) / image.height).clamp(top, 1.0);

        Self {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn is_full(&self) -> bool {
        self.left <= 0.0 && self.top <= 0.0 && self.width >= 1.0 && self.height >= 1.0
    }

    /// Pixel region of an `image_width` x `image_height` image.
    ///
    /// Coordinates are rounded, clamped to the image, and the region is at
    /// least 1x1 for a non-empty image.
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> PixelRegion {
        if self.is_full() {
            return PixelRegion {
                x: 0,
                y: 0,
                width: image_width,
                height: image_height,
            };
        }

        let scale = |v: f64, extent: u32| (v.clamp(0.0, 1.0) * f64::from(extent)).round() as u32;

        let x = scale(self.left, image_width).min(image_width.saturating_sub(1));
        let y = scale(self.top, image_height).min(image_height.saturating_sub(1));
        let right = (x + scale(self.width, image_width)).min(image_width);
        let bottom = (y + scale(self.height, image_height)).min(image_height);

        PixelRegion {
            x,
            y,
            width: right.saturating_sub(x).max(1).min(image_width),
            height: bottom.saturating_sub(y).max(1).min(image_height),
        }
    }
}
