//! WASM bindings for crop coordinate conversion.
//!
//! The host feeds the resulting normalized region to its export pipeline.

use crate::types::JsRect;
use cropkit_core::{NormalizedCrop, Rect};
use wasm_bindgen::prelude::*;

/// Crop region in normalized image coordinates (0.0 to 1.0).
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsNormalizedCrop {
    inner: NormalizedCrop,
}

#[wasm_bindgen]
impl JsNormalizedCrop {
    #[wasm_bindgen(getter)]
    pub fn left(&self) -> f64 {
        self.inner.left
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> f64 {
        self.inner.top
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height
    }

    /// Whether the region covers the whole image.
    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// Pixel region `[x, y, width, height]` of an image with the given
    /// dimensions.
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> Vec<u32> {
        let region = self.inner.to_pixels(image_width, image_height);
        vec![region.x, region.y, region.width, region.height]
    }
}

impl From<NormalizedCrop> for JsNormalizedCrop {
    fn from(inner: NormalizedCrop) -> Self {
        Self { inner }
    }
}

/// Convert a frame rect into the crop of the image displayed in `image`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const crop = normalized_crop(frame.rect, imageRect);
/// const [x, y, w, h] = crop.to_pixels(bitmap.width, bitmap.height);
/// ```
#[wasm_bindgen]
pub fn normalized_crop(frame: &JsRect, image: &JsRect) -> JsNormalizedCrop {
    NormalizedCrop::from_frame(&Rect::from(frame), &Rect::from(image)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_crop_binding() {
        let crop = normalized_crop(
            &JsRect::new(50.0, 0.0, 50.0, 100.0),
            &JsRect::new(0.0, 0.0, 100.0, 100.0),
        );
        assert_eq!(crop.left(), 0.5);
        assert_eq!(crop.top(), 0.0);
        assert_eq!(crop.width(), 0.5);
        assert_eq!(crop.height(), 1.0);
        assert!(!crop.is_full());
        assert_eq!(crop.to_pixels(200, 100), vec![100, 0, 100, 100]);
    }
}
