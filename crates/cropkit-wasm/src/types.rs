//! WASM-compatible wrapper types for frame geometry.
//!
//! This module provides JavaScript-friendly types that wrap the core Cropkit
//! geometry, handling the conversion between Rust and JavaScript.

use cropkit_core::Rect;
use wasm_bindgen::prelude::*;

/// A rectangle in view coordinates.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl JsRect {
    #[wasm_bindgen(constructor)]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> JsRect {
        JsRect {
            x,
            y,
            width,
            height,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether the point lies inside the rect (edges included).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        Rect::from(self).contains(cropkit_core::Point::new(x, y))
    }
}

impl From<Rect> for JsRect {
    fn from(rect: Rect) -> Self {
        JsRect::new(rect.x, rect.y, rect.width, rect.height)
    }
}

impl From<&JsRect> for Rect {
    fn from(rect: &JsRect) -> Self {
        Rect::new(rect.x, rect.y, rect.width, rect.height)
    }
}
