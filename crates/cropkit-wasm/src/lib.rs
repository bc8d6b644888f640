//! Cropkit WASM - WebAssembly bindings for Cropkit
//!
//! This crate exposes the cropkit-core crop frame to JavaScript/TypeScript
//! applications: touch input and animation ticks go in, geometry and
//! notifications come out.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible geometry wrappers
//! - `frame` - The interactive frame controller (`JsScalableFrame`)
//! - `crop` - Frame to normalized crop conversion
//! - `logging` - `log` records forwarded to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsRect, JsScalableFrame, normalized_crop } from '@cropkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const frame = new JsScalableFrame(new JsRect(10, 10, 100, 100), new JsRect(0, 0, 320, 480));
//! frame.begin_pan(110, 110);
//! frame.update_translation(40, 40);
//! frame.end_gesture();
//! const crop = normalized_crop(frame.rect, imageRect);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod frame;
mod logging;
mod types;

// Re-export public types
pub use crop::{normalized_crop, JsNormalizedCrop};
pub use frame::JsScalableFrame;
pub use logging::set_log_level;
pub use types::JsRect;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(logging::DEFAULT_LEVEL);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
