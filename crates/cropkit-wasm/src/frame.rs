//! WASM bindings for the crop frame controller.
//!
//! The host forwards touch input and `requestAnimationFrame` ticks to a
//! [`JsScalableFrame`] and reads back the geometry to render.
//!
//! JS callbacks (observers and animation completions) never run while the
//! frame is borrowed. The core pushes them into an outbox, which is drained
//! after every call returns, so a callback may call back into the frame.

use crate::crop::JsNormalizedCrop;
use crate::types::JsRect;
use cropkit_core::{
    FrameConfig, FrameEvent, FrameObserver, NormalizedCrop, Point, Rect, ScalableFrame, Size,
    SubscriptionId, SurfaceId, TransitionId, Vector,
};
use js_sys::Function;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// A JS call waiting for the frame to be released.
enum Pending {
    Event {
        listener: Function,
        event: FrameEvent,
        rect: Rect,
    },
    Completion {
        callback: Function,
        finished: bool,
    },
}

impl Pending {
    fn deliver(self) {
        let result = match self {
            Pending::Event {
                listener,
                event,
                rect,
            } => listener.call2(
                &JsValue::NULL,
                &JsValue::from_str(event.name()),
                &JsValue::from(JsRect::from(rect)),
            ),
            Pending::Completion { callback, finished } => {
                callback.call1(&JsValue::NULL, &JsValue::from_bool(finished))
            }
        };
        if let Err(err) = result {
            log::error!("Frame callback threw: {:?}", err);
        }
    }
}

type Outbox = Rc<RefCell<VecDeque<Pending>>>;

/// Observer forwarding every notification to one JS function as
/// `listener(eventName, rect)`.
struct JsObserver {
    listener: Function,
    outbox: Outbox,
}

impl JsObserver {
    fn push(&self, event: FrameEvent, frame: &ScalableFrame) {
        self.outbox.borrow_mut().push_back(Pending::Event {
            listener: self.listener.clone(),
            event,
            rect: frame.rect(),
        });
    }
}

impl FrameObserver for JsObserver {
    fn on_begin_scale(&self, frame: &ScalableFrame) {
        self.push(FrameEvent::BeginScale, frame);
    }

    fn on_end_scale(&self, frame: &ScalableFrame) {
        self.push(FrameEvent::EndScale, frame);
    }

    fn on_begin_move(&self, frame: &ScalableFrame) {
        self.push(FrameEvent::BeginMove, frame);
    }

    fn on_end_move(&self, frame: &ScalableFrame) {
        self.push(FrameEvent::EndMove, frame);
    }

    fn on_did_move(&self, frame: &ScalableFrame) {
        self.push(FrameEvent::DidMove, frame);
    }

    fn on_did_scale(&self, frame: &ScalableFrame) {
        self.push(FrameEvent::DidScale, frame);
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn busy() -> JsValue {
    JsValue::from_str("Frame is already in use by a callback")
}

/// Interactive crop frame for JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const frame = new JsScalableFrame(
///   new JsRect(10, 10, 100, 100),
///   new JsRect(0, 0, 320, 480),
///   { ratio_enabled: false, hit_slop: 24 },
/// );
/// frame.subscribe((name, rect) => redraw(rect));
///
/// canvas.onpointerdown = (e) => frame.begin_pan(e.offsetX, e.offsetY);
/// canvas.onpointermove = (e) => frame.update_translation(e.movementX, e.movementY);
/// canvas.onpointerup = () => frame.end_gesture();
///
/// const id = frame.animate_to_ratio(16 / 9, (finished) => console.log(finished));
/// let last = performance.now();
/// const step = (now) => {
///   const outcome = frame.tick(id, (now - last) / 1000);
///   last = now;
///   if (outcome.Running) requestAnimationFrame(step);
/// };
/// requestAnimationFrame(step);
/// ```
#[wasm_bindgen]
pub struct JsScalableFrame {
    inner: RefCell<ScalableFrame>,
    bounds: Rc<Cell<Rect>>,
    outbox: Outbox,
}

#[wasm_bindgen]
impl JsScalableFrame {
    /// Create a frame at `rect` inside `bounds`.
    ///
    /// # Arguments
    /// * `rect` - Initial geometry (clamped)
    /// * `bounds` - Containing rect
    /// * `config` - Optional `FrameConfig` object; missing fields use defaults
    ///
    /// # Errors
    /// Returns error if the config cannot be deserialized or is degenerate
    #[wasm_bindgen(constructor)]
    pub fn new(rect: &JsRect, bounds: &JsRect, config: JsValue) -> Result<JsScalableFrame, JsValue> {
        let config: FrameConfig = if config.is_undefined() || config.is_null() {
            FrameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid frame config: {}", e)))?
        };

        let shared = Rc::new(Cell::new(Rect::from(bounds)));
        let frame = ScalableFrame::with_config(Rect::from(rect), Rc::clone(&shared), config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(JsScalableFrame {
            inner: RefCell::new(frame),
            bounds: shared,
            outbox: Rc::default(),
        })
    }

    // ------------------------------------------------------------------
    // Geometry and configuration
    // ------------------------------------------------------------------

    /// Latest committed geometry.
    #[wasm_bindgen(getter)]
    pub fn rect(&self) -> Result<JsRect, JsValue> {
        self.read(|frame| frame.rect().into())
    }

    #[wasm_bindgen(getter)]
    pub fn bounds(&self) -> JsRect {
        self.bounds.get().into()
    }

    /// Update the containing rect (after layout) and re-clamp the frame.
    pub fn set_bounds(&self, bounds: &JsRect) -> Result<(), JsValue> {
        self.bounds.set(Rect::from(bounds));
        self.with_frame(|frame| frame.revalidate())
    }

    /// Jump to `rect` without animating, ending any gesture. Returns the
    /// committed geometry.
    pub fn set_rect(&self, rect: &JsRect) -> Result<JsRect, JsValue> {
        self.with_frame(|frame| frame.set_rect(Rect::from(rect)).into())
    }

    /// Current configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        let config = self.read(|frame| *frame.config())?;
        to_js(&config)
    }

    /// Replace the configuration. Missing fields take their defaults.
    pub fn set_config(&self, config: JsValue) -> Result<(), JsValue> {
        let config: FrameConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid frame config: {}", e)))?;
        self.with_frame(|frame| frame.set_config(config))?
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_size_limits(
        &self,
        min_width: f64,
        min_height: f64,
        max_width: f64,
        max_height: f64,
    ) -> Result<(), JsValue> {
        let min = Size::new(min_width, min_height);
        let max = Size::new(max_width, max_height);
        self.with_frame(|frame| frame.set_size_limits(min, max))?
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_hit_slop(&self, slop: f64) -> Result<(), JsValue> {
        self.with_frame(|frame| frame.set_hit_slop(slop))?
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn ratio_enabled(&self) -> Result<bool, JsValue> {
        self.read(ScalableFrame::is_ratio_enabled)
    }

    /// Turn the ratio lock on (capturing the current ratio) or off.
    pub fn set_ratio_enabled(&self, enabled: bool) -> Result<(), JsValue> {
        self.with_frame(|frame| frame.set_ratio_enabled(enabled))
    }

    #[wasm_bindgen(getter)]
    pub fn locked_ratio(&self) -> Result<Option<f64>, JsValue> {
        self.read(ScalableFrame::locked_ratio)
    }

    /// Ratio the lock moves to once the running ratio animation finishes.
    #[wasm_bindgen(getter)]
    pub fn pending_ratio(&self) -> Result<Option<f64>, JsValue> {
        self.read(ScalableFrame::pending_ratio)
    }

    /// `width / height` of the current geometry.
    ///
    /// # Errors
    /// Returns error if the frame has zero height
    pub fn current_ratio(&self) -> Result<f64, JsValue> {
        self.read(ScalableFrame::current_ratio)?
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Crop of the image displayed in `image` selected by the frame.
    pub fn normalized_crop(&self, image: &JsRect) -> Result<JsNormalizedCrop, JsValue> {
        self.read(|frame| NormalizedCrop::from_frame(&frame.rect(), &Rect::from(image)).into())
    }

    // ------------------------------------------------------------------
    // Hit redirection
    // ------------------------------------------------------------------

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> Result<bool, JsValue> {
        self.read(ScalableFrame::is_active)
    }

    pub fn set_active(&self, active: bool) -> Result<(), JsValue> {
        self.with_frame(|frame| frame.set_active(active))
    }

    /// Surface that receives input while the frame is inactive.
    pub fn set_underneath_surface(&self, surface: Option<u32>) -> Result<(), JsValue> {
        let surface = surface.map(|id| SurfaceId(u64::from(id)));
        self.with_frame(|frame| frame.set_underneath_surface(surface))
    }

    /// Where a touch at `(x, y)` should go: `"Frame"`, `"PassThrough"` or
    /// `{ Underneath: surfaceId }`.
    pub fn route_input(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let route = self.read(|frame| frame.route_input(Point::new(x, y)))?;
        to_js(&route)
    }

    /// Name of the grip under `(x, y)`, e.g. `"TopLeft"` or `"Body"`.
    pub fn handle_at(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let handle = self.read(|frame| frame.handle_at(Point::new(x, y)))?;
        to_js(&handle)
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    #[wasm_bindgen(getter)]
    pub fn interacting(&self) -> Result<bool, JsValue> {
        self.read(ScalableFrame::is_interacting)
    }

    pub fn begin_pan(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let outcome = self.with_frame(|frame| frame.begin_pan(Point::new(x, y)))?;
        to_js(&outcome)
    }

    pub fn begin_pinch(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let outcome = self.with_frame(|frame| frame.begin_pinch(Point::new(x, y)))?;
        to_js(&outcome)
    }

    /// Pan moved by `(dx, dy)` since the previous update.
    pub fn update_translation(&self, dx: f64, dy: f64) -> Result<JsValue, JsValue> {
        let outcome = self.with_frame(|frame| frame.update_translation(Vector::new(dx, dy)))?;
        to_js(&outcome)
    }

    /// Pinch scaled by `factor` since the previous update.
    pub fn update_scale(&self, factor: f64) -> Result<JsValue, JsValue> {
        let outcome = self.with_frame(|frame| frame.update_scale(factor))?;
        to_js(&outcome)
    }

    pub fn end_gesture(&self) -> Result<JsValue, JsValue> {
        let outcome = self.with_frame(ScalableFrame::end_gesture)?;
        to_js(&outcome)
    }

    pub fn cancel_gesture(&self) -> Result<JsValue, JsValue> {
        let outcome = self.with_frame(ScalableFrame::cancel_gesture)?;
        to_js(&outcome)
    }

    // ------------------------------------------------------------------
    // Animation
    // ------------------------------------------------------------------

    #[wasm_bindgen(getter)]
    pub fn animating(&self) -> Result<bool, JsValue> {
        self.read(ScalableFrame::is_animating)
    }

    /// Animate to `target`. Returns the transition id to pass to `tick`.
    pub fn animate_to_frame(&self, target: &JsRect, completion: Option<Function>) -> Result<f64, JsValue> {
        let done = self.completion(completion);
        let id = self.with_frame(|frame| frame.animate_to_frame(Rect::from(target), done))?;
        Ok(transition_to_js(id))
    }

    /// Animate to a new size around the current center.
    pub fn animate_to_size(
        &self,
        width: f64,
        height: f64,
        completion: Option<Function>,
    ) -> Result<f64, JsValue> {
        let done = self.completion(completion);
        let id = self.with_frame(|frame| frame.animate_to_size(Size::new(width, height), done))?;
        Ok(transition_to_js(id))
    }

    /// Animate to the largest rect of `ratio` that fits the bounds.
    ///
    /// # Errors
    /// Returns error for a zero, negative or non-finite ratio; the completion
    /// is still called with `false`
    pub fn animate_to_ratio(&self, ratio: f64, completion: Option<Function>) -> Result<f64, JsValue> {
        let done = self.completion(completion);
        self.with_frame(|frame| frame.animate_to_ratio(ratio, done))?
            .map(transition_to_js)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Advance transition `id` by `dt` seconds. Returns `"Stale"`,
    /// `{ Running: rect }` or `{ Finished: rect }`.
    pub fn tick(&self, id: f64, dt: f64) -> Result<JsValue, JsValue> {
        let outcome = self.with_frame(|frame| frame.tick(transition_from_js(id), dt))?;
        to_js(&outcome)
    }

    /// Stop the running animation; its completion receives `false`.
    pub fn cancel_animation(&self) -> Result<bool, JsValue> {
        self.with_frame(ScalableFrame::cancel_animation)
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register `listener(eventName, rect)` for `"beginScale"`,
    /// `"endScale"`, `"beginMove"`, `"endMove"`, `"didMove"` and
    /// `"didScale"`. Returns the subscription id.
    pub fn subscribe(&self, listener: Function) -> Result<f64, JsValue> {
        let observer = JsObserver {
            listener,
            outbox: Rc::clone(&self.outbox),
        };
        let id = self.with_frame(|frame| frame.subscribe(Box::new(observer)))?;
        Ok(id.0 as f64)
    }

    pub fn unsubscribe(&self, id: f64) -> Result<bool, JsValue> {
        self.with_frame(|frame| frame.unsubscribe(SubscriptionId(id as u64)))
    }
}

impl JsScalableFrame {
    /// Run `f` on the frame, then deliver the JS calls it queued.
    fn with_frame<R>(&self, f: impl FnOnce(&mut ScalableFrame) -> R) -> Result<R, JsValue> {
        let result = {
            let mut frame = self.inner.try_borrow_mut().map_err(|_| busy())?;
            f(&mut *frame)
        };
        self.flush();
        Ok(result)
    }

    fn read<R>(&self, f: impl FnOnce(&ScalableFrame) -> R) -> Result<R, JsValue> {
        let frame = self.inner.try_borrow().map_err(|_| busy())?;
        Ok(f(&*frame))
    }

    fn flush(&self) {
        loop {
            let next = self.outbox.borrow_mut().pop_front();
            match next {
                Some(pending) => pending.deliver(),
                None => break,
            }
        }
    }

    fn completion(&self, callback: Option<Function>) -> impl FnOnce(bool) + 'static {
        let outbox = Rc::clone(&self.outbox);
        move |finished| {
            if let Some(callback) = callback {
                outbox
                    .borrow_mut()
                    .push_back(Pending::Completion { callback, finished });
            }
        }
    }
}

impl Drop for JsScalableFrame {
    fn drop(&mut self) {
        if let Ok(mut frame) = self.inner.try_borrow_mut() {
            frame.cancel_animation();
        }
        self.flush();
    }
}

fn transition_to_js(id: TransitionId) -> f64 {
    id.0 as f64
}

fn transition_from_js(id: f64) -> TransitionId {
    TransitionId(id as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_ids_survive_js_numbers() {
        for raw in [1u64, 42, 1 << 40] {
            let id = TransitionId(raw);
            assert_eq!(transition_from_js(transition_to_js(id)), id);
        }
    }

    #[test]
    fn test_negative_or_nan_ids_never_match_a_transition() {
        // ids start at 1, so these can only ever be stale
        assert_eq!(transition_from_js(-3.0), TransitionId(0));
        assert_eq!(transition_from_js(f64::NAN), TransitionId(0));
    }
}
