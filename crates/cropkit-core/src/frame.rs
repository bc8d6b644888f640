//! The scalable, movable crop frame.
//!
//! [`ScalableFrame`] owns the live geometry of the selection rectangle. Its
//! geometry changes through exactly two paths, both funnelled through the
//! constraint engine:
//!
//! - **Gestures**: `begin_pan` / `begin_pinch`, `update_*`, `end_gesture` /
//!   `cancel_gesture`. Each committed change notifies the observers.
//! - **Animations**: `animate_to_frame`, `animate_to_size`,
//!   `animate_to_ratio`, progressed by `tick`.
//!
//! Starting a gesture cancels a running animation, and requesting an
//! animation ends a running gesture, so the two never fight over the rect.
//!
//! # Example
//!
//! ```ignore
//! use cropkit_core::{Point, Rect, ScalableFrame, Vector};
//!
//! let bounds = Rect::new(0.0, 0.0, 320.0, 480.0);
//! let mut frame = ScalableFrame::new(Rect::new(10.0, 10.0, 100.0, 100.0), bounds);
//!
//! frame.begin_pan(Point::new(110.0, 110.0)); // bottom-right grip
//! frame.update_translation(Vector::new(500.0, 500.0));
//! frame.end_gesture();
//! assert_eq!(frame.rect(), Rect::new(10.0, 10.0, 300.0, 300.0));
//! ```

use crate::animation::{AnimationDriver, Step, TransitionId};
use crate::bounds::BoundsProvider;
use crate::config::{validate_size_range, AnimationSpec, FrameConfig};
use crate::constraint::{self, clamp, Axis, Constraints};
use crate::error::FrameError;
use crate::geometry::{Point, Rect, Size, Vector};
use crate::handle::{handle_at, Handle};
use crate::interaction::{InteractionSession, SessionKind};
use crate::observer::{FrameEvent, FrameObserver, ObserverSet, SubscriptionId};
use crate::routing::{self, Route, SurfaceId};
use serde::{Deserialize, Serialize};

/// What a gesture call did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureOutcome {
    /// A session started on this handle.
    Began(Handle),
    /// The frame geometry changed to this rect.
    Updated(Rect),
    /// The update produced the geometry the frame already had.
    Unchanged,
    /// The session finished (ended or cancelled).
    Ended,
    /// The input did not apply (no session, wrong delta kind, second session,
    /// or a begin outside the frame).
    Ignored,
    /// The frame is inactive; the input belongs to this route.
    Redirected(Route),
}

impl GestureOutcome {
    /// Whether the host should treat the event as consumed by the frame.
    pub fn consumed(&self) -> bool {
        !matches!(self, GestureOutcome::Ignored | GestureOutcome::Redirected(_))
    }
}

/// Result of an animation tick, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The tick was for a transition that is no longer running.
    Stale,
    /// Still animating; the frame now has this geometry.
    Running(Rect),
    /// The transition reached its target.
    Finished(Rect),
}

/// Interactive crop frame.
pub struct ScalableFrame {
    rect: Rect,
    config: FrameConfig,
    locked_ratio: Option<f64>,
    /// Ratio the lock moves to when the running ratio transition finishes.
    pending_ratio: Option<f64>,
    bounds: Box<dyn BoundsProvider>,
    active: bool,
    underneath: Option<SurfaceId>,
    session: Option<InteractionSession>,
    driver: AnimationDriver,
    observers: ObserverSet,
}

impl std::fmt::Debug for ScalableFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalableFrame")
            .field("rect", &self.rect)
            .field("config", &self.config)
            .field("locked_ratio", &self.locked_ratio)
            .field("pending_ratio", &self.pending_ratio)
            .field("active", &self.active)
            .field("underneath", &self.underneath)
            .field("session", &self.session)
            .field("driver", &self.driver)
            .field("observers", &self.observers)
            .finish()
    }
}

impl ScalableFrame {
    /// Create a frame with the default configuration. The initial rect is
    /// clamped into the bounds and size limits.
    pub fn new(rect: Rect, bounds: impl BoundsProvider + 'static) -> Self {
        let mut frame = Self {
            rect,
            config: FrameConfig::default(),
            locked_ratio: None,
            pending_ratio: None,
            bounds: Box::new(bounds),
            active: true,
            underneath: None,
            session: None,
            driver: AnimationDriver::new(),
            observers: ObserverSet::default(),
        };
        frame.rect = clamp(rect, &frame.constraints());
        frame
    }

    /// Create a frame with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error of a degenerate `config`.
    pub fn with_config(
        rect: Rect,
        bounds: impl BoundsProvider + 'static,
        config: FrameConfig,
    ) -> Result<Self, FrameError> {
        config.validate()?;
        let mut frame = Self::new(rect, bounds);
        frame.config = config;
        frame.rect = clamp(rect, &frame.constraints());
        if config.ratio_enabled {
            frame.locked_ratio = frame.current_ratio().ok();
        }
        Ok(frame)
    }

    /// Set the surface that receives input while the frame is inactive.
    pub fn with_underneath_surface(mut self, surface: SurfaceId) -> Self {
        self.underneath = Some(surface);
        self
    }

    // ------------------------------------------------------------------
    // Geometry and configuration
    // ------------------------------------------------------------------

    /// Latest committed geometry.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Current bounds, read from the provider.
    pub fn bounds(&self) -> Rect {
        self.bounds.bounds()
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn min_size(&self) -> Size {
        self.config.min_size
    }

    pub fn max_size(&self) -> Size {
        self.config.max_size
    }

    pub fn is_ratio_enabled(&self) -> bool {
        self.config.ratio_enabled
    }

    /// Ratio enforced while the ratio lock is on.
    pub fn locked_ratio(&self) -> Option<f64> {
        self.locked_ratio
    }

    pub fn hit_slop(&self) -> f64 {
        self.config.hit_slop
    }

    pub fn animation_spec(&self) -> &AnimationSpec {
        &self.config.animation
    }

    /// Every limit the geometry currently has to satisfy.
    pub fn constraints(&self) -> Constraints {
        Constraints::new(
            self.config.min_size,
            self.config.max_size,
            self.ratio_constraint(),
            self.bounds(),
        )
    }

    fn ratio_constraint(&self) -> Option<f64> {
        if self.config.ratio_enabled {
            self.locked_ratio
        } else {
            None
        }
    }

    /// Ratio an in-flight `animate_to_ratio` transition is heading for.
    /// While it is set the geometry moves between two ratios, so
    /// `current_ratio` and `locked_ratio` may differ.
    pub fn pending_ratio(&self) -> Option<f64> {
        self.pending_ratio
    }

    /// Constraints for a geometry that is part of a running transition.
    ///
    /// A transition between two ratios keeps the ratio `rect` already has, so
    /// clamping scales both dimensions together.
    fn transition_constraints(&self, rect: &Rect) -> Constraints {
        let ratio = match (self.ratio_constraint(), self.pending_ratio) {
            (Some(_), Some(_)) if rect.height > 0.0 => Some(rect.width / rect.height),
            (locked, _) => locked,
        };
        Constraints {
            ratio,
            ..self.constraints()
        }
    }

    /// `width / height` of the current geometry.
    ///
    /// # Errors
    ///
    /// [`FrameError::ZeroHeight`] when the frame has no height.
    pub fn current_ratio(&self) -> Result<f64, FrameError> {
        if self.rect.height == 0.0 {
            return Err(FrameError::ZeroHeight);
        }
        Ok(self.rect.width / self.rect.height)
    }

    /// Replace the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error and leaves the frame untouched when
    /// `config` is degenerate.
    pub fn set_config(&mut self, config: FrameConfig) -> Result<(), FrameError> {
        config.validate()?;
        let ratio_enabled = config.ratio_enabled;
        self.config = FrameConfig {
            ratio_enabled: self.config.ratio_enabled,
            ..config
        };
        self.set_ratio_enabled(ratio_enabled);
        self.revalidate();
        Ok(())
    }

    /// Change both size limits at once.
    ///
    /// # Errors
    ///
    /// [`FrameError::InvalidSizeRange`] or [`FrameError::NonPositiveSize`]
    /// for a degenerate range.
    pub fn set_size_limits(&mut self, min: Size, max: Size) -> Result<(), FrameError> {
        validate_size_range(min, max)?;
        self.config.min_size = min;
        self.config.max_size = max;
        self.revalidate();
        Ok(())
    }

    /// # Errors
    ///
    /// Fails when `min` is not positive or exceeds the current maximum.
    pub fn set_min_size(&mut self, min: Size) -> Result<(), FrameError> {
        self.set_size_limits(min, self.config.max_size)
    }

    /// # Errors
    ///
    /// Fails when `max` is not positive or is below the current minimum.
    pub fn set_max_size(&mut self, max: Size) -> Result<(), FrameError> {
        self.set_size_limits(self.config.min_size, max)
    }

    /// Turn the ratio lock on or off. Turning it on captures the ratio of
    /// the current geometry, every time, and cancels a running animation
    /// whose target was chosen without the lock.
    pub fn set_ratio_enabled(&mut self, enabled: bool) {
        if enabled && !self.config.ratio_enabled && self.interrupt_animation() {
            log::debug!("Ratio lock enabled during an animation; animation cancelled");
        }
        self.config.ratio_enabled = enabled;
        self.locked_ratio = if enabled {
            let ratio = self.current_ratio().ok();
            if ratio.is_none() {
                log::warn!("Ratio lock enabled on a zero-height frame; no ratio captured");
            }
            ratio
        } else {
            None
        };
    }

    /// # Errors
    ///
    /// [`FrameError::InvalidAnimation`] for an out-of-range parameter.
    pub fn set_animation_spec(&mut self, spec: AnimationSpec) -> Result<(), FrameError> {
        spec.validate()?;
        self.config.animation = spec;
        Ok(())
    }

    /// # Errors
    ///
    /// [`FrameError::InvalidHitSlop`] when `slop` is negative or not finite.
    pub fn set_hit_slop(&mut self, slop: f64) -> Result<(), FrameError> {
        if !slop.is_finite() || slop < 0.0 {
            return Err(FrameError::InvalidHitSlop(slop));
        }
        self.config.hit_slop = slop;
        Ok(())
    }

    pub fn set_bounds_provider(&mut self, bounds: impl BoundsProvider + 'static) {
        self.bounds = Box::new(bounds);
        self.revalidate();
    }

    /// Re-clamp the committed geometry against the current limits and
    /// bounds, for example after the container was laid out again. No
    /// notifications are sent.
    pub fn revalidate(&mut self) {
        self.rect = clamp(self.rect, &self.transition_constraints(&self.rect));
    }

    /// Jump to `rect` (clamped) without animating. A running animation is
    /// cancelled and a running gesture ended. Returns the committed geometry.
    pub fn set_rect(&mut self, rect: Rect) -> Rect {
        self.interrupt_animation();
        if self.session.is_some() {
            log::debug!("Geometry set during a gesture; ending the gesture");
            self.cancel_gesture();
        }
        self.rect = clamp(rect, &self.constraints());
        self.rect
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    pub fn subscribe(&mut self, observer: Box<dyn FrameObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&self, event: FrameEvent) {
        self.observers.notify(self, event);
    }

    // ------------------------------------------------------------------
    // Hit redirection
    // ------------------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activate or deactivate the frame. Deactivating ends a running
    /// session so the frame stays idle while inactive.
    pub fn set_active(&mut self, active: bool) {
        if !active && self.session.is_some() {
            log::debug!("Frame deactivated during a gesture; cancelling it");
            self.cancel_gesture();
        }
        self.active = active;
    }

    pub fn underneath_surface(&self) -> Option<SurfaceId> {
        self.underneath
    }

    pub fn set_underneath_surface(&mut self, surface: Option<SurfaceId>) {
        self.underneath = surface;
    }

    /// Where a touch at `point` should be delivered.
    pub fn route_input(&self, point: Point) -> Route {
        routing::route_input(
            point,
            &self.rect,
            self.config.hit_slop,
            self.active,
            self.underneath,
        )
    }

    /// The grip under `point`.
    pub fn handle_at(&self, point: Point) -> Handle {
        handle_at(point, &self.rect, self.config.hit_slop)
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    pub fn is_interacting(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    /// A pan began at `point`.
    pub fn begin_pan(&mut self, point: Point) -> GestureOutcome {
        self.begin_session(point, |handle, rect| InteractionSession::pan(handle, rect))
    }

    /// A pinch began with its centroid at `point`.
    pub fn begin_pinch(&mut self, point: Point) -> GestureOutcome {
        self.begin_session(point, |_, rect| InteractionSession::pinch(rect))
    }

    fn begin_session<F>(&mut self, point: Point, make: F) -> GestureOutcome
    where
        F: FnOnce(Handle, Rect) -> InteractionSession,
    {
        if !self.active {
            return GestureOutcome::Redirected(self.route_input(point));
        }
        if let Some(existing) = &self.session {
            log::warn!(
                "Ignoring gesture begin at {:?}: a {:?} session on {:?} is already active",
                point,
                existing.kind(),
                existing.handle()
            );
            return GestureOutcome::Ignored;
        }

        let handle = self.handle_at(point);
        if handle == Handle::None {
            return GestureOutcome::Ignored;
        }

        if self.interrupt_animation() {
            log::debug!("Gesture began during an animation; animation cancelled");
        }

        let session = make(handle, self.rect);
        let event = match session.kind() {
            SessionKind::Move => FrameEvent::BeginMove,
            SessionKind::Scale => FrameEvent::BeginScale,
        };
        log::debug!("Session began on {:?} ({:?})", session.handle(), session.kind());
        let began = session.handle();
        self.session = Some(session);
        self.emit(event);
        GestureOutcome::Began(began)
    }

    /// Pan moved by `delta` since the previous update.
    pub fn update_translation(&mut self, delta: Vector) -> GestureOutcome {
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };
        if !session.accumulate_translation(delta) {
            log::debug!("Translation {:?} ignored by {:?} session", delta, session.gesture());
            return GestureOutcome::Ignored;
        }
        self.commit_session()
    }

    /// Pinch scaled by `factor` since the previous update.
    pub fn update_scale(&mut self, factor: f64) -> GestureOutcome {
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };
        if !session.accumulate_scale(factor) {
            log::debug!("Scale {} ignored by {:?} session", factor, session.gesture());
            return GestureOutcome::Ignored;
        }
        self.commit_session()
    }

    fn commit_session(&mut self) -> GestureOutcome {
        let constraints = self.constraints();
        let Some(session) = &self.session else {
            return GestureOutcome::Ignored;
        };
        let candidate = session.candidate(&constraints);
        if candidate == self.rect {
            return GestureOutcome::Unchanged;
        }

        let event = match session.kind() {
            SessionKind::Move => FrameEvent::DidMove,
            SessionKind::Scale => FrameEvent::DidScale,
        };
        self.rect = candidate;
        self.emit(event);
        GestureOutcome::Updated(candidate)
    }

    /// The gesture finished. The last committed geometry stays.
    pub fn end_gesture(&mut self) -> GestureOutcome {
        self.finish_session("ended")
    }

    /// The gesture was cancelled by the input source. Nothing beyond the
    /// already committed updates is applied.
    pub fn cancel_gesture(&mut self) -> GestureOutcome {
        self.finish_session("cancelled")
    }

    fn finish_session(&mut self, how: &str) -> GestureOutcome {
        let Some(session) = self.session.take() else {
            return GestureOutcome::Ignored;
        };
        log::debug!("Session on {:?} {}", session.handle(), how);
        let event = match session.kind() {
            SessionKind::Move => FrameEvent::EndMove,
            SessionKind::Scale => FrameEvent::EndScale,
        };
        self.emit(event);
        GestureOutcome::Ended
    }

    // ------------------------------------------------------------------
    // Animation
    // ------------------------------------------------------------------

    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Identifier of the running transition.
    pub fn active_transition(&self) -> Option<TransitionId> {
        self.driver.active_id()
    }

    /// Animate to `target`, moved inside the bounds if needed.
    pub fn animate_to_frame<F>(&mut self, target: Rect, completion: F) -> TransitionId
    where
        F: FnOnce(bool) + 'static,
    {
        self.interrupt_animation();
        let target = clamp(target, &self.constraints());
        self.start_transition(target, completion)
    }

    /// Animate to `size`, keeping the current center.
    pub fn animate_to_size<F>(&mut self, size: Size, completion: F) -> TransitionId
    where
        F: FnOnce(bool) + 'static,
    {
        self.interrupt_animation();
        let target = self.centered(size, &self.constraints());
        self.start_transition(target, completion)
    }

    /// Animate to the largest rect of `ratio` that fits the bounds, centered
    /// on the current center. With the ratio lock on, the lock switches to
    /// `ratio` when the transition finishes; an interrupted transition locks
    /// the ratio the frame was left at.
    ///
    /// # Errors
    ///
    /// [`FrameError::InvalidRatio`] for a zero, negative or non-finite ratio.
    /// The completion still runs, once, with `false`.
    pub fn animate_to_ratio<F>(&mut self, ratio: f64, completion: F) -> Result<TransitionId, FrameError>
    where
        F: FnOnce(bool) + 'static,
    {
        let bounds = self.bounds();
        let Some(size) = constraint::max_size_for_ratio(ratio, &bounds) else {
            log::warn!("Rejected animation to invalid ratio {}", ratio);
            completion(false);
            return Err(FrameError::InvalidRatio(ratio));
        };

        self.interrupt_animation();
        let constraints = Constraints {
            ratio: Some(ratio),
            ..self.constraints()
        };
        let target = self.centered(size, &constraints);
        self.pending_ratio = Some(ratio);
        Ok(self.start_transition(target, completion))
    }

    /// Legal rect of (the constrained) `size` around the current center.
    fn centered(&self, size: Size, constraints: &Constraints) -> Rect {
        let size = constraint::constrain_size(size, constraints, Axis::Horizontal);
        clamp(Rect::from_center(self.rect.center(), size), constraints)
    }

    fn start_transition<F>(&mut self, target: Rect, completion: F) -> TransitionId
    where
        F: FnOnce(bool) + 'static,
    {
        if self.session.is_some() {
            log::debug!("Animation requested during a gesture; ending the gesture");
            self.cancel_gesture();
        }

        let spec = self.config.animation;
        let id = self
            .driver
            .start(self.rect, target, spec, Some(Box::new(completion)));
        if spec.duration <= 0.0 {
            self.tick(id, 0.0);
        }
        id
    }

    /// Advance transition `id` by `dt` seconds.
    pub fn tick(&mut self, id: TransitionId, dt: f64) -> TickOutcome {
        match self.driver.tick(id, dt) {
            Step::Stale => TickOutcome::Stale,
            Step::Running(rect) => {
                // spring overshoot may leave the limits
                self.rect = clamp(rect, &self.transition_constraints(&rect));
                TickOutcome::Running(self.rect)
            }
            Step::Finished(transition) => {
                self.rect = transition.target();
                if let Some(ratio) = self.pending_ratio.take() {
                    if self.config.ratio_enabled {
                        self.locked_ratio = Some(ratio);
                    }
                }
                transition.complete(true);
                TickOutcome::Finished(self.rect)
            }
        }
    }

    /// Stop the running animation where it is. Its completion runs with
    /// `false`. Returns whether an animation was running.
    pub fn cancel_animation(&mut self) -> bool {
        self.interrupt_animation()
    }

    /// Cancel the running transition. A ratio transition stopped halfway
    /// leaves the lock on the ratio the frame actually has.
    fn interrupt_animation(&mut self) -> bool {
        let cancelled = self.driver.cancel();
        if self.pending_ratio.take().is_some() && self.config.ratio_enabled {
            self.locked_ratio = self.current_ratio().ok();
            log::debug!("Ratio transition interrupted; lock kept at {:?}", self.locked_ratio);
        }
        cancelled
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
