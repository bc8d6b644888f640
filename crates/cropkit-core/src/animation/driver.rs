//! Transition ownership and supersession.
//!
//! The driver owns at most one [`Transition`]. Starting a new one replaces
//! the old one wholesale; the replaced transition's completion runs with
//! `false` before [`AnimationDriver::start`] returns. Every completion runs
//! exactly once: on natural finish, on supersession, on cancel, or when the
//! transition is dropped.

use super::spring::SpringTiming;
use crate::config::AnimationSpec;
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Continuation invoked with `true` when a transition reaches its target and
/// `false` when it is superseded or cancelled.
pub type Completion = Box<dyn FnOnce(bool)>;

/// Identifies one animation request. Ticks carry it so a late tick for a
/// replaced transition can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId(pub u64);

/// One in-flight interpolation from `from` to `to`.
pub struct Transition {
    id: TransitionId,
    from: Rect,
    to: Rect,
    spec: AnimationSpec,
    spring: SpringTiming,
    elapsed: f64,
    completion: Option<Completion>,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("elapsed", &self.elapsed)
            .field("pending", &self.completion.is_some())
            .finish()
    }
}

impl Transition {
    fn new(id: TransitionId, from: Rect, to: Rect, spec: AnimationSpec, completion: Option<Completion>) -> Self {
        Self {
            id,
            from,
            to,
            spring: SpringTiming::new(&spec),
            spec,
            elapsed: 0.0,
            completion,
        }
    }

    pub fn id(&self) -> TransitionId {
        self.id
    }

    pub fn target(&self) -> Rect {
        self.to
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.spring.duration()
    }

    /// Interpolated geometry at the current elapsed time.
    fn current(&self) -> Rect {
        let duration = self.spring.duration();
        if duration <= 0.0 {
            return self.to;
        }
        let eased = self.spec.curve.ease(self.elapsed / duration);
        let progress = self.spring.progress_at(eased * duration);
        self.from.lerp(&self.to, progress)
    }

    /// Run the completion, consuming the transition.
    pub fn complete(mut self, finished: bool) {
        if let Some(completion) = self.completion.take() {
            completion(finished);
        }
    }
}

impl Drop for Transition {
    fn drop(&mut self) {
        if let Some(completion) = self.completion.take() {
            log::debug!("Transition {:?} dropped before completion", self.id);
            completion(false);
        }
    }
}

/// Result of advancing the driver by one tick.
#[derive(Debug)]
pub enum Step {
    /// The tick belongs to a transition that is no longer in flight.
    Stale,
    /// Still animating; the frame should show this geometry.
    Running(Rect),
    /// Reached the end. The caller commits the target, then calls
    /// [`Transition::complete`] with `true`.
    Finished(Transition),
}

/// Owner of the single in-flight transition of a frame.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    next_id: u64,
    active: Option<Transition>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_id(&self) -> Option<TransitionId> {
        self.active.as_ref().map(Transition::id)
    }

    /// Begin a transition, superseding (and completing with `false`) any
    /// transition already in flight.
    pub fn start(
        &mut self,
        from: Rect,
        to: Rect,
        spec: AnimationSpec,
        completion: Option<Completion>,
    ) -> TransitionId {
        if let Some(previous) = self.active.take() {
            log::debug!("Transition {:?} superseded", previous.id());
            previous.complete(false);
        }

        self.next_id += 1;
        let id = TransitionId(self.next_id);
        log::debug!("Transition {:?} started: {:?} -> {:?} over {}s", id, from, to, spec.duration);
        self.active = Some(Transition::new(id, from, to, spec, completion));
        id
    }

    /// Stop the in-flight transition without replacement. Its completion
    /// runs with `false`. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(transition) => {
                log::debug!("Transition {:?} cancelled", transition.id());
                transition.complete(false);
                true
            }
            None => false,
        }
    }

    /// Advance transition `id` by `dt` seconds.
    pub fn tick(&mut self, id: TransitionId, dt: f64) -> Step {
        let Some(transition) = self.active.as_mut().filter(|t| t.id == id) else {
            log::trace!("Stale tick for {:?}", id);
            return Step::Stale;
        };

        if dt.is_finite() && dt > 0.0 {
            transition.elapsed += dt;
        }

        if transition.is_done() {
            match self.active.take() {
                Some(done) => {
                    log::debug!("Transition {:?} finished", done.id());
                    Step::Finished(done)
                }
                None => Step::Stale,
            }
        } else {
            let rect = transition.current();
            log::trace!("Transition {:?} at {:?}", id, rect);
            Step::Running(rect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(u32, bool)>>>;

    fn recorder(log: &Log, tag: u32) -> Option<Completion> {
        let log = Rc::clone(log);
        Some(Box::new(move |finished| log.borrow_mut().push((tag, finished))))
    }

    fn rects() -> (Rect, Rect) {
        (
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(50.0, 50.0, 200.0, 200.0),
        )
    }

    #[test]
    fn test_runs_to_completion() {
        let log: Log = Rc::default();
        let (from, to) = rects();
        let mut driver = AnimationDriver::new();
        let id = driver.start(from, to, AnimationSpec::default(), recorder(&log, 1));

        assert!(matches!(driver.tick(id, 0.5), Step::Running(_)));
        assert!(log.borrow().is_empty());

        match driver.tick(id, 0.5) {
            Step::Finished(done) => {
                assert_eq!(done.target(), to);
                done.complete(true);
            }
            other => panic!("expected finish, got {other:?}"),
        }
        assert_eq!(*log.borrow(), vec![(1, true)]);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_supersession_completes_previous_with_false() {
        let log: Log = Rc::default();
        let (from, to) = rects();
        let mut driver = AnimationDriver::new();
        let first = driver.start(from, to, AnimationSpec::default(), recorder(&log, 1));
        driver.tick(first, 0.2);

        let second = driver.start(from, from, AnimationSpec::default(), recorder(&log, 2));
        assert_eq!(*log.borrow(), vec![(1, false)]);
        assert_ne!(first, second);

        assert!(matches!(driver.tick(first, 1.0), Step::Stale));
        if let Step::Finished(done) = driver.tick(second, 2.0) {
            done.complete(true);
        }
        assert_eq!(*log.borrow(), vec![(1, false), (2, true)]);
    }

    #[test]
    fn test_cancel_and_drop_complete_once() {
        let log: Log = Rc::default();
        let (from, to) = rects();

        let mut driver = AnimationDriver::new();
        driver.start(from, to, AnimationSpec::default(), recorder(&log, 1));
        assert!(driver.cancel());
        assert!(!driver.cancel());

        {
            let mut dropped = AnimationDriver::new();
            dropped.start(from, to, AnimationSpec::default(), recorder(&log, 2));
        }
        assert_eq!(*log.borrow(), vec![(1, false), (2, false)]);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_tick() {
        let (from, to) = rects();
        let mut driver = AnimationDriver::new();
        let spec = AnimationSpec {
            duration: 0.0,
            ..AnimationSpec::default()
        };
        let id = driver.start(from, to, spec, None);
        assert!(matches!(driver.tick(id, 0.0), Step::Finished(_)));
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let (from, to) = rects();
        let mut driver = AnimationDriver::new();
        let id = driver.start(from, to, AnimationSpec::default(), None);
        driver.tick(id, 0.25);
        driver.tick(id, -10.0);
        driver.tick(id, f64::NAN);
        assert_eq!(driver.active.as_ref().map(Transition::elapsed), Some(0.25));
    }

    #[test]
    fn test_running_rect_starts_at_from() {
        let (from, to) = rects();
        let mut driver = AnimationDriver::new();
        let id = driver.start(from, to, AnimationSpec::default(), None);
        match driver.tick(id, 0.0) {
            Step::Running(rect) => assert!(rect.approx_eq(&from, 1e-9)),
            other => panic!("expected running, got {other:?}"),
        }
    }
}
