//! Animation driver for frame transitions.
//!
//! A transition interpolates the frame rect from its current geometry to a
//! target that has already been through the constraint engine. Progress is
//! driven by discrete ticks from the host (for example one per display
//! refresh); there are no timers or blocking waits.
//!
//! ## Timing
//!
//! Normalized time is first eased by the [`AnimationCurve`](crate::config::AnimationCurve),
//! then mapped through a damped spring response, see [`spring`].

mod driver;
pub mod spring;

pub use driver::{AnimationDriver, Completion, Step, Transition, TransitionId};
pub use spring::SpringTiming;
