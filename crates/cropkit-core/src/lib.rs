//! Cropkit Core - Interactive crop frame library
//!
//! This crate provides the core of Cropkit's crop frame: a rectangle the user
//! moves and resizes with touch gestures, kept inside its container, within
//! its size limits and (optionally) at a locked aspect ratio, plus animated
//! transitions to target frames, sizes and ratios.
//!
//! # Module Structure
//!
//! - `geometry` - Points, vectors, sizes and rects
//! - `constraint` - The pure clamping engine every geometry passes through
//! - `handle` - Resize grips and hit testing
//! - `interaction` - Gesture sessions
//! - `animation` - Spring timing and the transition driver
//! - `routing` - Input redirection while the frame is inactive
//! - `frame` - [`ScalableFrame`], tying the above together
//! - `crop` - Frame to normalized crop conversion
//! - `asset` - Upload asset contract

pub mod animation;
pub mod asset;
pub mod bounds;
pub mod config;
pub mod constraint;
pub mod crop;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod handle;
pub mod interaction;
pub mod observer;
pub mod routing;

pub use animation::{Completion, TransitionId};
pub use asset::{Asset, MemoryAsset};
pub use bounds::{BoundsFn, BoundsProvider};
pub use config::{AnimationCurve, AnimationSpec, FrameConfig};
pub use constraint::{clamp, Axis, Constraints};
pub use crop::{NormalizedCrop, PixelRegion};
pub use error::FrameError;
pub use frame::{GestureOutcome, ScalableFrame, TickOutcome};
pub use geometry::{Point, Rect, Size, Vector};
pub use handle::{handle_at, Handle};
pub use interaction::{GestureKind, InteractionSession, SessionKind};
pub use observer::{FrameEvent, FrameObserver, SubscriptionId};
pub use routing::{Route, SurfaceId};
