//! Hit-redirection gate.
//!
//! An inactive frame hands every touch to the surface underneath it (for
//! example the image being cropped, so it can be panned). The frame only
//! knows that surface by identifier and never controls its lifetime.

use crate::geometry::{Point, Rect};
use crate::handle::{handle_at, Handle};
use serde::{Deserialize, Serialize};

/// Non-owning reference to the surface beneath a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// Where a touch should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// The frame consumes the touch.
    Frame,
    /// The frame is inactive; deliver to this surface instead.
    Underneath(SurfaceId),
    /// Nobody here wants it; let the host continue its own hit testing.
    PassThrough,
}

/// Decide where a touch at `point` goes.
pub fn route_input(
    point: Point,
    rect: &Rect,
    hit_slop: f64,
    is_active: bool,
    underneath: Option<SurfaceId>,
) -> Route {
    if !is_active {
        return underneath.map_or(Route::PassThrough, Route::Underneath);
    }
    match handle_at(point, rect, hit_slop) {
        Handle::None => Route::PassThrough,
        _ => Route::Frame,
    }
}
