//! Border and handle model.
//!
//! The frame border carries eight grips (four corners, four edges) and the
//! body in between. A touch point resolves to exactly one [`Handle`]:
//! corners win over edges and edges win over the body.

use crate::constraint::Axis;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// What a touch on the frame controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    /// Drag moves the whole frame.
    Body,
    /// Outside the frame and its slop; input is not consumed.
    None,
}

/// Which edge of an axis stays put while a handle resizes the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// The left (or top) edge is fixed.
    Min,
    /// The right (or bottom) edge is fixed.
    Max,
    /// The midpoint is fixed.
    Center,
}

impl Anchor {
    /// Place a span of `extent` along an axis whose current span starts at
    /// `start` and is `current` long.
    pub fn place(self, start: f64, current: f64, extent: f64) -> f64 {
        match self {
            Anchor::Min => start,
            Anchor::Max => start + current - extent,
            Anchor::Center => start + (current - extent) / 2.0,
        }
    }

    /// Room the span may grow into inside `[lo, hi]` without moving the anchor.
    pub fn available(self, start: f64, current: f64, lo: f64, hi: f64) -> f64 {
        let room = match self {
            Anchor::Min => hi - start,
            Anchor::Max => start + current - lo,
            Anchor::Center => {
                let mid = start + current / 2.0;
                2.0 * (mid - lo).min(hi - mid)
            }
        };
        room.max(0.0)
    }
}

const CORNERS: [Handle; 4] = [
    Handle::TopLeft,
    Handle::TopRight,
    Handle::BottomRight,
    Handle::BottomLeft,
];

const EDGES: [Handle; 4] = [Handle::Top, Handle::Right, Handle::Bottom, Handle::Left];

impl Handle {
    pub fn is_corner(self) -> bool {
        CORNERS.contains(&self)
    }

    pub fn is_edge(self) -> bool {
        EDGES.contains(&self)
    }

    /// Corner and edge grips resize; the body moves.
    pub fn resizes(self) -> bool {
        self.is_corner() || self.is_edge()
    }

    /// Fixed point per axis as `(horizontal, vertical)`, or `None` for the
    /// body and for no handle.
    ///
    /// Edge handles keep the perpendicular midpoint fixed so a locked ratio
    /// grows the other dimension symmetrically.
    pub fn anchors(self) -> Option<(Anchor, Anchor)> {
        use Anchor::*;
        match self {
            Handle::TopLeft => Some((Max, Max)),
            Handle::Top => Some((Center, Max)),
            Handle::TopRight => Some((Min, Max)),
            Handle::Right => Some((Min, Center)),
            Handle::BottomRight => Some((Min, Min)),
            Handle::Bottom => Some((Center, Min)),
            Handle::BottomLeft => Some((Max, Min)),
            Handle::Left => Some((Max, Center)),
            Handle::Body | Handle::None => None,
        }
    }

    /// Signed growth of `(width, height)` per unit of drag along x and y.
    ///
    /// Dragging the left edge right shrinks the frame, so `Left` yields `-1`.
    pub fn growth(self) -> (f64, f64) {
        match self {
            Handle::TopLeft => (-1.0, -1.0),
            Handle::Top => (0.0, -1.0),
            Handle::TopRight => (1.0, -1.0),
            Handle::Right => (1.0, 0.0),
            Handle::BottomRight => (1.0, 1.0),
            Handle::Bottom => (0.0, 1.0),
            Handle::BottomLeft => (-1.0, 1.0),
            Handle::Left => (-1.0, 0.0),
            Handle::Body | Handle::None => (0.0, 0.0),
        }
    }

    /// The axis that drives a locked ratio for edge handles. Corners pick
    /// their axis per update, see [`Handle::corner_drive`].
    pub fn edge_drive(self) -> Option<Axis> {
        match self {
            Handle::Left | Handle::Right => Some(Axis::Horizontal),
            Handle::Top | Handle::Bottom => Some(Axis::Vertical),
            _ => None,
        }
    }

    /// For corners, the axis whose relative change is larger drives.
    pub fn corner_drive(width_change: f64, height_change: f64) -> Axis {
        if height_change.abs() > width_change.abs() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    /// The point on `rect` this grip sits on, if it is a corner or edge.
    fn grip_point(self, rect: &Rect) -> Option<Point> {
        let p = match self {
            Handle::TopLeft => Point::new(rect.x, rect.y),
            Handle::TopRight => Point::new(rect.max_x(), rect.y),
            Handle::BottomRight => Point::new(rect.max_x(), rect.max_y()),
            Handle::BottomLeft => Point::new(rect.x, rect.max_y()),
            Handle::Top => Point::new(rect.mid_x(), rect.y),
            Handle::Right => Point::new(rect.max_x(), rect.mid_y()),
            Handle::Bottom => Point::new(rect.mid_x(), rect.max_y()),
            Handle::Left => Point::new(rect.x, rect.mid_y()),
            Handle::Body | Handle::None => return None,
        };
        Some(p)
    }
}

/// Resolve `point` to the handle it grabs on a frame at `rect`.
///
/// A corner is hit when the point lies within `hit_slop` of it on both axes.
/// An edge is hit when the point lies within `hit_slop` of the edge line and
/// inside the slop-extended span of that edge. When several grips of the same
/// kind qualify (tiny frames), the nearest one wins.
pub fn handle_at(point: Point, rect: &Rect, hit_slop: f64) -> Handle {
    let slop = if hit_slop.is_finite() { hit_slop.max(0.0) } else { 0.0 };

    let corner = nearest(&CORNERS, point, rect, |_, grip| {
        (point.x - grip.x).abs() <= slop && (point.y - grip.y).abs() <= slop
    });
    if let Some(handle) = corner {
        return handle;
    }

    let edge = nearest(&EDGES, point, rect, |handle, _| match handle {
        Handle::Top => {
            (point.y - rect.y).abs() <= slop && within(point.x, rect.x, rect.max_x(), slop)
        }
        Handle::Bottom => {
            (point.y - rect.max_y()).abs() <= slop && within(point.x, rect.x, rect.max_x(), slop)
        }
        Handle::Left => {
            (point.x - rect.x).abs() <= slop && within(point.y, rect.y, rect.max_y(), slop)
        }
        Handle::Right => {
            (point.x - rect.max_x()).abs() <= slop && within(point.y, rect.y, rect.max_y(), slop)
        }
        _ => false,
    });
    if let Some(handle) = edge {
        return handle;
    }

    if rect.contains(point) {
        Handle::Body
    } else {
        Handle::None
    }
}

fn within(value: f64, lo: f64, hi: f64, slop: f64) -> bool {
    value >= lo - slop && value <= hi + slop
}

fn nearest<F>(candidates: &[Handle], point: Point, rect: &Rect, hit: F) -> Option<Handle>
where
    F: Fn(Handle, Point) -> bool,
{
    candidates
        .iter()
        .filter_map(|&handle| {
            let grip = handle.grip_point(rect)?;
            hit(handle, grip).then(|| (handle, edge_distance(handle, point, grip)))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(handle, _)| handle)
}

/// Corners measure to the corner point, edges to the edge line.
fn edge_distance(handle: Handle, point: Point, grip: Point) -> f64 {
    match handle {
        Handle::Top | Handle::Bottom => (point.y - grip.y).abs(),
        Handle::Left | Handle::Right => (point.x - grip.x).abs(),
        _ => point.distance(grip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOP: f64 = 10.0;

    fn frame() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 100.0)
    }

    #[test]
    fn test_corners() {
        let r = frame();
        assert_eq!(handle_at(Point::new(100.0, 100.0), &r, SLOP), Handle::TopLeft);
        assert_eq!(handle_at(Point::new(305.0, 95.0), &r, SLOP), Handle::TopRight);
        assert_eq!(handle_at(Point::new(298.0, 208.0), &r, SLOP), Handle::BottomRight);
        assert_eq!(handle_at(Point::new(92.0, 195.0), &r, SLOP), Handle::BottomLeft);
    }

    #[test]
    fn test_edges() {
        let r = frame();
        assert_eq!(handle_at(Point::new(200.0, 95.0), &r, SLOP), Handle::Top);
        assert_eq!(handle_at(Point::new(308.0, 150.0), &r, SLOP), Handle::Right);
        assert_eq!(handle_at(Point::new(200.0, 200.0), &r, SLOP), Handle::Bottom);
        assert_eq!(handle_at(Point::new(100.0, 150.0), &r, SLOP), Handle::Left);
    }

    #[test]
    fn test_body_and_none() {
        let r = frame();
        assert_eq!(handle_at(Point::new(200.0, 150.0), &r, SLOP), Handle::Body);
        assert_eq!(handle_at(Point::new(50.0, 50.0), &r, SLOP), Handle::None);
        assert_eq!(handle_at(Point::new(200.0, 215.0), &r, SLOP), Handle::None);
    }

    #[test]
    fn test_corner_beats_edge() {
        // within slop of both the top edge and the top-left corner
        let r = frame();
        assert_eq!(handle_at(Point::new(108.0, 102.0), &r, SLOP), Handle::TopLeft);
    }

    #[test]
    fn test_tiny_frame_picks_nearest_corner() {
        let r = Rect::new(0.0, 0.0, 8.0, 8.0);
        assert_eq!(handle_at(Point::new(1.0, 1.0), &r, SLOP), Handle::TopLeft);
        assert_eq!(handle_at(Point::new(7.0, 7.0), &r, SLOP), Handle::BottomRight);
        assert_eq!(handle_at(Point::new(7.0, 1.0), &r, SLOP), Handle::TopRight);
    }

    #[test]
    fn test_zero_slop_only_exact_grips() {
        let r = frame();
        assert_eq!(handle_at(Point::new(100.0, 100.0), &r, 0.0), Handle::TopLeft);
        assert_eq!(handle_at(Point::new(101.0, 150.0), &r, 0.0), Handle::Body);
        assert_eq!(handle_at(Point::new(99.0, 150.0), &r, 0.0), Handle::None);
    }

    #[test]
    fn test_anchors_are_opposite() {
        assert_eq!(Handle::TopLeft.anchors(), Some((Anchor::Max, Anchor::Max)));
        assert_eq!(Handle::BottomRight.anchors(), Some((Anchor::Min, Anchor::Min)));
        assert_eq!(Handle::Right.anchors(), Some((Anchor::Min, Anchor::Center)));
        assert_eq!(Handle::Body.anchors(), None);
    }

    #[test]
    fn test_handle_kinds() {
        assert!(Handle::TopLeft.resizes());
        assert!(Handle::Left.resizes());
        assert!(!Handle::Body.resizes());
        assert!(!Handle::None.resizes());
        assert_eq!(Handle::Left.edge_drive(), Some(Axis::Horizontal));
        assert_eq!(Handle::Top.edge_drive(), Some(Axis::Vertical));
        assert_eq!(Handle::TopLeft.edge_drive(), None);
    }

    #[test]
    fn test_anchor_place_and_available() {
        assert_eq!(Anchor::Min.place(10.0, 100.0, 150.0), 10.0);
        assert_eq!(Anchor::Max.place(10.0, 100.0, 150.0), -40.0);
        assert_eq!(Anchor::Center.place(10.0, 100.0, 150.0), -15.0);

        assert_eq!(Anchor::Min.available(10.0, 100.0, 0.0, 320.0), 310.0);
        assert_eq!(Anchor::Max.available(10.0, 100.0, 0.0, 320.0), 110.0);
        assert_eq!(Anchor::Center.available(10.0, 100.0, 0.0, 320.0), 120.0);
    }
}
