//! Gesture sessions.
//!
//! A session lives from gesture-begin to gesture-end (or cancel). It keeps
//! the frame geometry from the moment it began and the accumulated gesture
//! delta; every update recomputes the candidate from that snapshot, so
//! rounding never accumulates across updates.
//!
//! ## Gesture semantics
//!
//! - Pan on the body: translate the whole frame
//! - Pan on a corner or edge: resize, keeping the opposite side fixed
//! - Pinch: scale around the frame center

use crate::constraint::{clamp_driven, constrain_size, Axis, Constraints};
use crate::geometry::{Rect, Size, Vector};
use crate::handle::{Anchor, Handle};
use serde::{Deserialize, Serialize};

/// Input device gesture that started a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Pan,
    Pinch,
}

/// What a session does to the frame, which decides its notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    Move,
    Scale,
}

/// Transient state of one gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionSession {
    gesture: GestureKind,
    handle: Handle,
    anchor_rect: Rect,
    translation: Vector,
    scale: f64,
}

impl InteractionSession {
    /// Session for a pan that grabbed `handle`.
    pub fn pan(handle: Handle, anchor_rect: Rect) -> Self {
        Self {
            gesture: GestureKind::Pan,
            handle,
            anchor_rect,
            translation: Vector::default(),
            scale: 1.0,
        }
    }

    /// Session for a pinch; always scales around the center.
    pub fn pinch(anchor_rect: Rect) -> Self {
        Self {
            gesture: GestureKind::Pinch,
            handle: Handle::Body,
            anchor_rect,
            translation: Vector::default(),
            scale: 1.0,
        }
    }

    pub fn gesture(&self) -> GestureKind {
        self.gesture
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Frame geometry when the session began.
    pub fn anchor_rect(&self) -> Rect {
        self.anchor_rect
    }

    pub fn translation(&self) -> Vector {
        self.translation
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn kind(&self) -> SessionKind {
        match self.gesture {
            GestureKind::Pinch => SessionKind::Scale,
            GestureKind::Pan if self.handle.resizes() => SessionKind::Scale,
            GestureKind::Pan => SessionKind::Move,
        }
    }

    /// Add a pan delta. Returns `false` (and changes nothing) for pinch
    /// sessions and non-finite deltas.
    pub fn accumulate_translation(&mut self, delta: Vector) -> bool {
        if self.gesture != GestureKind::Pan || !delta.dx.is_finite() || !delta.dy.is_finite() {
            return false;
        }
        self.translation = self.translation + delta;
        true
    }

    /// Multiply in a pinch scale delta. Returns `false` (and changes nothing)
    /// for pan sessions and factors that are not finite and positive.
    pub fn accumulate_scale(&mut self, factor: f64) -> bool {
        if self.gesture != GestureKind::Pinch || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.scale *= factor;
        true
    }

    /// The clamped geometry this session currently asks for.
    pub fn candidate(&self, constraints: &Constraints) -> Rect {
        let anchor = self.anchor_rect;
        match (self.gesture, self.handle.anchors()) {
            (GestureKind::Pinch, _) => {
                let desired = Size::new(anchor.width * self.scale, anchor.height * self.scale);
                let anchors = (Anchor::Center, Anchor::Center);
                resize(&anchor, desired, anchors, Axis::Horizontal, constraints)
            }
            (GestureKind::Pan, Some(anchors)) => {
                let (gx, gy) = self.handle.growth();
                let desired = Size::new(
                    anchor.width + gx * self.translation.dx,
                    anchor.height + gy * self.translation.dy,
                );
                let drive = self.handle.edge_drive().unwrap_or_else(|| {
                    Handle::corner_drive(
                        relative_change(desired.width, anchor.width),
                        relative_change(desired.height, anchor.height),
                    )
                });
                resize(&anchor, desired, anchors, drive, constraints)
            }
            // a move never changes the size, so the ratio needs no re-deriving
            (GestureKind::Pan, None) => clamp_driven(
                anchor.translated(self.translation),
                &constraints.without_ratio(),
                Axis::Horizontal,
            ),
        }
    }
}

/// Resize `anchor` towards `desired`, keeping `anchors` fixed.
///
/// The growing sides are first capped at the bounds edge so the fixed side
/// stays put; the final clamp then only has work to do when the size limits
/// themselves conflict with the bounds.
fn resize(
    anchor: &Rect,
    desired: Size,
    anchors: (Anchor, Anchor),
    drive: Axis,
    constraints: &Constraints,
) -> Rect {
    let (horizontal, vertical) = anchors;
    let bounds = constraints.bounds;
    let min = constraints.min_size;
    let max = constraints.max_size;

    let room_w = horizontal.available(anchor.x, anchor.width, bounds.x, bounds.max_x());
    let room_h = vertical.available(anchor.y, anchor.height, bounds.y, bounds.max_y());
    let capped = Constraints {
        max_size: Size::new(
            max.width.min(room_w).max(min.width),
            max.height.min(room_h).max(min.height),
        ),
        ..*constraints
    };

    let size = constrain_size(desired, &capped, drive);
    let placed = Rect::new(
        horizontal.place(anchor.x, anchor.width, size.width),
        vertical.place(anchor.y, anchor.height, size.height),
        size.width,
        size.height,
    );
    clamp_driven(placed, constraints, drive)
}

fn relative_change(new: f64, old: f64) -> f64 {
    if old > 0.0 {
        (new - old) / old
    } else {
        new - old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(ratio: Option<f64>) -> Constraints {
        Constraints::new(
            Size::new(50.0, 50.0),
            Size::new(300.0, 300.0),
            ratio,
            Rect::new(0.0, 0.0, 320.0, 480.0),
        )
    }

    #[test]
    fn test_body_pan_moves_and_stays_inside() {
        let mut session = InteractionSession::pan(Handle::Body, Rect::new(10.0, 10.0, 100.0, 100.0));
        assert_eq!(session.kind(), SessionKind::Move);

        session.accumulate_translation(Vector::new(30.0, 40.0));
        assert_eq!(session.candidate(&constraints(None)), Rect::new(40.0, 50.0, 100.0, 100.0));

        session.accumulate_translation(Vector::new(1000.0, -1000.0));
        assert_eq!(session.candidate(&constraints(None)), Rect::new(220.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_bottom_right_drag_capped_by_max_size() {
        let mut session =
            InteractionSession::pan(Handle::BottomRight, Rect::new(10.0, 10.0, 100.0, 100.0));
        assert_eq!(session.kind(), SessionKind::Scale);
        session.accumulate_translation(Vector::new(500.0, 500.0));
        assert_eq!(session.candidate(&constraints(None)), Rect::new(10.0, 10.0, 300.0, 300.0));
    }

    #[test]
    fn test_top_left_drag_keeps_bottom_right_fixed() {
        let start = Rect::new(100.0, 100.0, 100.0, 100.0);
        let mut session = InteractionSession::pan(Handle::TopLeft, start);
        session.accumulate_translation(Vector::new(-20.0, 30.0));
        let r = session.candidate(&constraints(None));
        assert_eq!(r, Rect::new(80.0, 130.0, 120.0, 70.0));
        assert_eq!(r.max_x(), start.max_x());
        assert_eq!(r.max_y(), start.max_y());
    }

    #[test]
    fn test_left_drag_stops_at_min_size_without_moving_right_edge() {
        let start = Rect::new(100.0, 100.0, 100.0, 100.0);
        let mut session = InteractionSession::pan(Handle::Left, start);
        session.accumulate_translation(Vector::new(90.0, 0.0));
        let r = session.candidate(&constraints(None));
        assert_eq!(r, Rect::new(150.0, 100.0, 50.0, 100.0));
    }

    #[test]
    fn test_right_drag_stops_at_bounds_edge() {
        let start = Rect::new(200.0, 100.0, 100.0, 100.0);
        let mut session = InteractionSession::pan(Handle::Right, start);
        session.accumulate_translation(Vector::new(80.0, 0.0));
        let r = session.candidate(&constraints(None));
        // left edge stays at 200, right edge stops at the bounds (320)
        assert_eq!(r, Rect::new(200.0, 100.0, 120.0, 100.0));
    }

    #[test]
    fn test_ratio_locked_right_edge_grows_height() {
        let start = Rect::new(100.0, 100.0, 100.0, 100.0);
        let mut session = InteractionSession::pan(Handle::Right, start);
        session.accumulate_translation(Vector::new(50.0, 0.0));
        let r = session.candidate(&constraints(Some(1.0)));
        assert_eq!(r.width, 150.0);
        assert_eq!(r.height, 150.0);
        assert_eq!(r.x, 100.0);
        assert_eq!(r.mid_y(), start.mid_y());
    }

    #[test]
    fn test_ratio_locked_corner_follows_dominant_axis() {
        let start = Rect::new(10.0, 10.0, 100.0, 100.0);
        let mut session = InteractionSession::pan(Handle::BottomRight, start);
        session.accumulate_translation(Vector::new(10.0, 60.0));
        let r = session.candidate(&constraints(Some(1.0)));
        assert_eq!(r, Rect::new(10.0, 10.0, 160.0, 160.0));
    }

    #[test]
    fn test_pinch_scales_around_center() {
        let start = Rect::new(100.0, 100.0, 100.0, 100.0);
        let mut session = InteractionSession::pinch(start);
        assert_eq!(session.kind(), SessionKind::Scale);
        assert!(session.accumulate_scale(1.5));
        assert!(session.accumulate_scale(1.2));
        assert!((session.scale() - 1.8).abs() < 1e-12);

        let r = session.candidate(&constraints(None));
        assert!((r.width - 180.0).abs() < 1e-9);
        assert!((r.height - 180.0).abs() < 1e-9);
        assert!((r.mid_x() - 150.0).abs() < 1e-9);
        assert!((r.mid_y() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_deltas_are_rejected() {
        let mut pan = InteractionSession::pan(Handle::Body, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!pan.accumulate_scale(2.0));
        assert!(!pan.accumulate_translation(Vector::new(f64::NAN, 0.0)));

        let mut pinch = InteractionSession::pinch(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!pinch.accumulate_translation(Vector::new(1.0, 1.0)));
        assert!(!pinch.accumulate_scale(0.0));
        assert!(!pinch.accumulate_scale(-2.0));
        assert_eq!(pinch.scale(), 1.0);
    }
}
