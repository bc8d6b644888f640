//! Source of the containing rectangle.
//!
//! The owning container lays itself out; the frame only asks for the result
//! whenever it needs it, so a bounds change is visible on the very next
//! gesture or animation request.

use crate::geometry::Rect;
use std::cell::Cell;
use std::rc::Rc;

/// Supplies the rect a frame must stay inside.
pub trait BoundsProvider {
    fn bounds(&self) -> Rect;
}

/// Fixed bounds.
impl BoundsProvider for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Bounds shared with a host that updates them on layout.
impl BoundsProvider for Rc<Cell<Rect>> {
    fn bounds(&self) -> Rect {
        self.get()
    }
}

/// Bounds computed on demand by a closure.
pub struct BoundsFn<F>(pub F);

impl<F> BoundsProvider for BoundsFn<F>
where
    F: Fn() -> Rect,
{
    fn bounds(&self) -> Rect {
        (self.0)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_bounds() {
        let r = Rect::new(0.0, 0.0, 320.0, 480.0);
        assert_eq!(r.bounds(), r);
    }

    #[test]
    fn test_shared_bounds_follow_updates() {
        let cell = Rc::new(Cell::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let provider = Rc::clone(&cell);
        cell.set(Rect::new(0.0, 0.0, 200.0, 50.0));
        assert_eq!(provider.bounds(), Rect::new(0.0, 0.0, 200.0, 50.0));
    }

    #[test]
    fn test_closure_bounds() {
        let provider = BoundsFn(|| Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(provider.bounds(), Rect::new(1.0, 2.0, 3.0, 4.0));
    }
}
