//! Collision predicates for axis-aligned geometry
//!
//! Everything here answers "do these overlap?" and nothing more. Response
//! (velocity flips, state changes) lives in the tick. Boundaries are
//! inclusive: shapes that merely touch count as overlapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Closed-interval overlap on one axis
#[inline]
pub fn spans_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_min <= b_max && b_min <= a_max
}

/// Rectangle vs rectangle, touching edges included
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    spans_overlap(a.left(), a.right(), b.left(), b.right())
        && spans_overlap(a.top(), a.bottom(), b.top(), b.bottom())
}

/// Ball vs rectangle, using the ball's bounding square
pub fn ball_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    rects_overlap(&Rect::around_circle(center, radius), rect)
}

/// True if `rect`'s horizontal extent overlaps `other`'s
pub fn horizontal_overlap(rect: &Rect, other: &Rect) -> bool {
    spans_overlap(rect.left(), rect.right(), other.left(), other.right())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_overlap_interior() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
        assert!(rects_overlap(&b, &a));
    }

    #[test]
    fn test_rects_touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the x = 10 edge
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        // Shares only the (10, 10) corner
        let corner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rects_overlap(&a, &right));
        assert!(rects_overlap(&a, &corner));
    }

    #[test]
    fn test_rects_separated() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.5, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.5, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
        assert!(!rects_overlap(&a, &c));
    }

    #[test]
    fn test_ball_rect_overlap() {
        let brick = Rect::new(100.0, 100.0, 60.0, 20.0);

        // Ball top edge exactly on the brick's lower edge
        assert!(ball_rect_overlap(Vec2::new(130.0, 130.0), 10.0, &brick));
        // One pixel further down: clear
        assert!(!ball_rect_overlap(Vec2::new(130.0, 131.0), 10.0, &brick));
        // Off to the side
        assert!(!ball_rect_overlap(Vec2::new(50.0, 110.0), 10.0, &brick));
    }

    #[test]
    fn test_horizontal_overlap_ignores_vertical() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let far_below = Rect::new(5.0, 500.0, 10.0, 10.0);
        assert!(horizontal_overlap(&a, &far_below));
        assert!(!rects_overlap(&a, &far_below));
    }

    #[test]
    fn test_around_circle() {
        let r = Rect::around_circle(Vec2::new(50.0, 40.0), 10.0);
        assert_eq!(r, Rect::new(40.0, 30.0, 20.0, 20.0));
        assert_eq!(r.center(), Vec2::new(50.0, 40.0));
    }
}
