//! Axis-aligned rectangle in pixel space

use macroquad::math::{vec2, Vec2};

/// A rectangle defined by position and size.
///
/// Width and height are never negative: [`Rect::from_corners`] normalizes
/// corners given in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
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

    /// Build from two opposite corners, in either order
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Check if point is inside, edges included
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Inclusive overlap: rectangles that only share an edge still overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let r = Rect::from_corners(vec2(100.0, 20.0), vec2(40.0, 80.0));
        assert!((r.x - 40.0).abs() < 0.001);
        assert!((r.y - 20.0).abs() < 0.001);
        assert!((r.w - 60.0).abs() < 0.001);
        assert!((r.h - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(vec2(50.0, 40.0)));
        assert!(r.contains(vec2(10.0, 20.0)));
        assert!(r.contains(vec2(110.0, 70.0)));
        assert!(!r.contains(vec2(5.0, 40.0)));
        assert!(!r.contains(vec2(50.0, 70.5)));
    }

    #[test]
    fn test_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Rect::new(10.5, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Rect::new(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn test_degenerate_rect() {
        let p = Rect::from_corners(vec2(3.0, 3.0), vec2(3.0, 3.0));
        assert!(p.contains(vec2(3.0, 3.0)));
        assert!(p.overlaps(&p));
    }
}
