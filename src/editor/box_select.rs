//! Box Select Tracker
//!
//! Handles rectangular selection in screen space.

use macroquad::math::{vec2, Vec2};
use crate::geometry::{point_in_rect, segments_intersect, Rect};

/// Tracks a box selection drag operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSelectTracker {
    /// Mouse position where the gesture began (fixed corner)
    pub anchor: Vec2,
    /// Current mouse position (moving corner)
    pub current: Vec2,
}

impl BoxSelectTracker {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            anchor,
            current: anchor,
        }
    }

    pub fn update(&mut self, mouse: Vec2) {
        self.current = mouse;
    }

    /// True once the cursor has moved more than `tolerance` from the anchor
    /// on either axis
    pub fn exceeds(&self, tolerance: f32) -> bool {
        let d = (self.current - self.anchor).abs();
        d.x > tolerance || d.y > tolerance
    }

    /// Normalized selection rectangle
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.anchor, self.current)
    }

    /// Box edges a wall may cross to be selected.
    ///
    /// Traced from the anchor through the moving corner: anchor to
    /// (current.x, anchor.y), on to the current corner, then to
    /// (anchor.x, current.y). The closing edge back to the anchor is not part
    /// of the list.
    pub fn crossing_edges(&self) -> [(Vec2, Vec2); 3] {
        let a = self.anchor;
        let m = self.current;
        let p = vec2(m.x, a.y);
        let q = vec2(a.x, m.y);
        [(a, p), (p, m), (m, q)]
    }

    /// Wall membership: either endpoint inside the box, or a proper crossing
    /// of one of the [`crossing_edges`](Self::crossing_edges).
    pub fn encloses_segment(&self, start: Vec2, end: Vec2) -> bool {
        let (a, m) = (self.anchor, self.current);
        point_in_rect(start, a, m)
            || point_in_rect(end, a, m)
            || self
                .crossing_edges()
                .iter()
                .any(|&(e1, e2)| segments_intersect(start, end, e1, e2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(anchor: (f32, f32), current: (f32, f32)) -> BoxSelectTracker {
        BoxSelectTracker {
            anchor: vec2(anchor.0, anchor.1),
            current: vec2(current.0, current.1),
        }
    }

    #[test]
    fn test_box_from_upper_right_drag() {
        // Anchored on node (12, 4) at 20px tiles, dragged to node (8, 9)
        let t = tracker((240.0, 80.0), (160.0, 180.0));
        let r = t.rect();
        assert!((r.x - 160.0).abs() < 0.001);
        assert!((r.y - 80.0).abs() < 0.001);
        assert!((r.w - 80.0).abs() < 0.001);
        assert!((r.h - 100.0).abs() < 0.001);

        let edges = t.crossing_edges();
        assert_eq!(edges[0], (vec2(240.0, 80.0), vec2(160.0, 80.0)));
        assert_eq!(edges[2], (vec2(160.0, 180.0), vec2(240.0, 180.0)));
    }

    #[test]
    fn test_wall_on_box_border_is_enclosed() {
        let t = tracker((160.0, 80.0), (240.0, 180.0));
        // Endpoint exactly on the box's right edge
        assert!(t.encloses_segment(vec2(240.0, 120.0), vec2(400.0, 120.0)));
        // Wall lying just outside the bottom edge
        assert!(!t.encloses_segment(vec2(160.0, 181.0), vec2(240.0, 181.0)));
    }

    #[test]
    fn test_exceeds_tolerance_per_axis() {
        let mut t = BoxSelectTracker::new(vec2(100.0, 100.0));
        t.update(vec2(106.0, 94.0));
        assert!(!t.exceeds(6.0));
        t.update(vec2(100.0, 93.0));
        assert!(t.exceeds(6.0));
    }

    #[test]
    fn test_endpoint_inside_any_orientation() {
        let t = tracker((200.0, 200.0), (100.0, 100.0));
        let inside = vec2(150.0, 150.0);
        for far in [
            vec2(400.0, 150.0),
            vec2(-300.0, 150.0),
            vec2(150.0, 500.0),
            vec2(150.0, -10.0),
            vec2(0.0, 0.0),
            vec2(300.0, 300.0),
        ] {
            assert!(t.encloses_segment(inside, far));
            assert!(t.encloses_segment(far, inside));
        }
    }

    #[test]
    fn test_segment_passing_through() {
        let t = tracker((100.0, 100.0), (200.0, 200.0));
        // Horizontal pass-through crosses the right edge (anchor side and
        // moving side both crossed)
        assert!(t.encloses_segment(vec2(0.0, 150.0), vec2(300.0, 150.0)));
        assert!(!t.encloses_segment(vec2(0.0, 50.0), vec2(300.0, 50.0)));
    }

    #[test]
    fn test_closing_edge_is_not_tested() {
        // Anchor (100,100), moving corner (200,200). The wall enters through
        // the closing edge x=100 at y=150 and leaves exactly through the
        // moving corner, so it properly crosses no tested edge.
        let t = tracker((100.0, 100.0), (200.0, 200.0));
        let start = vec2(0.0, 100.0);
        let end = vec2(400.0, 300.0);
        assert!(!t.encloses_segment(start, end));

        // Same wall against a box dragged the other way round: the crossed
        // edge is now tested
        let flipped = tracker((200.0, 200.0), (100.0, 100.0));
        assert!(flipped.encloses_segment(start, end));
    }
}
