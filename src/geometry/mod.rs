//! Geometry Kernel
//!
//! Collision primitives shared by picking, box selection and shadow casting.
//! All inputs are pixel-space coordinates. Every function is total over finite
//! inputs, zero-length segments and empty rectangles included.

mod rect;

pub use rect::Rect;

use macroquad::math::Vec2;

/// Distance from `p` to the closest point of segment `a`-`b`
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// True if `p` lies within `tolerance` of segment `a`-`b`
pub fn point_near_segment(p: Vec2, a: Vec2, b: Vec2, tolerance: f32) -> bool {
    distance_to_segment(p, a, b) <= tolerance
}

/// Proper intersection point of segments `a1`-`a2` and `b1`-`b2`.
///
/// The segments must cross strictly: touching at an endpoint, an endpoint
/// lying on the other segment, or collinear overlap all return `None`.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let r = a2 - a1;
    let s = b2 - b1;

    // Side of each endpoint relative to the other segment's line
    let d1 = s.perp_dot(a1 - b1);
    let d2 = s.perp_dot(a2 - b1);
    let d3 = r.perp_dot(b1 - a1);
    let d4 = r.perp_dot(b2 - a1);

    if !(opposite_sides(d1, d2) && opposite_sides(d3, d4)) {
        return None;
    }

    let t = d1 / (d1 - d2);
    Some(a1 + r * t)
}

/// True if the two segments properly cross (see [`segment_intersection`])
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    segment_intersection(a1, a2, b1, b2).is_some()
}

/// Inclusive point-in-box test with corners in any order
pub fn point_in_rect(p: Vec2, corner1: Vec2, corner2: Vec2) -> bool {
    Rect::from_corners(corner1, corner2).contains(p)
}

/// Inclusive AABB overlap
pub fn rects_overlap(r1: &Rect, r2: &Rect) -> bool {
    r1.overlaps(r2)
}

fn opposite_sides(a: f32, b: f32) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}
