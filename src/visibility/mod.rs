//! Visibility Engine
//!
//! Per-wall shadow casting from a single viewpoint. Each wall's endpoints are
//! pushed away from the viewpoint by a fixed extrusion factor; the wall and
//! its pushed copy bound a quadrilateral that is emitted as two triangles.
//!
//! Shadows from different walls are not merged. Overlaps double-cover, which
//! is invisible under an opaque fill. Nothing is cached: walls and viewpoint
//! change every frame in play mode.

use macroquad::math::Vec2;
use crate::map::{SlotStore, Wall, WallState};

/// Default distance multiplier for pushed-out wall endpoints
pub const DEFAULT_EXTRUSION: f32 = 10.0;

/// Three vertices in pixel space
pub type Triangle = [Vec2; 3];

/// Region hidden behind one wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowShape {
    pub triangles: [Triangle; 2],
}

/// Shadow of the wall `a`-`b` seen from `viewpoint`.
///
/// With `c` and `d` the extruded endpoints, the triangles cover the
/// quadrilateral a-c-d-b. Their order is picked from the turn direction of
/// a→b→c so the outline never folds over itself, whichever side of the wall
/// the viewpoint is on.
pub fn wall_shadow(viewpoint: Vec2, a: Vec2, b: Vec2, extrusion: f32) -> ShadowShape {
    let c = viewpoint + (a - viewpoint) * extrusion;
    let d = viewpoint + (b - viewpoint) * extrusion;

    let turn = (b - a).perp_dot(c - b);
    let triangles = if turn > 0.0 {
        [[a, c, d], [a, d, b]]
    } else {
        [[a, d, c], [a, b, d]]
    };
    ShadowShape { triangles }
}

/// Shadows of every placed wall. No viewpoint means no shadows.
pub fn cast_shadows(
    viewpoint: Option<Vec2>,
    walls: &SlotStore<Wall>,
    tile_size: f32,
    extrusion: f32,
) -> Vec<ShadowShape> {
    let Some(eye) = viewpoint else {
        return Vec::new();
    };

    walls
        .iter()
        .filter(|(_, wall)| wall.state == WallState::Placed)
        .map(|(_, wall)| {
            let (a, b) = wall.segment(tile_size);
            wall_shadow(eye, a, b, extrusion)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::segments_intersect;
    use crate::map::GridPoint;
    use macroquad::math::vec2;

    fn signed_area(t: &Triangle) -> f32 {
        (t[1] - t[0]).perp_dot(t[2] - t[0]) * 0.5
    }

    fn has_edge(t: &Triangle, p: Vec2, q: Vec2) -> bool {
        t.contains(&p) && t.contains(&q)
    }

    /// Outline a→c→d→b must be a simple polygon
    fn assert_simple_outline(a: Vec2, b: Vec2, shape: &ShadowShape, eye: Vec2) {
        let c = eye + (a - eye) * DEFAULT_EXTRUSION;
        let d = eye + (b - eye) * DEFAULT_EXTRUSION;
        assert!(!segments_intersect(a, c, d, b), "side edges cross");
        assert!(!segments_intersect(c, d, b, a), "far edge crosses wall");

        let [t1, t2] = shape.triangles;
        // Both halves wind the same way, so together they tile the quad
        assert!(signed_area(&t1) * signed_area(&t2) > 0.0);
        // The wall itself bounds the shadow
        assert!(has_edge(&t1, a, b) || has_edge(&t2, a, b));
    }

    #[test]
    fn test_shadow_from_either_side() {
        let a = vec2(100.0, 100.0);
        let b = vec2(200.0, 100.0);
        for eye in [
            vec2(150.0, 50.0),
            vec2(150.0, 150.0),
            vec2(20.0, 40.0),
            vec2(260.0, 180.0),
            vec2(150.0, 99.0),
        ] {
            let shape = wall_shadow(eye, a, b, DEFAULT_EXTRUSION);
            assert_simple_outline(a, b, &shape, eye);
        }
    }

    #[test]
    fn test_winding_is_consistent_across_sides() {
        let a = vec2(100.0, 100.0);
        let b = vec2(100.0, 300.0);
        let left = wall_shadow(vec2(0.0, 200.0), a, b, DEFAULT_EXTRUSION);
        let right = wall_shadow(vec2(250.0, 200.0), a, b, DEFAULT_EXTRUSION);
        for t in left.triangles.iter().chain(right.triangles.iter()) {
            assert!(signed_area(t) < 0.0);
        }
    }

    #[test]
    fn test_shadow_lies_behind_wall() {
        let a = vec2(100.0, 100.0);
        let b = vec2(200.0, 100.0);
        let shape = wall_shadow(vec2(150.0, 200.0), a, b, DEFAULT_EXTRUSION);
        for t in shape.triangles {
            for v in t {
                assert!(v.y <= 100.0);
            }
        }
    }

    #[test]
    fn test_degenerate_wall_does_not_panic() {
        let p = vec2(80.0, 80.0);
        let shape = wall_shadow(vec2(0.0, 0.0), p, p, DEFAULT_EXTRUSION);
        for t in shape.triangles {
            assert!(signed_area(&t).abs() < 0.001);
        }
        // Viewpoint sitting on an endpoint
        let shape = wall_shadow(p, p, vec2(120.0, 80.0), DEFAULT_EXTRUSION);
        assert!(shape.triangles.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_no_viewpoint_no_shadows() {
        let mut walls = SlotStore::<Wall>::with_capacity(8);
        for i in 0..5 {
            walls.allocate(Wall::new(GridPoint::new(i, 0), GridPoint::new(i, 3))).unwrap();
        }
        assert!(cast_shadows(None, &walls, 20.0, DEFAULT_EXTRUSION).is_empty());
    }

    #[test]
    fn test_one_shape_per_placed_wall() {
        let mut walls = SlotStore::<Wall>::with_capacity(8);
        for i in 0..4 {
            walls.allocate(Wall::new(GridPoint::new(i * 2, 0), GridPoint::new(i * 2, 3))).unwrap();
        }
        walls.free(1);
        let shadows = cast_shadows(Some(vec2(300.0, 300.0)), &walls, 20.0, DEFAULT_EXTRUSION);
        assert_eq!(shadows.len(), 3);
    }
}
