//! Wall records

use macroquad::math::Vec2;
use super::{EntityKind, GridPoint, Slot};

/// Lifecycle of a wall slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallState {
    /// Empty slot; coordinates are meaningless
    #[default]
    Absent,
    Placed,
    /// Enclosed by the box selection in progress
    Marked,
}

/// A line-segment occluder between two grid nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wall {
    pub state: WallState,
    pub start: GridPoint,
    pub end: GridPoint,
}

impl Wall {
    pub fn new(start: GridPoint, end: GridPoint) -> Self {
        Self {
            state: WallState::Placed,
            start,
            end,
        }
    }

    /// Endpoints in pixel space
    pub fn segment(&self, tile_size: f32) -> (Vec2, Vec2) {
        (self.start.to_pixels(tile_size), self.end.to_pixels(tile_size))
    }

    pub fn is_marked(&self) -> bool {
        self.state == WallState::Marked
    }
}

impl Slot for Wall {
    const KIND: EntityKind = EntityKind::Wall;

    fn is_absent(&self) -> bool {
        self.state == WallState::Absent
    }
}
