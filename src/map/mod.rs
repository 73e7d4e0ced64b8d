//! Entity Store
//!
//! Walls and tokens live in fixed-capacity slot arrays. A freed slot goes back
//! to `Absent` and is handed out again by the next allocation; interaction
//! state refers to entities by slot index only.

mod conditions;
mod store;
mod token;
mod wall;

pub use conditions::{Condition, Conditions};
pub use store::{Slot, SlotStore};
pub use token::{Token, TokenSize, TokenState, TOKEN_PALETTE};
pub use wall::{Wall, WallState};

use macroquad::math::{vec2, Vec2};
use std::fmt;

/// Integer position in grid-cell units.
///
/// Pixel position is grid units times tile size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_pixels(self, tile_size: f32) -> Vec2 {
        vec2(self.x as f32 * tile_size, self.y as f32 * tile_size)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Which entity collection an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Wall,
    Token,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Wall => write!(f, "wall"),
            EntityKind::Token => write!(f, "token"),
        }
    }
}

/// Error type for entity allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Every slot of the store is in use
    CapacityExceeded { kind: EntityKind, capacity: usize },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::CapacityExceeded { kind, capacity } => {
                write!(f, "{} capacity exceeded ({} slots in use)", kind, capacity)
            }
        }
    }
}

impl std::error::Error for MapError {}

/// All map entities owned by a session
#[derive(Debug, Clone)]
pub struct Map {
    pub walls: SlotStore<Wall>,
    pub tokens: SlotStore<Token>,
}

impl Map {
    pub fn new(max_walls: usize, max_tokens: usize) -> Self {
        Self {
            walls: SlotStore::with_capacity(max_walls),
            tokens: SlotStore::with_capacity(max_tokens),
        }
    }

    pub fn allocate_wall(&mut self, wall: Wall) -> Result<usize, MapError> {
        self.walls.allocate(wall)
    }

    pub fn allocate_token(&mut self, token: Token) -> Result<usize, MapError> {
        self.tokens.allocate(token)
    }

    /// Free a slot of either kind. Returns false if it was already empty.
    pub fn free(&mut self, kind: EntityKind, slot: usize) -> bool {
        match kind {
            EntityKind::Wall => self.walls.free(slot).is_some(),
            EntityKind::Token => self.tokens.free(slot).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_point_to_pixels() {
        let p = GridPoint::new(10, 3).to_pixels(20.0);
        assert!((p.x - 200.0).abs() < 0.001);
        assert!((p.y - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_free_by_kind() {
        let mut map = Map::new(4, 4);
        let w = map.allocate_wall(Wall::new(GridPoint::new(0, 0), GridPoint::new(1, 0))).unwrap();
        let t = map.allocate_token(Token::new(GridPoint::new(2, 2), TOKEN_PALETTE[0])).unwrap();

        assert!(map.free(EntityKind::Wall, w));
        assert!(!map.free(EntityKind::Wall, w));
        assert!(map.tokens.get(t).is_some());
        assert!(map.free(EntityKind::Token, t));
        assert!(map.tokens.get(t).is_none());
    }

    #[test]
    fn test_capacity_error_message() {
        let err = MapError::CapacityExceeded { kind: EntityKind::Wall, capacity: 512 };
        assert_eq!(err.to_string(), "wall capacity exceeded (512 slots in use)");
    }
}
