//! Token records

use macroquad::color::Color;
use macroquad::math::vec2;
use crate::geometry::Rect;
use super::{Conditions, EntityKind, GridPoint, Slot};

/// Colors handed out to spawned tokens, in order
pub const TOKEN_PALETTE: [Color; 8] = [
    Color::new(0.86, 0.24, 0.24, 1.0),
    Color::new(0.24, 0.52, 0.90, 1.0),
    Color::new(0.30, 0.75, 0.35, 1.0),
    Color::new(0.95, 0.75, 0.20, 1.0),
    Color::new(0.65, 0.35, 0.85, 1.0),
    Color::new(0.95, 0.55, 0.20, 1.0),
    Color::new(0.25, 0.80, 0.80, 1.0),
    Color::new(0.90, 0.45, 0.70, 1.0),
];

/// Lifecycle of a token slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenState {
    #[default]
    Absent,
    Placed,
    /// Under the cursor, or inside the box selection in progress
    Hovered,
    Selected,
}

/// Footprint in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSize {
    pub width: u16,
    pub height: u16,
}

impl TokenSize {
    pub const ONE: TokenSize = TokenSize { width: 1, height: 1 };

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for TokenSize {
    fn default() -> Self {
        Self::ONE
    }
}

/// A movable map piece occupying `size` cells anchored at `position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub state: TokenState,
    pub position: GridPoint,
    pub size: TokenSize,
    pub conditions: Conditions,
    pub color: Color,
}

impl Token {
    pub fn new(position: GridPoint, color: Color) -> Self {
        Self::with_size(position, TokenSize::ONE, color)
    }

    pub fn with_size(position: GridPoint, size: TokenSize, color: Color) -> Self {
        Self {
            state: TokenState::Placed,
            position,
            size,
            conditions: Conditions::empty(),
            color,
        }
    }

    /// Footprint in pixel space
    pub fn rect(&self, tile_size: f32) -> Rect {
        let origin = self.position.to_pixels(tile_size);
        let extent = vec2(self.size.width as f32, self.size.height as f32) * tile_size;
        Rect::from_corners(origin, origin + extent)
    }

    /// True if the grid cell `cell` lies under this token
    pub fn covers_cell(&self, cell: GridPoint) -> bool {
        cell.x >= self.position.x
            && cell.x < self.position.x + self.size.width as i32
            && cell.y >= self.position.y
            && cell.y < self.position.y + self.size.height as i32
    }

    pub fn is_selected(&self) -> bool {
        self.state == TokenState::Selected
    }
}

impl Default for Token {
    fn default() -> Self {
        Self {
            state: TokenState::Absent,
            position: GridPoint::default(),
            size: TokenSize::ONE,
            conditions: Conditions::empty(),
            color: TOKEN_PALETTE[0],
        }
    }
}

impl Slot for Token {
    const KIND: EntityKind = EntityKind::Token;

    fn is_absent(&self) -> bool {
        self.state == TokenState::Absent
    }
}
