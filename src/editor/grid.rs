//! Map grid and cursor snapping

use macroquad::math::{vec2, Vec2};
use crate::map::GridPoint;

/// Grid dimensions plus the pixel scale they are drawn at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Width in cells
    pub width: u16,
    /// Height in cells
    pub height: u16,
    /// Pixels per cell
    pub tile_size: f32,
    /// Pick and gesture tolerance in pixels
    pub tolerance: f32,
}

impl Grid {
    pub fn new(width: u16, height: u16, tile_size: f32, tolerance: f32) -> Self {
        Self { width, height, tile_size, tolerance }
    }

    /// Nearest node by per-axis rounding
    pub fn nearest_node(&self, pixel: Vec2) -> GridPoint {
        GridPoint::new(
            (pixel.x / self.tile_size).round() as i32,
            (pixel.y / self.tile_size).round() as i32,
        )
    }

    /// Cell containing the pixel
    pub fn cell_at(&self, pixel: Vec2) -> GridPoint {
        GridPoint::new(
            (pixel.x / self.tile_size).floor() as i32,
            (pixel.y / self.tile_size).floor() as i32,
        )
    }

    /// True if the cursor sits in the tolerance band around a grid line
    /// crossing, tested on each axis independently.
    pub fn on_node(&self, pixel: Vec2) -> bool {
        self.in_band(pixel.x) && self.in_band(pixel.y)
    }

    fn in_band(&self, coord: f32) -> bool {
        (coord + self.tolerance).rem_euclid(self.tile_size) <= self.tolerance * 2.0
    }

    /// Node under the cursor, if the cursor is on a node band inside the grid
    pub fn snap(&self, pixel: Vec2) -> Option<GridPoint> {
        if !self.on_node(pixel) {
            return None;
        }
        let node = self.nearest_node(pixel);
        self.contains_node(node).then_some(node)
    }

    pub fn contains_node(&self, node: GridPoint) -> bool {
        (0..=self.width as i32).contains(&node.x) && (0..=self.height as i32).contains(&node.y)
    }

    pub fn contains_cell(&self, cell: GridPoint) -> bool {
        (0..self.width as i32).contains(&cell.x) && (0..self.height as i32).contains(&cell.y)
    }

    /// Pixel size of the whole map
    pub fn pixel_extent(&self) -> Vec2 {
        vec2(self.width as f32, self.height as f32) * self.tile_size
    }
}
