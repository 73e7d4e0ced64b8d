//! Map renderer
//!
//! Draws a [`FrameView`] with macroquad immediate-mode calls. Holds no state
//! of its own beyond the optional background texture.

use macroquad::prelude::*;
use crate::editor::EditorMode;
use crate::map::{Token, TokenState, WallState};
use crate::session::{FrameView, WallStyle};

const BG_COLOR: Color = Color::new(0.96, 0.96, 0.96, 1.0);
const NODE_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const HOVER_NODE_COLOR: Color = Color::new(0.44, 0.12, 0.80, 1.0);
const WALL_COLOR: Color = Color::new(0.0, 0.89, 0.19, 1.0);
const WALL_MARKED_COLOR: Color = Color::new(1.0, 0.63, 0.0, 1.0);
const WALL_SELECTED_COLOR: Color = Color::new(0.90, 0.16, 0.22, 1.0);
const PENDING_WALL_COLOR: Color = Color::new(0.78, 0.48, 1.0, 1.0);
const SHADOW_COLOR: Color = Color::new(0.05, 0.05, 0.07, 1.0);
const BOX_COLOR: Color = Color::new(0.20, 0.55, 0.95, 1.0);
const HUD_COLOR: Color = Color::new(0.15, 0.15, 0.18, 1.0);

const WALL_THICKNESS: f32 = 3.0;
const NODE_RADIUS: f32 = 3.0;

/// Background map image drawn under the grid
pub struct Background {
    pub texture: Texture2D,
    pub scale: f32,
}

impl Background {
    pub fn scaled_size(&self) -> Vec2 {
        vec2(self.texture.width(), self.texture.height()) * self.scale
    }
}

/// Draw one frame
pub fn draw_frame(view: &FrameView, background: Option<&Background>, tolerance: f32) {
    clear_background(BG_COLOR);

    if let Some(bg) = background {
        draw_texture_ex(
            &bg.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(bg.scaled_size()),
                ..Default::default()
            },
        );
    }

    let tile = view.grid.tile_size;

    if view.mode == EditorMode::WallEditing {
        let extent = view.grid.pixel_extent();
        draw_rectangle_lines(0.0, 0.0, extent.x, extent.y, 1.0, NODE_COLOR);
        draw_nodes(view);
        if let Some(node) = view.hovered_node {
            let p = node.to_pixels(tile);
            draw_poly(p.x, p.y, 4, tolerance, 0.0, HOVER_NODE_COLOR);
        }
    }

    for (slot, token) in view.map.tokens.iter() {
        if token.state != TokenState::Absent {
            draw_token(token, tile, view.active_token == Some(slot));
        }
    }

    // Fog goes over tokens so hidden ones disappear
    for shadow in view.shadows {
        for [a, b, c] in shadow.triangles {
            draw_triangle(a, b, c, SHADOW_COLOR);
        }
    }

    for (slot, wall) in view.map.walls.iter() {
        let color = match wall.state {
            WallState::Absent => continue,
            _ if view.selected_wall == Some(slot) => WALL_SELECTED_COLOR,
            WallState::Marked => WALL_MARKED_COLOR,
            WallState::Placed => WALL_COLOR,
        };
        let (a, b) = wall.segment(tile);
        draw_wall(a, b, color, view.display.wall_style);
    }

    if let Some((from, to)) = view.pending_wall {
        draw_line(from.x, from.y, to.x, to.y, WALL_THICKNESS, PENDING_WALL_COLOR);
    }

    if let Some(r) = view.selection_box {
        draw_rectangle(r.x, r.y, r.w, r.h, Color::new(BOX_COLOR.r, BOX_COLOR.g, BOX_COLOR.b, 0.15));
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, BOX_COLOR);
    }

    draw_hud(view);
}

fn draw_nodes(view: &FrameView) {
    let tile = view.grid.tile_size;
    for x in 0..=view.grid.width {
        for y in 0..=view.grid.height {
            draw_poly(x as f32 * tile, y as f32 * tile, 4, NODE_RADIUS, 0.0, NODE_COLOR);
        }
    }
}

fn draw_wall(a: Vec2, b: Vec2, color: Color, style: WallStyle) {
    match style {
        WallStyle::Solid => draw_line(a.x, a.y, b.x, b.y, WALL_THICKNESS, color),
        WallStyle::Outline => {
            draw_line(a.x, a.y, b.x, b.y, WALL_THICKNESS + 2.0, BLACK);
            draw_line(a.x, a.y, b.x, b.y, WALL_THICKNESS - 1.0, color);
            draw_circle(a.x, a.y, WALL_THICKNESS * 0.5, BLACK);
            draw_circle(b.x, b.y, WALL_THICKNESS * 0.5, BLACK);
        }
    }
}

fn draw_token(token: &Token, tile: f32, active: bool) {
    let conditions = token.conditions;
    let mut r = token.rect(tile);
    if conditions.is_prone() {
        r.y += r.h * 0.5;
        r.h *= 0.5;
    }
    let inset = 2.0;
    let (x, y, w, h) = (r.x + inset, r.y + inset, r.w - inset * 2.0, r.h - inset * 2.0);

    let mut fill = token.color;
    if conditions.is_invisible() {
        fill.a = 0.35;
    }
    draw_rectangle(x, y, w, h, fill);

    let (border, thickness) = match token.state {
        TokenState::Selected if active => (WHITE, 3.0),
        TokenState::Selected => (WHITE, 2.0),
        TokenState::Hovered => (YELLOW, 2.0),
        _ if conditions.is_blinded() => (DARKGRAY, 2.0),
        _ => (BLACK, 1.0),
    };
    draw_rectangle_lines(x, y, w, h, thickness, border);

    if conditions.is_unconscious() {
        draw_line(x, y, x + w, y + h, 2.0, BLACK);
        draw_line(x + w, y, x, y + h, 2.0, BLACK);
    }

    if !conditions.is_empty() {
        let count = conditions.iter().count();
        draw_text(&count.to_string(), x + 2.0, y + h - 2.0, tile * 0.6, BLACK);
    }
}

fn draw_hud(view: &FrameView) {
    let fog = if view.display.fog_enabled { "on" } else { "off" };
    let status = format!(
        "{} | fog {} | walls {} | tokens {}   [Tab] mode  [E]/[P] edit/play  [V] wall style  [F] fog",
        view.mode.label(),
        fog,
        view.map.walls.live_count(),
        view.map.tokens.live_count(),
    );
    draw_text(&status, 8.0, screen_height() - 8.0, 18.0, HUD_COLOR);
}
