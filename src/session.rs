//! Frame Driver
//!
//! One `Session` per editor run. The host calls [`Session::update`] once per
//! frame with the sampled input, forwards toolbar/shortcut commands through
//! [`Session::apply`], and draws from [`Session::view`]. All mutation happens
//! inside those calls.

use log::{debug, info};
use macroquad::color::Color;
use macroquad::math::Vec2;
use crate::config::SessionConfig;
use crate::editor::{play_tool, wall_tool, EditorEvent, EditorMode, Gesture, Grid, Interaction};
use crate::geometry::Rect;
use crate::input::FrameInput;
use crate::map::{Condition, GridPoint, Map, Slot, TokenSize, TOKEN_PALETTE};
use crate::visibility::{cast_shadows, ShadowShape};

/// Cosmetic wall drawing variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallStyle {
    #[default]
    Solid,
    Outline,
}

impl WallStyle {
    pub fn toggled(self) -> Self {
        match self {
            WallStyle::Solid => WallStyle::Outline,
            WallStyle::Outline => WallStyle::Solid,
        }
    }
}

/// Display switches owned by the host's control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub wall_style: WallStyle,
    pub fog_enabled: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            wall_style: WallStyle::Solid,
            fog_enabled: true,
        }
    }
}

/// Requests from the host UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ToggleMode,
    SetMode(EditorMode),
    ToggleWallStyle,
    ToggleFog,
    SpawnToken {
        cell: GridPoint,
        size: TokenSize,
        color: Option<Color>,
    },
    DeleteSelectedTokens,
    ToggleCondition(Condition),
}

/// What one update step did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<EditorEvent>,
}

/// Read-only draw data for the renderer
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub grid: &'a Grid,
    pub mode: EditorMode,
    pub display: DisplayFlags,
    pub map: &'a Map,
    pub selected_wall: Option<usize>,
    pub active_token: Option<usize>,
    pub hovered_node: Option<GridPoint>,
    /// Pending wall, from its start node to the live cursor
    pub pending_wall: Option<(Vec2, Vec2)>,
    pub selection_box: Option<Rect>,
    pub shadows: &'a [ShadowShape],
}

/// Editor session: entity store, interaction state and per-frame outputs
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    map: Map,
    interaction: Interaction,
    display: DisplayFlags,
    extrusion: f32,
    cursor: Vec2,
    shadows: Vec<ShadowShape>,
    next_color: usize,
}

impl Session {
    pub fn new(config: &SessionConfig, tile_size: f32) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height, tile_size, config.pick_tolerance);
        info!(
            "Session: {}x{} grid, tile {}px, tolerance {}px, capacity {} walls / {} tokens",
            grid.width, grid.height, tile_size, grid.tolerance, config.max_walls, config.max_tokens
        );
        Self {
            grid,
            map: Map::new(config.max_walls, config.max_tokens),
            interaction: Interaction::new(EditorMode::WallEditing),
            display: DisplayFlags::default(),
            extrusion: config.extrusion_factor,
            cursor: Vec2::ZERO,
            shadows: Vec::new(),
            next_color: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rescale the grid, e.g. after the window was resized
    pub fn set_tile_size(&mut self, tile_size: f32) {
        self.grid.tile_size = tile_size;
    }

    /// Run one frame: state machine, then visibility
    pub fn update(&mut self, input: &FrameInput) -> FrameReport {
        let mut events = Vec::new();
        self.cursor = input.cursor;

        let ix = &mut self.interaction;
        ix.validate(&self.map);
        match ix.mode {
            EditorMode::WallEditing => {
                wall_tool::update(ix, &mut self.map, &self.grid, input, &mut events);
            }
            EditorMode::Play => {
                play_tool::update(ix, &mut self.map, &self.grid, input, &mut self.next_color, &mut events);
            }
        }

        self.refresh_shadows();
        FrameReport { events }
    }

    /// Apply a host command between frames
    pub fn apply(&mut self, command: Command) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        match command {
            Command::ToggleMode => self.set_mode(self.interaction.mode.toggled()),
            Command::SetMode(mode) => self.set_mode(mode),
            Command::ToggleWallStyle => {
                self.display.wall_style = self.display.wall_style.toggled();
                debug!("Wall style: {:?}", self.display.wall_style);
            }
            Command::ToggleFog => {
                self.display.fog_enabled = !self.display.fog_enabled;
                info!("Fog {}", if self.display.fog_enabled { "on" } else { "off" });
            }
            Command::SpawnToken { cell, size, color } => {
                let next = TOKEN_PALETTE[self.next_color % TOKEN_PALETTE.len()];
                let spawned = play_tool::spawn_token_at(
                    &mut self.map,
                    &self.grid,
                    cell,
                    size,
                    color.unwrap_or(next),
                    &mut events,
                );
                if spawned.is_some() && color.is_none() {
                    self.next_color += 1;
                }
            }
            Command::DeleteSelectedTokens => {
                play_tool::delete_selected(&mut self.map, &mut self.interaction, &mut events);
            }
            Command::ToggleCondition(condition) => {
                for (slot, token) in self.map.tokens.iter_mut() {
                    if token.is_present() && token.is_selected() {
                        let set = token.conditions.toggle(condition);
                        debug!("Token {}: {} {}", slot, condition, if set { "set" } else { "cleared" });
                    }
                }
            }
        }
        self.refresh_shadows();
        events
    }

    fn set_mode(&mut self, mode: EditorMode) {
        if mode == self.interaction.mode {
            return;
        }
        self.interaction.enter_mode(mode, &mut self.map);
        info!("Mode: {}", mode.label());
    }

    /// Viewpoint for the fog: center of the active token
    pub fn viewpoint(&self) -> Option<Vec2> {
        let slot = self.interaction.active_token?;
        let token = self.map.tokens.get(slot)?;
        Some(token.rect(self.grid.tile_size).center())
    }

    fn refresh_shadows(&mut self) {
        let fog = self.interaction.mode == EditorMode::Play && self.display.fog_enabled;
        let viewpoint = if fog { self.viewpoint() } else { None };
        self.shadows = cast_shadows(viewpoint, &self.map.walls, self.grid.tile_size, self.extrusion);
    }

    pub fn view(&self) -> FrameView<'_> {
        let ix = &self.interaction;
        let pending_wall = match ix.gesture {
            Gesture::PlacingWall { start } => Some((start.to_pixels(self.grid.tile_size), self.cursor)),
            _ => None,
        };
        FrameView {
            grid: &self.grid,
            mode: ix.mode,
            display: self.display,
            map: &self.map,
            selected_wall: ix.selected_wall,
            active_token: ix.active_token,
            hovered_node: ix.hovered_node,
            pending_wall,
            selection_box: ix.box_selection().map(|b| b.rect()),
            shadows: &self.shadows,
        }
    }
}

/// Direct access for scripted sessions in tests
#[cfg(test)]
impl Session {
    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn shadows(&self) -> &[ShadowShape] {
        &self.shadows
    }

    pub fn mode(&self) -> EditorMode {
        self.interaction.mode
    }

    pub fn display(&self) -> DisplayFlags {
        self.display
    }
}
