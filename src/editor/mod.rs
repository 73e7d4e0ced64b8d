//! Editor Mode State Machine
//!
//! Interprets one frame of pointer/key input against the current mode:
//! - `WallEditing`: wall-chain placement, hover pick, box delete
//! - `Play`: token hover, click/box selection, discrete movement
//!
//! Modes change only through an explicit request from the host. Entering a
//! mode abandons whatever gesture was in progress.

mod box_select;
mod grid;
pub mod play_tool;
pub mod wall_tool;

pub use box_select::BoxSelectTracker;
pub use grid::Grid;

use macroquad::math::Vec2;
use crate::map::{EntityKind, GridPoint, Map, MapError, Slot, SlotStore, TokenState, WallState};

/// Top-level editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    WallEditing,
    Play,
}

impl EditorMode {
    pub fn toggled(self) -> Self {
        match self {
            EditorMode::WallEditing => EditorMode::Play,
            EditorMode::Play => EditorMode::WallEditing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditorMode::WallEditing => "Wall editing",
            EditorMode::Play => "Play",
        }
    }
}

/// Gesture in progress within the current mode
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Wall chain armed: the next node click commits a wall from `start`
    PlacingWall { start: GridPoint },
    /// Secondary button held, still within tolerance of the anchor
    BoxPending { anchor: Vec2 },
    BoxSelecting(BoxSelectTracker),
}

/// Notable state changes produced by an update step
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    WallStarted { start: GridPoint },
    WallCommitted { slot: usize },
    WallAbandoned,
    WallDeleted { slot: usize },
    TokenSpawned { slot: usize },
    TokenDeleted { slot: usize },
    TokenActivated { slot: usize },
    SelectionCleared,
    TokensSelected { count: usize },
    TokensMoved { count: usize },
    CapacityExceeded(MapError),
}

/// Interaction state of the single editor session.
///
/// Holds slot references into the [`Map`]; every deletion goes through
/// [`delete_wall`] / [`delete_token`] so a reference never outlives its slot.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    pub mode: EditorMode,
    pub gesture: Gesture,
    /// Wall under the cursor (hover pick)
    pub selected_wall: Option<usize>,
    /// Token whose point of view drives the fog
    pub active_token: Option<usize>,
    /// Node the cursor is snapped to this frame
    pub hovered_node: Option<GridPoint>,
}

impl Interaction {
    pub fn new(mode: EditorMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn box_selection(&self) -> Option<&BoxSelectTracker> {
        match &self.gesture {
            Gesture::BoxSelecting(tracker) => Some(tracker),
            _ => None,
        }
    }

    /// Switch mode, abandoning any gesture and transient marks
    pub fn enter_mode(&mut self, mode: EditorMode, map: &mut Map) {
        self.mode = mode;
        self.gesture = Gesture::Idle;
        self.selected_wall = None;
        self.hovered_node = None;

        for (_, wall) in map.walls.iter_mut() {
            if wall.state == WallState::Marked {
                wall.state = WallState::Placed;
            }
        }
        for (_, token) in map.tokens.iter_mut() {
            if token.state == TokenState::Hovered {
                token.state = TokenState::Placed;
            }
        }
    }

    /// Drop references to slots that are no longer occupied
    pub fn validate(&mut self, map: &Map) {
        if self.selected_wall.is_some_and(|slot| map.walls.get(slot).is_none()) {
            self.selected_wall = None;
        }
        if self.active_token.is_some_and(|slot| map.tokens.get(slot).is_none()) {
            self.active_token = None;
        }
    }
}

/// Free a wall and clear every reference to it
pub fn delete_wall(map: &mut Map, ix: &mut Interaction, slot: usize) -> bool {
    if ix.selected_wall == Some(slot) {
        ix.selected_wall = None;
    }
    map.free(EntityKind::Wall, slot)
}

/// Free a token and clear every reference to it
pub fn delete_token(map: &mut Map, ix: &mut Interaction, slot: usize) -> bool {
    if ix.active_token == Some(slot) {
        ix.active_token = None;
    }
    map.free(EntityKind::Token, slot)
}

/// Slots currently in a given state, lowest first
fn slots_where<T: Slot>(store: &SlotStore<T>, pred: impl Fn(&T) -> bool) -> Vec<usize> {
    store
        .iter()
        .filter(|(_, record)| record.is_present() && pred(record))
        .map(|(slot, _)| slot)
        .collect()
}
