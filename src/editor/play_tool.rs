//! Play mode
//!
//! Tokens highlight under the cursor, get picked by secondary click or box,
//! and step one cell per directional key press. A primary click on an empty
//! cell drops a new token.

use log::{debug, warn};
use macroquad::color::Color;
use crate::geometry::rects_overlap;
use crate::input::FrameInput;
use crate::map::{GridPoint, Map, Slot, Token, TokenSize, TokenState, TOKEN_PALETTE};
use super::{delete_token, slots_where, BoxSelectTracker, EditorEvent, Gesture, Grid, Interaction};

/// Run one frame of play mode. `next_color` cycles through the spawn palette.
pub fn update(
    ix: &mut Interaction,
    map: &mut Map,
    grid: &Grid,
    input: &FrameInput,
    next_color: &mut usize,
    events: &mut Vec<EditorEvent>,
) {
    let cursor = input.cursor;
    ix.hovered_node = None;

    if input.secondary.pressed && ix.gesture == Gesture::Idle {
        ix.gesture = Gesture::BoxPending { anchor: cursor };
    }

    if input.secondary.down {
        if let Gesture::BoxPending { anchor } = ix.gesture {
            let mut tracker = BoxSelectTracker::new(anchor);
            tracker.update(cursor);
            if tracker.exceeds(grid.tolerance) {
                ix.gesture = Gesture::BoxSelecting(tracker);
            }
        }
    }

    // Hover: under the box while boxing, otherwise under the cursor
    let hover_box = match &mut ix.gesture {
        Gesture::BoxSelecting(tracker) => {
            tracker.update(cursor);
            Some(tracker.rect())
        }
        _ => None,
    };
    for (_, token) in map.tokens.iter_mut() {
        if token.is_absent() || token.is_selected() {
            continue;
        }
        let rect = token.rect(grid.tile_size);
        let hovered = match &hover_box {
            Some(b) => rects_overlap(&rect, b),
            None => rect.contains(cursor),
        };
        token.state = if hovered { TokenState::Hovered } else { TokenState::Placed };
    }

    if input.secondary.released {
        match ix.gesture {
            Gesture::BoxSelecting(_) => {
                let hovered = slots_where(&map.tokens, |t| t.state == TokenState::Hovered);
                for &slot in &hovered {
                    if let Some(token) = map.tokens.get_mut(slot) {
                        token.state = TokenState::Selected;
                    }
                }
                events.push(EditorEvent::TokensSelected { count: hovered.len() });
                ix.gesture = Gesture::Idle;
            }
            Gesture::BoxPending { .. } => {
                click_select(ix, map, grid, input, events);
                ix.gesture = Gesture::Idle;
            }
            _ => {}
        }
    }

    if input.primary.pressed && ix.gesture == Gesture::Idle {
        let color = TOKEN_PALETTE[*next_color % TOKEN_PALETTE.len()];
        let token = Token::new(grid.cell_at(cursor), color);
        if spawn_token(map, grid, token, events).is_some() {
            *next_color += 1;
        }
    }

    if input.directions.any() {
        let mut moved = 0;
        for (dx, dy) in input.directions.steps() {
            moved += step_selected(map, grid, dx, dy);
        }
        if moved > 0 {
            events.push(EditorEvent::TokensMoved { count: moved });
        }
    }
}

/// Secondary click without drag: activate the token under the cursor, or
/// clear the selection when clicking empty space
fn click_select(
    ix: &mut Interaction,
    map: &mut Map,
    grid: &Grid,
    input: &FrameInput,
    events: &mut Vec<EditorEvent>,
) {
    let clicked = map
        .tokens
        .iter()
        .find(|(_, t)| t.is_present() && t.rect(grid.tile_size).contains(input.cursor))
        .map(|(slot, _)| slot);

    match clicked {
        Some(slot) => {
            if let Some(prev) = ix.active_token.filter(|&prev| prev != slot) {
                if let Some(token) = map.tokens.get_mut(prev) {
                    token.state = TokenState::Placed;
                }
            }
            if let Some(token) = map.tokens.get_mut(slot) {
                token.state = TokenState::Selected;
            }
            ix.active_token = Some(slot);
            events.push(EditorEvent::TokenActivated { slot });
        }
        None => {
            ix.active_token = None;
            for (_, token) in map.tokens.iter_mut() {
                if token.is_selected() {
                    token.state = TokenState::Placed;
                }
            }
            events.push(EditorEvent::SelectionCleared);
        }
    }
}

/// Move every selected token by one cell, skipping any that would leave the map.
/// Returns the number of tokens moved.
fn step_selected(map: &mut Map, grid: &Grid, dx: i32, dy: i32) -> usize {
    let mut moved = 0;
    for (_, token) in map.tokens.iter_mut() {
        if !token.is_selected() {
            continue;
        }
        let target = token.position.offset(dx, dy);
        let far = target.offset(token.size.width as i32, token.size.height as i32);
        let fits = target.x >= 0
            && target.y >= 0
            && far.x <= grid.width as i32
            && far.y <= grid.height as i32;
        if fits {
            token.position = target;
            moved += 1;
        }
    }
    moved
}

/// Lowest slot of a token covering `cell`
pub fn token_at_cell(map: &Map, cell: GridPoint) -> Option<usize> {
    map.tokens
        .iter()
        .find(|(_, t)| t.is_present() && t.covers_cell(cell))
        .map(|(slot, _)| slot)
}

/// True if every cell of the footprint is on the map and not under a token
pub fn footprint_free(map: &Map, grid: &Grid, cell: GridPoint, size: TokenSize) -> bool {
    (0..size.height as i32).all(|dy| {
        (0..size.width as i32).all(|dx| {
            let c = cell.offset(dx, dy);
            grid.contains_cell(c) && token_at_cell(map, c).is_none()
        })
    })
}

/// Store a new token on a free footprint, reporting a full store instead of
/// failing the frame. Off-map or overlapping spawns are ignored.
pub fn spawn_token(
    map: &mut Map,
    grid: &Grid,
    token: Token,
    events: &mut Vec<EditorEvent>,
) -> Option<usize> {
    if !footprint_free(map, grid, token.position, token.size) {
        debug!(
            "No room for a {}x{} token at ({}, {})",
            token.size.width, token.size.height, token.position.x, token.position.y
        );
        return None;
    }
    match map.allocate_token(token) {
        Ok(slot) => {
            debug!("Spawned token {} at ({}, {})", slot, token.position.x, token.position.y);
            events.push(EditorEvent::TokenSpawned { slot });
            Some(slot)
        }
        Err(e) => {
            warn!("Cannot spawn token: {}", e);
            events.push(EditorEvent::CapacityExceeded(e));
            None
        }
    }
}

/// Spawn a token of a given footprint and color
pub fn spawn_token_at(
    map: &mut Map,
    grid: &Grid,
    cell: GridPoint,
    size: TokenSize,
    color: Color,
    events: &mut Vec<EditorEvent>,
) -> Option<usize> {
    spawn_token(map, grid, Token::with_size(cell, size, color), events)
}

/// Free every selected token
pub fn delete_selected(map: &mut Map, ix: &mut Interaction, events: &mut Vec<EditorEvent>) {
    for slot in slots_where(&map.tokens, Token::is_selected) {
        if delete_token(map, ix, slot) {
            events.push(EditorEvent::TokenDeleted { slot });
        }
    }
}
