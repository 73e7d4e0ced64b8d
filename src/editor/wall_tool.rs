//! Wall-editing mode
//!
//! Primary clicks on grid nodes lay down continuous wall chains. The secondary
//! button abandons a chain, deletes the hovered wall on click, or box-deletes
//! on drag.

use log::warn;
use macroquad::math::Vec2;
use crate::map::{GridPoint, Map, Wall, WallState};
use super::{delete_wall, slots_where, BoxSelectTracker, EditorEvent, Gesture, Grid, Interaction};
use crate::input::FrameInput;
use crate::geometry::point_near_segment;

/// Run one frame of wall editing
pub fn update(
    ix: &mut Interaction,
    map: &mut Map,
    grid: &Grid,
    input: &FrameInput,
    events: &mut Vec<EditorEvent>,
) {
    let cursor = input.cursor;
    ix.hovered_node = grid.snap(cursor);

    // Hover pick only while nothing is being placed or boxed
    match ix.gesture {
        Gesture::Idle | Gesture::BoxPending { .. } => {
            ix.selected_wall = pick_wall(map, grid, cursor);
        }
        Gesture::PlacingWall { .. } | Gesture::BoxSelecting(_) => {
            ix.selected_wall = None;
        }
    }

    if input.primary.pressed {
        if let Some(node) = ix.hovered_node {
            place_node(ix, map, node, events);
        }
    }

    if input.secondary.pressed {
        match ix.gesture {
            Gesture::PlacingWall { .. } => {
                ix.gesture = Gesture::Idle;
                events.push(EditorEvent::WallAbandoned);
            }
            Gesture::Idle => {
                ix.gesture = Gesture::BoxPending { anchor: cursor };
            }
            _ => {}
        }
    }

    if input.secondary.down {
        if let Gesture::BoxPending { anchor } = ix.gesture {
            let mut tracker = BoxSelectTracker::new(anchor);
            tracker.update(cursor);
            if tracker.exceeds(grid.tolerance) {
                ix.gesture = Gesture::BoxSelecting(tracker);
                ix.selected_wall = None;
            }
        }
    }

    if let Gesture::BoxSelecting(tracker) = &mut ix.gesture {
        tracker.update(cursor);
        mark_walls(map, grid, tracker);
    }

    if input.secondary.released {
        match ix.gesture {
            Gesture::BoxSelecting(_) => {
                for slot in slots_where(&map.walls, Wall::is_marked) {
                    if delete_wall(map, ix, slot) {
                        events.push(EditorEvent::WallDeleted { slot });
                    }
                }
                ix.gesture = Gesture::Idle;
            }
            Gesture::BoxPending { .. } => {
                if let Some(slot) = ix.selected_wall {
                    if delete_wall(map, ix, slot) {
                        events.push(EditorEvent::WallDeleted { slot });
                    }
                }
                ix.gesture = Gesture::Idle;
            }
            _ => {}
        }
    }
}

/// Primary click on a grid node: start a chain, or commit the pending wall
/// and re-arm from its far end
fn place_node(ix: &mut Interaction, map: &mut Map, node: GridPoint, events: &mut Vec<EditorEvent>) {
    match ix.gesture {
        Gesture::Idle => {
            // Chains only start when there is room for the wall
            match map.walls.first_free() {
                Ok(_) => {
                    ix.gesture = Gesture::PlacingWall { start: node };
                    ix.selected_wall = None;
                    events.push(EditorEvent::WallStarted { start: node });
                }
                Err(e) => {
                    warn!("Cannot start wall at ({}, {}): {}", node.x, node.y, e);
                    events.push(EditorEvent::CapacityExceeded(e));
                }
            }
        }
        Gesture::PlacingWall { start } => {
            match map.allocate_wall(Wall::new(start, node)) {
                Ok(slot) => events.push(EditorEvent::WallCommitted { slot }),
                Err(e) => {
                    warn!("Dropping wall chain: {}", e);
                    ix.gesture = Gesture::Idle;
                    events.push(EditorEvent::CapacityExceeded(e));
                    return;
                }
            }

            // Re-arm for the next link of the chain
            match map.walls.first_free() {
                Ok(_) => {
                    ix.gesture = Gesture::PlacingWall { start: node };
                    events.push(EditorEvent::WallStarted { start: node });
                }
                Err(e) => {
                    warn!("Wall chain stopped at ({}, {}): {}", node.x, node.y, e);
                    ix.gesture = Gesture::Idle;
                    events.push(EditorEvent::CapacityExceeded(e));
                }
            }
        }
        // Secondary-button gesture in progress
        Gesture::BoxPending { .. } | Gesture::BoxSelecting(_) => {}
    }
}

/// First wall (lowest slot) within tolerance of the cursor
pub fn pick_wall(map: &Map, grid: &Grid, cursor: Vec2) -> Option<usize> {
    map.walls
        .iter()
        .filter(|(_, wall)| wall.state != WallState::Absent)
        .find(|(_, wall)| {
            let (a, b) = wall.segment(grid.tile_size);
            point_near_segment(cursor, a, b, grid.tolerance)
        })
        .map(|(slot, _)| slot)
}

/// Re-evaluate every wall against the box
fn mark_walls(map: &mut Map, grid: &Grid, tracker: &BoxSelectTracker) {
    for (_, wall) in map.walls.iter_mut() {
        if wall.state == WallState::Absent {
            continue;
        }
        let (a, b) = wall.segment(grid.tile_size);
        wall.state = if tracker.encloses_segment(a, b) {
            WallState::Marked
        } else {
            WallState::Placed
        };
    }
}
