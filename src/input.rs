//! Per-frame input snapshot
//!
//! Mouse and keyboard are sampled once at frame start and held constant for
//! the whole update step.

use macroquad::prelude::*;

/// Edge and held state of one pointer button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub down: bool,
    pub pressed: bool,  // Just pressed this frame
    pub released: bool, // Just released this frame
}

impl ButtonState {
    fn sample(button: MouseButton) -> Self {
        Self {
            down: is_mouse_button_down(button),
            pressed: is_mouse_button_pressed(button),
            released: is_mouse_button_released(button),
        }
    }
}

/// Directional keys pressed this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Grid steps for each pressed key, in up/down/left/right order
    pub fn steps(&self) -> impl Iterator<Item = (i32, i32)> {
        [
            (self.up, (0, -1)),
            (self.down, (0, 1)),
            (self.left, (-1, 0)),
            (self.right, (1, 0)),
        ]
        .into_iter()
        .filter_map(|(pressed, step)| pressed.then_some(step))
    }
}

/// Everything the editor reads from the user in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Cursor position in pixels
    pub cursor: Vec2,
    pub primary: ButtonState,
    pub secondary: ButtonState,
    pub directions: Directions,
}

impl FrameInput {
    /// Poll macroquad. Call once per frame.
    pub fn sample() -> Self {
        let (x, y) = mouse_position();
        Self {
            cursor: vec2(x, y),
            primary: ButtonState::sample(MouseButton::Left),
            secondary: ButtonState::sample(MouseButton::Right),
            directions: Directions {
                up: is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W),
                down: is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S),
                left: is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
                right: is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
            },
        }
    }
}

/// Builders for scripted input in tests
#[cfg(test)]
impl FrameInput {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            cursor: vec2(x, y),
            ..Default::default()
        }
    }

    pub fn press_primary(mut self) -> Self {
        self.primary = ButtonState { down: true, pressed: true, released: false };
        self
    }

    pub fn press_secondary(mut self) -> Self {
        self.secondary = ButtonState { down: true, pressed: true, released: false };
        self
    }

    pub fn hold_secondary(mut self) -> Self {
        self.secondary = ButtonState { down: true, pressed: false, released: false };
        self
    }

    pub fn release_secondary(mut self) -> Self {
        self.secondary = ButtonState { down: false, pressed: false, released: true };
        self
    }

    pub fn key_up(mut self) -> Self {
        self.directions.up = true;
        self
    }

    pub fn key_right(mut self) -> Self {
        self.directions.right = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_steps() {
        let dirs = Directions { up: true, right: true, ..Default::default() };
        let steps: Vec<_> = dirs.steps().collect();
        assert_eq!(steps, vec![(0, -1), (1, 0)]);
        assert!(dirs.any());
        assert!(!Directions::default().any());
    }
}
