//! shadowgrid: tactical map wall editor with line-of-sight fog
//!
//! Draw walls on the grid over a map image, drop tokens, then switch to play
//! mode and pick a token to see what its walls hide from it.
//! - Wall editing: left-click grid nodes to chain walls, right-click to stop,
//!   delete the hovered wall, or drag a box to delete many
//! - Play: left-click an empty cell for a token, right-click a token to look
//!   through its eyes, right-drag to select several, arrows/WASD to move them

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod editor;
mod geometry;
mod input;
mod map;
mod render;
mod session;
mod visibility;

use log::{info, warn};
use macroquad::prelude::*;
use config::SessionConfig;
use editor::EditorMode;
use input::FrameInput;
use map::{Condition, TokenSize};
use render::Background;
use session::{Command, Session};

fn window_conf() -> Conf {
    let defaults = SessionConfig::default();
    Conf {
        window_title: format!("shadowgrid v{}", VERSION),
        window_width: defaults.window_width,
        window_height: defaults.window_height,
        window_resizable: true,
        ..Default::default()
    }
}

/// Config from the first CLI argument, else the user config dir, else defaults
fn load_config() -> SessionConfig {
    let explicit = std::env::args().nth(1).map(std::path::PathBuf::from);
    let path = explicit.or_else(|| config::default_config_path().filter(|p| p.exists()));

    let Some(path) = path else {
        info!("No config file, using defaults");
        return SessionConfig::default();
    };
    match SessionConfig::load(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}, using defaults", path.display(), e);
            SessionConfig::default()
        }
    }
}

async fn load_background(config: &SessionConfig) -> Option<Background> {
    let path = config.background.as_ref()?;
    match load_texture(&path.to_string_lossy()).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Linear);
            info!("Loaded background {}", path.display());
            Some(Background { texture, scale: config.background_scale })
        }
        Err(e) => {
            warn!("Failed to load background {}: {}", path.display(), e);
            None
        }
    }
}

/// Keyboard shortcuts for the host control surface
fn shortcut_commands(session: &Session) -> Vec<Command> {
    let mut commands = Vec::new();
    if is_key_pressed(KeyCode::Tab) {
        commands.push(Command::ToggleMode);
    }
    if is_key_pressed(KeyCode::E) {
        commands.push(Command::SetMode(EditorMode::WallEditing));
    }
    if is_key_pressed(KeyCode::P) {
        commands.push(Command::SetMode(EditorMode::Play));
    }
    if is_key_pressed(KeyCode::V) {
        commands.push(Command::ToggleWallStyle);
    }
    if is_key_pressed(KeyCode::F) {
        commands.push(Command::ToggleFog);
    }
    if is_key_pressed(KeyCode::Delete) || is_key_pressed(KeyCode::Backspace) {
        commands.push(Command::DeleteSelectedTokens);
    }
    if is_key_pressed(KeyCode::T) {
        let cell = session.grid().cell_at(Vec2::from(mouse_position()));
        commands.push(Command::SpawnToken { cell, size: TokenSize::new(2, 2), color: None });
    }

    // 1-9, 0 for the first ten conditions, Shift+1-5 for the rest
    const CONDITION_KEYS: [KeyCode; 10] = [
        KeyCode::Key1,
        KeyCode::Key2,
        KeyCode::Key3,
        KeyCode::Key4,
        KeyCode::Key5,
        KeyCode::Key6,
        KeyCode::Key7,
        KeyCode::Key8,
        KeyCode::Key9,
        KeyCode::Key0,
    ];
    let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
    let offset = if shift { CONDITION_KEYS.len() } else { 0 };
    for (i, key) in CONDITION_KEYS.iter().enumerate() {
        if is_key_pressed(*key) {
            if let Some(&condition) = Condition::ALL.get(offset + i) {
                commands.push(Command::ToggleCondition(condition));
            }
        }
    }
    commands
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let background = load_background(&config).await;

    // The map image sets the window size when there is one
    let surface = match &background {
        Some(bg) => bg.scaled_size(),
        None => vec2(config.window_width as f32, config.window_height as f32),
    };
    request_new_screen_size(surface.x, surface.y);

    // A map image dictates the scale; otherwise the whole grid must fit
    let tile_size = match &background {
        Some(_) => config.tile_size_for(surface.x, surface.y),
        None => config.tile_size_to_fit(surface.x, surface.y),
    };
    let mut session = Session::new(&config, tile_size);

    info!("=== shadowgrid v{} ===", VERSION);

    loop {
        if background.is_none() && config.tile_size.is_none() {
            session.set_tile_size(config.tile_size_to_fit(screen_width(), screen_height()));
        }

        for command in shortcut_commands(&session) {
            session.apply(command);
        }

        let input = FrameInput::sample();
        session.update(&input);

        render::draw_frame(&session.view(), background.as_ref(), config.pick_tolerance);

        next_frame().await;
    }
}
