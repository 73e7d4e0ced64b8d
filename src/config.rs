//! Session configuration
//!
//! Read once at startup from a RON file. Every field has a default, so a
//! missing file or a partial file both work.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::visibility::DEFAULT_EXTRUSION;

/// Validation limits for config values
pub mod limits {
    /// Maximum grid dimension in cells
    pub const MAX_GRID_CELLS: u16 = 1024;
    /// Maximum entities per store
    pub const MAX_CAPACITY: usize = 65_536;
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything fixed for the lifetime of an editor session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Grid width in cells
    pub grid_width: u16,
    /// Grid height in cells
    pub grid_height: u16,
    /// Pixels per cell; derived from the window or background when unset
    pub tile_size: Option<f32>,
    /// Pick and drag tolerance in pixels
    pub pick_tolerance: f32,
    pub max_walls: usize,
    pub max_tokens: usize,
    /// Shadow extrusion multiplier
    pub extrusion_factor: f32,
    /// Map image drawn under the grid
    pub background: Option<PathBuf>,
    pub background_scale: f32,
    pub window_width: i32,
    pub window_height: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_width: 16,
            grid_height: 28,
            tile_size: None,
            pick_tolerance: 6.0,
            max_walls: 512,
            max_tokens: 512,
            extrusion_factor: DEFAULT_EXTRUSION,
            background: None,
            background_scale: 0.5,
            window_width: 1000,
            window_height: 1000,
        }
    }
}

impl SessionConfig {
    /// Parse and validate RON text
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::ValidationError(msg));

        for (name, cells) in [("grid_width", self.grid_width), ("grid_height", self.grid_height)] {
            if cells == 0 || cells > limits::MAX_GRID_CELLS {
                return invalid(format!(
                    "{} must be between 1 and {} (got {})",
                    name,
                    limits::MAX_GRID_CELLS,
                    cells
                ));
            }
        }
        if !self.pick_tolerance.is_finite() || self.pick_tolerance < 0.0 {
            return invalid(format!("pick_tolerance must be >= 0 (got {})", self.pick_tolerance));
        }
        for (name, cap) in [("max_walls", self.max_walls), ("max_tokens", self.max_tokens)] {
            if cap == 0 || cap > limits::MAX_CAPACITY {
                return invalid(format!(
                    "{} must be between 1 and {} (got {})",
                    name,
                    limits::MAX_CAPACITY,
                    cap
                ));
            }
        }
        if let Some(tile) = self.tile_size {
            if !tile.is_finite() || tile <= 0.0 {
                return invalid(format!("tile_size must be > 0 (got {})", tile));
            }
        }
        if !self.extrusion_factor.is_finite() || self.extrusion_factor <= 1.0 {
            return invalid(format!("extrusion_factor must be > 1 (got {})", self.extrusion_factor));
        }
        if !self.background_scale.is_finite() || self.background_scale <= 0.0 {
            return invalid(format!("background_scale must be > 0 (got {})", self.background_scale));
        }
        Ok(())
    }

    /// Tile size for a drawing surface of the given pixel size.
    ///
    /// An explicit `tile_size` wins. Otherwise the grid is fitted to the
    /// surface's width if it is portrait (or square), to its height if it is
    /// landscape.
    pub fn tile_size_for(&self, surface_width: f32, surface_height: f32) -> f32 {
        if let Some(tile) = self.tile_size {
            return tile;
        }
        let fitted = if surface_width <= surface_height {
            surface_width / self.grid_width as f32
        } else {
            surface_height / self.grid_height as f32
        };
        fitted.floor().max(1.0)
    }

    /// Tile size that keeps the whole grid on a surface of the given size.
    ///
    /// Used when there is no background image to follow. An explicit
    /// `tile_size` still wins.
    pub fn tile_size_to_fit(&self, surface_width: f32, surface_height: f32) -> f32 {
        if let Some(tile) = self.tile_size {
            return tile;
        }
        let across = surface_width / self.grid_width as f32;
        let down = surface_height / self.grid_height as f32;
        across.min(down).floor().max(1.0)
    }
}

/// Default config file location (`<config dir>/shadowgrid/config.ron`)
#[cfg(not(target_arch = "wasm32"))]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shadowgrid").join("config.ron"))
}

#[cfg(target_arch = "wasm32")]
pub fn default_config_path() -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = SessionConfig::from_ron_str("(grid_width: 30, pick_tolerance: 4.0)").unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 28);
        assert!((config.pick_tolerance - 4.0).abs() < 0.001);
        assert_eq!(config.max_walls, 512);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = SessionConfig::from_ron_str("(grid_width: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        let err = SessionConfig::from_ron_str("(max_tokens: 0)").unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
        let err = SessionConfig::from_ron_str("(tile_size: Some(-3.0))").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        let err = SessionConfig::from_ron_str("(extrusion_factor: 0.5)").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = SessionConfig::from_ron_str("(grid_width: \"wide\")").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(grid_width: 20, grid_height: 20, tile_size: Some(32.0), max_walls: 64)").unwrap();

        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.max_walls, 64);
        assert!((config.tile_size_for(640.0, 480.0) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::load(dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_round_trip_through_ron() {
        let config = SessionConfig {
            background: Some(PathBuf::from("maps/inn.png")),
            ..Default::default()
        };
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let text = ron::ser::to_string_pretty(&config, pretty).unwrap();
        assert_eq!(SessionConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_derived_tile_size() {
        let config = SessionConfig::default();
        // Portrait: fit width, 500 / 16 = 31.25
        assert!((config.tile_size_for(500.0, 900.0) - 31.0).abs() < 0.001);
        // Landscape: fit height, 700 / 28 = 25
        assert!((config.tile_size_for(1200.0, 700.0) - 25.0).abs() < 0.001);
        assert!((config.tile_size_for(3.0, 3.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_fitted_tile_size_keeps_grid_on_screen() {
        let config = SessionConfig::default();
        // Default window: width allows 62px, height only 35px
        let tile = config.tile_size_to_fit(1000.0, 1000.0);
        assert!((tile - 35.0).abs() < 0.001);
        assert!(tile * config.grid_width as f32 <= 1000.0);
        assert!(tile * config.grid_height as f32 <= 1000.0);

        // Wide and short: width is the limit, 400 / 16 = 25
        assert!((config.tile_size_to_fit(400.0, 2000.0) - 25.0).abs() < 0.001);

        let fixed = SessionConfig { tile_size: Some(48.0), ..Default::default() };
        assert!((fixed.tile_size_to_fit(1000.0, 1000.0) - 48.0).abs() < 0.001);
    }
}
