//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`LIFE_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Grid sizing
    #[serde(default)]
    pub world: WorldConfig,
    /// Tick rate and initial state
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`LIFE_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // LIFE_SIMULATION__MAX_TICKS_PER_SECOND=10 -> simulation.max_ticks_per_second = 10
        figment = figment.merge(Env::prefixed("LIFE_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Grid dimensions for the configured window
    pub fn grid_size(&self) -> (usize, usize) {
        self.world.grid_size(self.window.width, self.window.height)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Game of Life".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Grid sizing
///
/// Unset dimensions are derived from the window size and the cell size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of one cell in pixels
    pub cell_size: u32,
    /// Fixed grid width in cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    /// Fixed grid height in cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,
}

impl WorldConfig {
    /// Grid dimensions in cells for a window of the given pixel size
    pub fn grid_size(&self, window_width: u32, window_height: u32) -> (usize, usize) {
        let cell_size = self.cell_size.max(1);
        let width = self
            .width
            .unwrap_or((window_width / cell_size) as usize);
        let height = self
            .height
            .unwrap_or((window_height / cell_size) as usize);
        (width, height)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cell_size: 4,
            width: None,
            height: None,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Tick rate cap (0 = uncapped)
    pub max_ticks_per_second: u32,
    /// Probability that a cell starts alive
    pub density: f64,
    /// RNG seed for the initial fill (random when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Start with the simulation paused
    pub start_paused: bool,
    /// Stop after this many generations (runs forever when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_generations: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_ticks_per_second: 30,
            density: lifegrid_core::DEFAULT_DENSITY,
            seed: None,
            start_paused: false,
            max_generations: None,
        }
    }
}

/// Which renderer backend draws the cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderBackend {
    /// Scaled CPU bitmap, uploaded by dirty rectangle
    #[default]
    Bitmap,
    /// One texel write per changed cell
    Direct,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Renderer backend
    pub backend: RenderBackend,
    /// Live cell colour [r, g, b, a]
    pub live_color: [u8; 4],
    /// Dead cell colour [r, g, b, a]
    pub dead_color: [u8; 4],
    /// Surface clear colour outside the grid [r, g, b, a]
    pub background_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            backend: RenderBackend::Bitmap,
            live_color: [235, 235, 220, 255],
            dead_color: [16, 16, 24, 255],
            background_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl RenderingConfig {
    pub fn palette(&self) -> lifegrid_render::Palette {
        lifegrid_render::Palette::new(self.live_color, self.dead_color)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Run without a window, rendering into an in-memory bitmap
    pub headless: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            headless: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.simulation.max_ticks_per_second, 30);
        assert_eq!(config.rendering.backend, RenderBackend::Bitmap);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("max_ticks_per_second"));
        assert!(toml.contains("backend = \"bitmap\""));
    }

    #[test]
    fn test_grid_size_from_window() {
        let world = WorldConfig::default();
        assert_eq!(world.grid_size(1280, 720), (320, 180));
    }

    #[test]
    fn test_grid_size_fixed_dimensions_win() {
        let world = WorldConfig {
            cell_size: 8,
            width: Some(50),
            height: None,
        };
        assert_eq!(world.grid_size(800, 600), (50, 75));
    }

    #[test]
    fn test_zero_cell_size_treated_as_one() {
        let world = WorldConfig {
            cell_size: 0,
            width: None,
            height: None,
        };
        assert_eq!(world.grid_size(10, 4), (10, 4));
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.world.cell_size, 4);
    }
}
