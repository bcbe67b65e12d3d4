use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use super::draw::Rgb;

/// Largest board side the terminal renderer accepts
pub const MAX_GRID_SIDE: usize = 1024;

/// Colours used by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Fill for empty cells
    pub background: Rgb,
    /// Outline drawn around every occupied cell
    pub border: Rgb,
    pub snake: Rgb,
    pub apple: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::new(0, 0, 0),
            border: Rgb::new(93, 216, 228),
            snake: Rgb::new(0, 255, 0),
            apple: Rgb::new(255, 0, 0),
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Terminal columns used to draw one cell
    pub cell_width: u16,
    /// Start a new game right after a collision instead of showing the
    /// game-over screen
    pub auto_restart: bool,
    /// Seed for apple placement; random when unset
    pub seed: Option<u64>,
    pub colors: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            tick_rate: 10,
            cell_width: 2,
            auto_restart: true,
            seed: None,
            colors: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= 1 && self.grid_height >= 1,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width.saturating_mul(self.grid_height) >= 2,
            "grid needs room for both the snake and an apple"
        );
        ensure!(self.tick_rate > 0, "tick rate must be positive");
        ensure!(self.cell_width > 0, "cell width must be positive");
        ensure!(
            self.grid_width <= MAX_GRID_SIDE && self.grid_height <= MAX_GRID_SIDE,
            "grid sides are limited to {} cells, got {}x{}",
            MAX_GRID_SIDE,
            self.grid_width,
            self.grid_height
        );
        // Board plus its frame must fit a terminal row
        ensure!(
            self.grid_width * usize::from(self.cell_width) + 2 <= usize::from(u16::MAX),
            "grid is {} cells wide at {} columns per cell, too wide to draw",
            self.grid_width,
            self.cell_width
        );
        Ok(())
    }

    /// Time between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, 24);
        assert_eq!(config.tick_rate, 10);
        assert!(config.auto_restart);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
    }

    #[test]
    fn test_tick_interval() {
        let mut config = GameConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(100));

        config.tick_rate = 20;
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        assert!(GameConfig::new(1, 1).validate().is_err());
        assert!(GameConfig::new(0, 5).validate().is_err());
        assert!(GameConfig::new(2, 1).validate().is_ok());

        let mut config = GameConfig::default();
        config.tick_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_board_size() {
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());
        assert!(GameConfig::new(100_000, 100_000).validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIDE + 1, 10).validate().is_err());
        assert!(GameConfig::new(10, MAX_GRID_SIDE + 1).validate().is_err());

        // Each cell takes several columns, so the row gets too wide
        let mut config = GameConfig::new(MAX_GRID_SIDE, 10);
        config.cell_width = 64;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 12, "seed": 99 }"#).unwrap();

        let config = GameConfig::from_json_file(&path).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 24);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.colors, Palette::default());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let mut config = GameConfig::small();
        config.colors.snake = Rgb::new(1, 2, 3);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = GameConfig::from_json_file(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
