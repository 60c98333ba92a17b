//! Editor configuration, stored as JSON.

use crate::catalog::Level;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SURFACE_WIDTH: f64 = 400.0;
pub const DEFAULT_SURFACE_HEIGHT: f64 = 300.0;

/// Settings for an [`Editor`](crate::editor::Editor) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Level the editor opens with.
    pub level: Level,
    /// Size of the visualization surface in pixels.
    pub surface_width: f64,
    pub surface_height: f64,
    /// Place the level's starter block on a fresh workspace.
    pub starter_blocks: bool,
    /// Log the generated source of every run at `info` level.
    pub echo_code: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            starter_blocks: true,
            echo_code: false,
        }
    }
}

impl EditorConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), contents)?;
        log::info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_surface(mut self, width: f64, height: f64) -> Self {
        self.surface_width = width;
        self.surface_height = height;
        self
    }

    pub fn with_starter_blocks(mut self, enabled: bool) -> Self {
        self.starter_blocks = enabled;
        self
    }

    pub fn with_echo_code(mut self, enabled: bool) -> Self {
        self.echo_code = enabled;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.surface_width) || !valid(self.surface_height) {
            return Err(ConfigError::Invalid(format!(
                "surface size must be positive, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        Ok(())
    }
}
