// Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Tunables for drag recognition and snap animations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollerConfig {
    /// Horizontal travel (px) before a press turns into a drag
    pub drag_threshold_px: f64,

    /// Net drag (px) beyond which a release counts as a flick
    pub flick_threshold_px: f64,

    /// Nominal tick period in milliseconds
    pub tick_interval_ms: u64,

    /// Duration used by `scroll_to` callers that have no preference
    pub default_duration_ms: u64,

    /// Duration used by `fast_scroll`
    pub fast_scroll_duration_ms: u64,

    /// Smallest per-tick animation step in pixels
    pub min_step_px: f64,

    /// Whether the ring wraps at its ends
    pub looping: bool,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 100.0,
            flick_threshold_px: 100.0,
            tick_interval_ms: 16,
            default_duration_ms: 300,
            fast_scroll_duration_ms: 100,
            min_step_px: 4.0,
            looping: true,
        }
    }
}

impl ScrollerConfig {
    /// Load configuration from the user config directory, or defaults
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded scroller config");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if !(self.drag_threshold_px >= 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "drag_threshold_px must be non-negative, got {}",
                self.drag_threshold_px
            )));
        }
        if !(self.flick_threshold_px >= 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "flick_threshold_px must be non-negative, got {}",
                self.flick_threshold_px
            )));
        }
        if !(self.min_step_px > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "min_step_px must be positive, got {}",
                self.min_step_px
            )));
        }
        Ok(())
    }

    /// Tick period as a Duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Get the path to the configuration file
    pub fn config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;

        Ok(config_dir.join("carousel-scroller").join("config.toml"))
    }
}
