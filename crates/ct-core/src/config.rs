//! Configuration system for the citrine frontend

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub overlay: OverlayConfig,
    pub paths: PathConfig,
    pub debug: DebugConfig,
}

/// General frontend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Pause as soon as emulation starts
    pub start_paused: bool,
}

/// Touch input overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Show the overlay at all
    pub enabled: bool,
    /// Forward pointers that miss every control to the emulated touchscreen
    pub touch_enabled: bool,
    /// Let a held d-pad finger slide between directions
    pub dpad_slide: bool,
    /// Recenter a joystick under the finger that grabs it
    pub joystick_rel_center: bool,
    /// Control size, 0-100; 50 is the stock size
    pub scale: u32,
    pub toggles: ControlToggles,
    /// Saved control positions; controls without an entry use the default layout
    pub layout: Vec<ControlPlacement>,
}

/// Which overlay controls are shown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlToggles {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub l: bool,
    pub r: bool,
    pub zl: bool,
    pub zr: bool,
    pub start: bool,
    pub select: bool,
    pub home: bool,
    pub dpad: bool,
    pub circle_pad: bool,
    pub c_stick: bool,
}

/// Saved top-left position of one overlay control
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlPlacement {
    /// Button id of the control (the d-pad is keyed by its up id)
    pub id: i32,
    pub x: i32,
    pub y: i32,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Base directory for relative log paths
    pub user_dir: PathBuf,
    /// Base directory for game paths that are not found as given
    pub games: PathBuf,
}

/// Debug settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub log_level: LogLevel,
    pub log_to_file: bool,
    pub log_path: PathBuf,
}

/// Logging level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_paused: false,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            touch_enabled: true,
            dpad_slide: true,
            joystick_rel_center: true,
            scale: 50,
            toggles: ControlToggles::default(),
            layout: Vec::new(),
        }
    }
}

impl Default for ControlToggles {
    fn default() -> Self {
        Self {
            a: true,
            b: true,
            x: true,
            y: true,
            l: true,
            r: true,
            zl: false,
            zr: false,
            start: true,
            select: true,
            home: false,
            dpad: true,
            circle_pad: true,
            c_stick: false,
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("citrine");

        Self {
            games: base.join("games"),
            user_dir: base,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_to_file: false,
            log_path: PathBuf::from("citrine.log"),
        }
    }
}

impl PathConfig {
    /// Locate a game: the path as given if it exists, otherwise relative to
    /// the games directory. Absolute paths are never rewritten.
    pub fn resolve_game(&self, game: &Path) -> PathBuf {
        if game.is_absolute() || game.exists() {
            game.to_path_buf()
        } else {
            self.games.join(game)
        }
    }

    /// Place a relative file path under the user directory
    pub fn in_user_dir(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.user_dir.join(path)
        }
    }
}

impl OverlayConfig {
    /// Saved placement for a control, if the user moved it
    pub fn placement(&self, id: i32) -> Option<ControlPlacement> {
        self.layout.iter().copied().find(|p| p.id == id)
    }

    /// Record a control position, replacing any previous one
    pub fn set_placement(&mut self, placement: ControlPlacement) {
        match self.layout.iter_mut().find(|p| p.id == placement.id) {
            Some(existing) => *existing = placement,
            None => self.layout.push(placement),
        }
    }

    /// Forget every saved position
    pub fn reset_layout(&mut self) {
        self.layout.clear();
    }
}

impl Config {
    /// Load configuration from the default location, or create it if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_err)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("citrine")
            .join("config.toml")
    }
}
