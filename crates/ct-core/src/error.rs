//! Error types for the citrine frontend

use thiserror::Error;

/// Main error type for the frontend
#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Game not found: {0}")]
    GameNotFound(String),
}

/// Emulation session errors
///
/// Redundant lifecycle calls are not errors; they are logged and ignored.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to spawn emulation thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Emulation thread panicked")]
    WorkerPanicked,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Input overlay errors
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unknown button id: {0}")]
    UnknownButton(i32),

    #[error("Pointer index {index} out of range ({count} pointers)")]
    PointerIndex { index: usize, count: usize },
}

/// Result type alias for frontend operations
pub type Result<T> = std::result::Result<T, FrontendError>;
