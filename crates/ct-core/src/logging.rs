//! Logging setup
//!
//! `RUST_LOG` takes precedence over the configured level, so a single run can
//! be made verbose without touching the config file.

use crate::config::DebugConfig;
use crate::error::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Build the filter for `config`, honouring `RUST_LOG` when it is set
pub fn env_filter(config: &DebugConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()))
}

/// Install the global tracing subscriber.
///
/// Returns `Ok(false)` if a subscriber was already installed (tests, embedding
/// hosts); the existing one is left alone.
pub fn init(config: &DebugConfig) -> Result<bool> {
    let filter = env_filter(config);

    let installed = if config.log_to_file {
        if let Some(parent) = config.log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr.and(Mutex::new(file)))
            .with_ansi(false)
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(
            "Logging initialized (level {:?}, file: {})",
            config.log_level,
            if config.log_to_file {
                config.log_path.display().to_string()
            } else {
                "none".to_string()
            }
        );
    }
    Ok(installed)
}
