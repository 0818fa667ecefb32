//! Core types for the citrine frontend
//!
//! This crate provides the foundational types, error handling,
//! configuration, and logging infrastructure shared by the other crates,
//! along with the contract of the native emulation engine.

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

pub use config::Config;
pub use engine::{NativeEngine, SurfaceHandle};
pub use error::{FrontendError, Result};
