//! Emulation session lifecycle for the citrine frontend
//!
//! This crate coordinates surface availability from the windowing system with
//! run/pause/stop requests from the UI, and drives the native engine
//! accordingly.

pub mod null_engine;
pub mod session;

pub use null_engine::NullEngine;
pub use session::{EmulationSession, SessionState, WORKER_THREAD_NAME};
