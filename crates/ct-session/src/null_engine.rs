//! Headless engine
//!
//! Stands in for the native core when there is none: `run` blocks like the
//! real thing, parks while paused or without a surface, and counts frames
//! while it would be rendering. Used by the headless runner and by tests.

use ct_core::{NativeEngine, SurfaceHandle};
use parking_lot::{Condvar, Mutex};
use std::time::Duration;

/// Frame time of the simulated run loop (60 FPS)
pub const NULL_FRAME_TIME: Duration = Duration::from_micros(16_667);

#[derive(Debug, Default)]
struct NullState {
    running: bool,
    paused: bool,
    stop_requested: bool,
    /// A surface was attached while idle or while the loop was exiting: a
    /// run loop is about to start
    launch_pending: bool,
    /// A stop arrived for the pending launch before it entered its loop
    launch_cancelled: bool,
    surface: Option<SurfaceHandle>,
    frames: u64,
    last_game: Option<String>,
}

/// Engine that renders nothing
pub struct NullEngine {
    state: Mutex<NullState>,
    wake: Condvar,
    frame_time: Duration,
}

impl NullEngine {
    pub fn new() -> Self {
        Self::with_frame_time(NULL_FRAME_TIME)
    }

    pub fn with_frame_time(frame_time: Duration) -> Self {
        Self {
            state: Mutex::new(NullState::default()),
            wake: Condvar::new(),
            frame_time,
        }
    }

    /// Frames "rendered" so far, across runs
    pub fn frames(&self) -> u64 {
        self.state.lock().frames
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.state.lock().surface
    }

    /// Path passed to the most recent `run`
    pub fn last_game(&self) -> Option<String> {
        self.state.lock().last_game.clone()
    }
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeEngine for NullEngine {
    fn run(&self, path: &str) {
        let mut state = self.state.lock();
        if state.running {
            tracing::debug!("Null engine: waiting for the previous run loop to exit");
            self.wake.wait_while(&mut state, |s| s.running);
        }
        if std::mem::take(&mut state.launch_cancelled) {
            tracing::debug!("Null engine: launch of {} cancelled by stop", path);
            return;
        }

        tracing::info!("Null engine: running {}", path);
        state.running = true;
        state.paused = false;
        state.launch_pending = false;
        state.last_game = Some(path.to_owned());

        while !state.stop_requested {
            if state.paused || state.surface.is_none() {
                self.wake.wait(&mut state);
                continue;
            }
            state.frames += 1;
            self.wake.wait_for(&mut state, self.frame_time);
        }

        state.running = false;
        state.paused = false;
        state.stop_requested = false;
        tracing::info!("Null engine: run loop exited after {} frames", state.frames);
        drop(state);
        self.wake.notify_all();
    }

    fn resume(&self) {
        self.state.lock().paused = false;
        self.wake.notify_all();
    }

    fn pause(&self) {
        self.state.lock().paused = true;
    }

    fn stop(&self) {
        let mut state = self.state.lock();
        if state.running {
            state.stop_requested = true;
        }
        if state.launch_pending {
            state.launch_cancelled = true;
            state.launch_pending = false;
        }
        drop(state);
        self.wake.notify_all();
    }

    fn is_running(&self) -> bool {
        self.state.lock().running
    }

    fn attach_surface(&self, surface: &SurfaceHandle) {
        let mut state = self.state.lock();
        if !state.running || state.stop_requested {
            state.launch_pending = true;
        }
        state.surface = Some(*surface);
        drop(state);
        self.wake.notify_all();
    }

    fn detach_surface(&self) {
        // A pending launch stays pending: the session may pause before the
        // worker enters run, and a later stop must still reach it
        self.state.lock().surface = None;
    }
}
