//! Emulation session lifecycle
//!
//! [`EmulationSession`] serializes run/pause/stop requests from the UI thread
//! and surface callbacks from the windowing thread into one state machine
//! driving the native engine:
//!
//! ```text
//! Stopped --request_run (surface)----> Running
//! Stopped --request_run (no surface)-> Stopped, pending run
//! pending --surface_available--------> Running
//! Running --surface_lost / pause-----> Paused
//! Paused  --request_run / resume-----> Running   (surface present)
//! Paused  --request_run (recreated)--> Paused    (engine still alive)
//! any     --stop---------------------> Stopped
//! ```
//!
//! Redundant calls (pause while paused, stop while stopped, surface churn with
//! nothing running) are logged and ignored. Platform callbacks race and
//! deliver duplicates as a matter of course.

use ct_core::error::SessionError;
use ct_core::{NativeEngine, Result, SurfaceHandle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Name of the thread hosting the native run loop
pub const WORKER_THREAD_NAME: &str = "NativeEmulation";

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No run loop, or the run loop was told to stop
    Stopped,
    /// Run loop active and rendering
    Running,
    /// Run loop suspended, surface released
    Paused,
}

/// State guarded by the session lock
#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    surface: Option<SurfaceHandle>,
    /// A run was requested before a surface existed
    pending_run: bool,
}

/// Lifecycle coordinator between the platform and the native engine
pub struct EmulationSession<E: NativeEngine + ?Sized = dyn NativeEngine> {
    game_path: Arc<str>,
    engine: Arc<E>,
    inner: Mutex<SessionInner>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<E: NativeEngine + ?Sized> EmulationSession<E> {
    /// Create a stopped session for `game_path`
    pub fn new(game_path: impl Into<String>, engine: Arc<E>) -> Self {
        let game_path: String = game_path.into();
        tracing::debug!("Creating emulation session for {}", game_path);

        Self {
            game_path: Arc::from(game_path),
            engine,
            inner: Mutex::new(SessionInner {
                state: SessionState::Stopped,
                surface: None,
                pending_run: false,
            }),
            worker: Mutex::new(None),
        }
    }

    /// Start or resume emulation as soon as a surface is available.
    ///
    /// `was_recreated` is set when the host UI was torn down and rebuilt while
    /// the engine may have kept running. In that case the session re-attaches
    /// as `Paused` instead of launching a second run loop.
    pub fn request_run(&self, was_recreated: bool) -> Result<()> {
        let mut inner = self.inner.lock();

        if inner.state == SessionState::Running {
            tracing::warn!("Run requested while emulation is already running");
            return Ok(());
        }

        if was_recreated && self.engine.is_running() {
            tracing::debug!("Host recreated with a live engine, re-attaching as paused");
            inner.state = SessionState::Paused;
            inner.pending_run = false;
            return Ok(());
        }

        if inner.surface.is_some() {
            self.dispatch(&mut inner)
        } else {
            tracing::debug!("No surface yet, deferring run until one arrives");
            inner.pending_run = true;
            Ok(())
        }
    }

    /// The windowing system created or changed the render target
    pub fn surface_available(&self, surface: SurfaceHandle) -> Result<()> {
        let mut inner = self.inner.lock();
        tracing::debug!("Surface available: {}", surface);
        inner.surface = Some(surface);

        if inner.pending_run {
            return self.dispatch(&mut inner);
        }

        if inner.state == SessionState::Running {
            // Replaced under a live engine (resize, rotation): rebind only
            self.engine.attach_surface(&surface);
        }
        Ok(())
    }

    /// The windowing system destroyed the render target
    pub fn surface_lost(&self) {
        let mut inner = self.inner.lock();

        if inner.surface.take().is_none() {
            tracing::warn!("Surface lost, but no surface was set");
            return;
        }
        tracing::debug!("Surface destroyed");

        match inner.state {
            SessionState::Running => {
                self.engine.pause_and_release_surface();
                inner.state = SessionState::Paused;
            }
            SessionState::Paused => {
                tracing::warn!("Surface lost while emulation paused");
            }
            SessionState::Stopped => {
                tracing::warn!("Surface lost while emulation stopped");
            }
        }
    }

    /// Pause a running session
    pub fn pause(&self) {
        let mut inner = self.inner.lock();
        self.pause_locked(&mut inner);
    }

    /// Resume a paused session, waiting for a surface if there is none
    pub fn resume(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        self.resume_locked(&mut inner)
    }

    /// Pause if running, resume if paused
    pub fn toggle_pause(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.state {
            SessionState::Running => {
                self.pause_locked(&mut inner);
                Ok(())
            }
            SessionState::Paused => self.resume_locked(&mut inner),
            SessionState::Stopped => {
                tracing::warn!("Pause toggled while emulation stopped");
                Ok(())
            }
        }
    }

    /// Stop emulation. Safe to call from any state, any number of times.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();

        if inner.state == SessionState::Stopped {
            tracing::warn!("Stop called while already stopped");
        } else {
            tracing::debug!("Stopping emulation");
        }

        self.engine.stop();
        inner.state = SessionState::Stopped;
        inner.pending_run = false;
    }

    /// Wait for the run loop thread to return.
    ///
    /// Only meaningful after [`stop`](Self::stop); blocks otherwise.
    pub fn join_worker(&self) -> Result<()> {
        let handle = self.worker.lock().take();
        match handle {
            Some(handle) => {
                handle.join().map_err(|_| SessionError::WorkerPanicked)?;
                tracing::debug!("Emulation thread joined");
                Ok(())
            }
            None => Ok(()),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state() == SessionState::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.state() == SessionState::Stopped
    }

    pub fn has_surface(&self) -> bool {
        self.inner.lock().surface.is_some()
    }

    pub fn pending_run(&self) -> bool {
        self.inner.lock().pending_run
    }

    pub fn game_path(&self) -> &str {
        &self.game_path
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    fn pause_locked(&self, inner: &mut SessionInner) {
        match inner.state {
            SessionState::Running => {
                tracing::debug!("Pausing emulation");
                self.engine.pause_and_release_surface();
                inner.state = SessionState::Paused;
            }
            SessionState::Paused => {
                tracing::warn!("Pause called while already paused");
            }
            SessionState::Stopped => {
                tracing::warn!("Pause called while emulation stopped");
            }
        }

        if inner.pending_run {
            tracing::debug!("Pending run cancelled by pause");
            inner.pending_run = false;
        }
    }

    fn resume_locked(&self, inner: &mut SessionInner) -> Result<()> {
        match inner.state {
            SessionState::Paused if inner.surface.is_some() => self.dispatch(inner),
            SessionState::Paused => {
                tracing::debug!("Resume requested without a surface, waiting for one");
                inner.pending_run = true;
                Ok(())
            }
            SessionState::Running => {
                tracing::warn!("Resume called while already running");
                Ok(())
            }
            SessionState::Stopped => {
                tracing::warn!("Resume called while emulation stopped");
                Ok(())
            }
        }
    }

    /// Hand the surface to the engine and start or resume it.
    ///
    /// Callers hold the lock and have checked that a surface is present and
    /// the session is not running.
    fn dispatch(&self, inner: &mut SessionInner) -> Result<()> {
        let Some(surface) = inner.surface else {
            tracing::error!("Dispatch reached without a surface");
            return Ok(());
        };

        match inner.state {
            SessionState::Stopped => {
                self.engine.attach_surface(&surface);
                if let Err(e) = self.spawn_worker() {
                    self.engine.detach_surface();
                    inner.pending_run = false;
                    return Err(e);
                }
            }
            SessionState::Paused => {
                tracing::debug!("Resuming emulation");
                self.engine.attach_surface(&surface);
                self.engine.resume();
            }
            SessionState::Running => {
                tracing::error!("Dispatch reached while already running");
                return Ok(());
            }
        }

        inner.pending_run = false;
        inner.state = SessionState::Running;
        Ok(())
    }

    fn spawn_worker(&self) -> Result<()> {
        let engine = Arc::clone(&self.engine);
        let game_path = Arc::clone(&self.game_path);

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || {
                tracing::debug!("Starting emulation thread");
                engine.run(&game_path);
                tracing::debug!("Emulation thread finished");
            })
            .map_err(SessionError::WorkerSpawn)?;

        // A previous run loop that is still winding down keeps running detached
        if let Some(previous) = self.worker.lock().replace(handle) {
            if !previous.is_finished() {
                tracing::debug!("Previous emulation thread still finishing, detaching it");
            }
        }
        Ok(())
    }
}

impl<E: NativeEngine + ?Sized> Drop for EmulationSession<E> {
    fn drop(&mut self) {
        let state = self.inner.get_mut().state;
        if state != SessionState::Stopped {
            tracing::warn!("Session dropped while {:?}, stopping engine", state);
            self.engine.stop();
        }
    }
}
