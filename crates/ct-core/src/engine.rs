//! Native engine contract
//!
//! The emulation core itself (CPU, GPU, audio) lives behind [`NativeEngine`].
//! The frontend only ever drives it through these entry points and never
//! assumes anything about how they are implemented.

use std::fmt;

/// Opaque handle to a platform render target.
///
/// Handles are replaced wholesale whenever the windowing system delivers a new
/// one; they are never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle {
    raw: u64,
    width: u32,
    height: u32,
}

impl SurfaceHandle {
    pub fn new(raw: u64, width: u32, height: u32) -> Self {
        Self { raw, width, height }
    }

    /// Platform window pointer value
    pub fn raw(&self) -> u64 {
        self.raw
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface 0x{:x} ({}x{})", self.raw, self.width, self.height)
    }
}

/// Entry points exposed by the native emulation core.
///
/// Everything except [`NativeEngine::run`] must return promptly; they are
/// called from UI and windowing callbacks.
pub trait NativeEngine: Send + Sync + 'static {
    /// Run the game at `path`. Blocks until emulation stops.
    ///
    /// A session restarted right after `stop` may call this while the
    /// previous run loop is still exiting; the new run waits for it.
    fn run(&self, path: &str);

    /// Unblock a paused run loop
    fn resume(&self);

    /// Suspend the run loop
    fn pause(&self);

    /// Ask the run loop to terminate. Completion is asynchronous.
    fn stop(&self);

    /// Whether a run loop is alive, paused or not
    fn is_running(&self) -> bool;

    /// Bind the render target
    fn attach_surface(&self, surface: &SurfaceHandle);

    /// Unbind the render target
    fn detach_surface(&self);

    /// Stop rendering to the current surface and suspend.
    ///
    /// The surface goes first: a paused engine must not keep a reference to a
    /// surface that may be destroyed while it sleeps.
    fn pause_and_release_surface(&self) {
        self.detach_surface();
        self.pause();
    }
}
