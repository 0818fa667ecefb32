//! Shutdown and pause hooks
//!
//! Lets menus, hotkeys and the native exit path stop or pause emulation
//! without holding a reference to the session.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

type Hook = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct LifecycleHooks {
    shutdown: Mutex<Vec<Hook>>,
    pause_resume: Mutex<Vec<Hook>>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shutdown_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.shutdown.lock().push(Arc::new(hook));
    }

    pub fn add_pause_resume_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.pause_resume.lock().push(Arc::new(hook));
    }

    /// Run every shutdown hook in registration order
    pub fn close_game(&self) {
        debug!("Running shutdown hooks");
        run(&self.shutdown);
    }

    /// Run every pause/resume hook in registration order
    pub fn pause_or_resume(&self) {
        debug!("Running pause/resume hooks");
        run(&self.pause_resume);
    }

    /// Drop every hook
    pub fn clear(&self) {
        self.shutdown.lock().clear();
        self.pause_resume.lock().clear();
    }
}

// Hooks run on a snapshot so they may register or clear hooks themselves
fn run(hooks: &Mutex<Vec<Hook>>) {
    let snapshot = hooks.lock().clone();
    for hook in snapshot {
        hook();
    }
}
