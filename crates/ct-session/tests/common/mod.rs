//! Shared test engine

#![allow(dead_code)]

use ct_core::{NativeEngine, SurfaceHandle};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// One call into the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Run(String),
    Resume,
    Pause,
    Stop,
    Attach(SurfaceHandle),
    Detach,
}

/// Engine that records every call and returns immediately
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    alive: AtomicBool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that reports a run loop surviving from before the host was recreated
    pub fn alive() -> Self {
        let engine = Self::default();
        engine.alive.store(true, Ordering::SeqCst);
        engine
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|&call| pred(call)).count()
    }

    pub fn runs(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::Run(_)))
    }

    pub fn resumes(&self) -> usize {
        self.count(|call| *call == EngineCall::Resume)
    }

    pub fn pauses(&self) -> usize {
        self.count(|call| *call == EngineCall::Pause)
    }

    pub fn stops(&self) -> usize {
        self.count(|call| *call == EngineCall::Stop)
    }

    pub fn attaches(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::Attach(_)))
    }

    pub fn detaches(&self) -> usize {
        self.count(|call| *call == EngineCall::Detach)
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().push(call);
    }
}

impl NativeEngine for RecordingEngine {
    fn run(&self, path: &str) {
        self.record(EngineCall::Run(path.to_owned()));
    }

    fn resume(&self) {
        self.record(EngineCall::Resume);
    }

    fn pause(&self) {
        self.record(EngineCall::Pause);
    }

    fn stop(&self) {
        self.record(EngineCall::Stop);
    }

    fn is_running(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn attach_surface(&self, surface: &SurfaceHandle) {
        self.record(EngineCall::Attach(*surface));
    }

    fn detach_surface(&self) {
        self.record(EngineCall::Detach);
    }
}

pub fn surface(raw: u64) -> SurfaceHandle {
    SurfaceHandle::new(raw, 400, 480)
}

/// Poll `condition` for up to five seconds
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}
