//! Lifecycle tests for the emulation session

mod common;

use common::{surface, wait_until, EngineCall, RecordingEngine};
use ct_session::{EmulationSession, SessionState};
use std::sync::Arc;

fn session_with(engine: &Arc<RecordingEngine>) -> EmulationSession<RecordingEngine> {
    EmulationSession::new("game.3ds", Arc::clone(engine))
}

fn running_session(engine: &Arc<RecordingEngine>) -> EmulationSession<RecordingEngine> {
    let session = session_with(engine);
    session.surface_available(surface(1)).unwrap();
    session.request_run(false).unwrap();
    assert_eq!(session.state(), SessionState::Running);
    // The worker records its run; wait for it so call order is deterministic
    session.join_worker().unwrap();
    session
}

#[test]
fn test_deferred_run_starts_on_surface() {
    let engine = Arc::new(RecordingEngine::new());
    let session = session_with(&engine);

    session.request_run(false).unwrap();
    assert_eq!(session.state(), SessionState::Stopped);
    assert!(session.pending_run());
    assert!(engine.calls().is_empty());

    session.surface_available(surface(1)).unwrap();
    assert_eq!(session.state(), SessionState::Running);
    assert!(!session.pending_run());

    session.stop();
    session.join_worker().unwrap();
    assert_eq!(engine.runs(), 1);
    assert!(engine.calls().contains(&EngineCall::Run("game.3ds".to_string())));
    assert_eq!(engine.calls()[0], EngineCall::Attach(surface(1)));
}

#[test]
fn test_surface_lost_while_running_pauses() {
    let engine = Arc::new(RecordingEngine::new());
    let session = running_session(&engine);

    session.surface_lost();
    assert_eq!(session.state(), SessionState::Paused);
    assert!(!session.has_surface());
    assert_eq!(engine.detaches(), 1);
    assert_eq!(engine.pauses(), 1);
    assert_eq!(engine.stops(), 0);

    session.stop();
    session.join_worker().unwrap();
}

#[test]
fn test_surface_while_paused_does_not_resume() {
    let engine = Arc::new(RecordingEngine::new());
    let session = running_session(&engine);
    session.surface_lost();

    session.surface_available(surface(2)).unwrap();
    assert_eq!(session.state(), SessionState::Paused);
    assert!(session.has_surface());
    assert_eq!(engine.resumes(), 0);

    session.request_run(false).unwrap();
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(engine.resumes(), 1);
    assert_eq!(engine.calls().last(), Some(&EngineCall::Resume));
    assert!(engine.calls().contains(&EngineCall::Attach(surface(2))));

    session.stop();
    session.join_worker().unwrap();
    assert_eq!(engine.runs(), 1);
}

#[test]
fn test_recreated_host_reattaches_as_paused() {
    let engine = Arc::new(RecordingEngine::alive());
    let session = session_with(&engine);
    session.surface_available(surface(1)).unwrap();

    session.request_run(true).unwrap();
    assert_eq!(session.state(), SessionState::Paused);
    assert_eq!(engine.runs(), 0);
    assert_eq!(engine.resumes(), 0);

    session.resume().unwrap();
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(engine.resumes(), 1);
    assert_eq!(engine.runs(), 0);
    session.stop();
}

#[test]
fn test_recreated_flag_without_live_engine_runs() {
    let engine = Arc::new(RecordingEngine::new());
    let session = session_with(&engine);
    session.surface_available(surface(1)).unwrap();

    session.request_run(true).unwrap();
    assert_eq!(session.state(), SessionState::Running);
    session.stop();
    session.join_worker().unwrap();
    assert_eq!(engine.runs(), 1);
}

#[test]
fn test_no_run_without_surface() {
    let engine = Arc::new(RecordingEngine::new());
    let session = session_with(&engine);

    session.request_run(false).unwrap();
    session.request_run(false).unwrap();
    session.pause();
    session.request_run(false).unwrap();
    session.surface_lost();
    assert_eq!(engine.runs(), 0);
    assert_eq!(engine.resumes(), 0);
    assert_eq!(engine.attaches(), 0);

    session.surface_available(surface(3)).unwrap();
    session.stop();
    session.join_worker().unwrap();
    assert_eq!(engine.runs(), 1);
}

#[test]
fn test_stop_is_idempotent() {
    for setup in 0..3 {
        let engine = Arc::new(RecordingEngine::new());
        let session = session_with(&engine);
        match setup {
            0 => {}
            1 => {
                session.surface_available(surface(1)).unwrap();
                session.request_run(false).unwrap();
            }
            _ => {
                session.surface_available(surface(1)).unwrap();
                session.request_run(false).unwrap();
                session.pause();
            }
        }

        session.stop();
        let once = session.state();
        session.stop();
        assert_eq!(once, SessionState::Stopped);
        assert_eq!(session.state(), once);
        assert!(!session.pending_run());
        session.join_worker().unwrap();
    }
}

#[test]
fn test_surface_replaced_while_running_rebinds() {
    let engine = Arc::new(RecordingEngine::new());
    let session = running_session(&engine);

    session.surface_available(surface(7)).unwrap();
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(engine.calls().last(), Some(&EngineCall::Attach(surface(7))));
    assert_eq!(engine.resumes(), 0);

    session.stop();
    session.join_worker().unwrap();
    assert_eq!(engine.runs(), 1);
}

#[test]
fn test_restart_after_stop() {
    let engine = Arc::new(RecordingEngine::new());
    let session = running_session(&engine);
    session.stop();
    session.join_worker().unwrap();

    session.request_run(false).unwrap();
    assert_eq!(session.state(), SessionState::Running);
    session.stop();
    session.join_worker().unwrap();
    assert_eq!(engine.runs(), 2);
}

/// Calls the platform can make on a session
#[derive(Debug, Clone, Copy)]
enum Op {
    RequestRun,
    RequestRunRecreated,
    SurfaceAvailable,
    SurfaceLost,
    Pause,
    Resume,
    Stop,
}

const OPS: [Op; 7] = [
    Op::RequestRun,
    Op::RequestRunRecreated,
    Op::SurfaceAvailable,
    Op::SurfaceLost,
    Op::Pause,
    Op::Resume,
    Op::Stop,
];

/// Reference state machine, with the engine calls each transition implies
#[derive(Debug, Default)]
struct Model {
    state: Option<SessionState>,
    surface: bool,
    pending: bool,
    runs: usize,
    resumes: usize,
    pauses: usize,
    stops: usize,
    attaches: usize,
}

impl Model {
    fn state(&self) -> SessionState {
        self.state.unwrap_or(SessionState::Stopped)
    }

    fn dispatch(&mut self) {
        match self.state() {
            SessionState::Stopped => self.runs += 1,
            SessionState::Paused => self.resumes += 1,
            SessionState::Running => unreachable!(),
        }
        self.attaches += 1;
        self.pending = false;
        self.state = Some(SessionState::Running);
    }

    fn apply(&mut self, op: Op, engine_alive: bool) {
        match op {
            Op::RequestRun | Op::RequestRunRecreated => {
                let recreated = matches!(op, Op::RequestRunRecreated);
                if self.state() == SessionState::Running {
                    // redundant, ignored
                } else if recreated && engine_alive {
                    self.state = Some(SessionState::Paused);
                    self.pending = false;
                } else if self.surface {
                    self.dispatch();
                } else {
                    self.pending = true;
                }
            }
            Op::SurfaceAvailable => {
                self.surface = true;
                if self.pending {
                    self.dispatch();
                } else if self.state() == SessionState::Running {
                    self.attaches += 1;
                }
            }
            Op::SurfaceLost => {
                if self.surface {
                    self.surface = false;
                    if self.state() == SessionState::Running {
                        self.pauses += 1;
                        self.state = Some(SessionState::Paused);
                    }
                }
            }
            Op::Pause => {
                if self.state() == SessionState::Running {
                    self.pauses += 1;
                    self.state = Some(SessionState::Paused);
                }
                self.pending = false;
            }
            Op::Resume => {
                if self.state() == SessionState::Paused {
                    if self.surface {
                        self.dispatch();
                    } else {
                        self.pending = true;
                    }
                }
            }
            Op::Stop => {
                self.stops += 1;
                self.state = Some(SessionState::Stopped);
                self.pending = false;
            }
        }
    }
}

fn apply_to_session(session: &EmulationSession<RecordingEngine>, op: Op, raw: u64) {
    match op {
        Op::RequestRun => session.request_run(false).unwrap(),
        Op::RequestRunRecreated => session.request_run(true).unwrap(),
        Op::SurfaceAvailable => session.surface_available(surface(raw)).unwrap(),
        Op::SurfaceLost => session.surface_lost(),
        Op::Pause => session.pause(),
        Op::Resume => session.resume().unwrap(),
        Op::Stop => session.stop(),
    }
}

fn sequences(len: usize) -> Vec<Vec<Op>> {
    let mut out = vec![Vec::new()];
    for _ in 0..len {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                OPS.into_iter().map(move |op| {
                    let mut next = prefix.clone();
                    next.push(op);
                    next
                })
            })
            .collect();
    }
    out
}

#[test]
fn test_state_matches_reference_model() {
    for engine_alive in [false, true] {
        for len in 1..=4 {
            for ops in sequences(len) {
                let engine = Arc::new(if engine_alive {
                    RecordingEngine::alive()
                } else {
                    RecordingEngine::new()
                });
                let session = session_with(&engine);
                let mut model = Model::default();

                for (i, op) in ops.iter().enumerate() {
                    apply_to_session(&session, *op, i as u64);
                    model.apply(*op, engine_alive);
                    assert_eq!(session.state(), model.state(), "after {:?}", &ops[..=i]);
                    assert_eq!(session.pending_run(), model.pending, "after {:?}", &ops[..=i]);
                    assert_eq!(session.has_surface(), model.surface, "after {:?}", &ops[..=i]);
                }

                assert_eq!(engine.resumes(), model.resumes, "{:?}", ops);
                assert_eq!(engine.pauses(), model.pauses, "{:?}", ops);
                assert_eq!(engine.detaches(), model.pauses, "{:?}", ops);
                assert_eq!(engine.stops(), model.stops, "{:?}", ops);
                assert_eq!(engine.attaches(), model.attaches, "{:?}", ops);
                assert!(wait_until(|| engine.runs() == model.runs), "{:?}", ops);

                session.stop();
                session.join_worker().unwrap();
            }
        }
    }
}
