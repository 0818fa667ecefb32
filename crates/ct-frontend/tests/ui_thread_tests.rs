//! Prompts answered from a separate UI thread, and hooks driving a session

use ct_core::SurfaceHandle;
use ct_frontend::{
    CoreError, ExitReason, LifecycleHooks, NativeCallbacks, Permission, Prompt, Responder, UiSink,
};
use ct_session::{EmulationSession, NullEngine, SessionState};
use parking_lot::Mutex;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Forwards prompts to a channel the "UI thread" drains
struct ChannelUi {
    tx: Mutex<mpsc::Sender<(Prompt, Responder)>>,
    exits: Mutex<Vec<ExitReason>>,
}

impl ChannelUi {
    fn new() -> (Arc<Self>, mpsc::Receiver<(Prompt, Responder)>) {
        let (tx, rx) = mpsc::channel();
        let ui = Arc::new(Self { tx: Mutex::new(tx), exits: Mutex::new(Vec::new()) });
        (ui, rx)
    }
}

impl UiSink for ChannelUi {
    fn show_prompt(&self, prompt: Prompt, responder: Responder) {
        // A closed channel drops the responder, which dismisses the prompt
        let _ = self.tx.lock().send((prompt, responder));
    }

    fn has_permission(&self, _permission: Permission) -> bool {
        false
    }

    fn show_exit(&self, reason: ExitReason) {
        self.exits.lock().push(reason);
    }
}

#[test]
fn test_native_thread_blocks_until_ui_answers() {
    let (ui, rx) = ChannelUi::new();
    let callbacks = Arc::new(NativeCallbacks::new());
    callbacks.attach_ui(ui);

    let native = {
        let callbacks = Arc::clone(&callbacks);
        thread::spawn(move || callbacks.display_alert_msg("Question", "Keep going?", true))
    };

    let (prompt, responder) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        prompt,
        Prompt::Alert {
            title: "Question".to_owned(),
            message: "Keep going?".to_owned(),
            yes_no: true
        }
    );
    // Native thread is still parked on the reply
    thread::sleep(Duration::from_millis(20));
    assert!(!native.is_finished());

    responder.respond(true);
    assert!(native.join().unwrap());
}

#[test]
fn test_ui_going_away_unblocks_native_thread() {
    let (ui, rx) = ChannelUi::new();
    let callbacks = Arc::new(NativeCallbacks::new());
    callbacks.attach_ui(ui);

    let native = {
        let callbacks = Arc::clone(&callbacks);
        thread::spawn(move || callbacks.on_core_error(Some(CoreError::Unknown), ""))
    };

    let (prompt, responder) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(prompt, Prompt::CoreError { ref title, .. } if title == "Fatal Error"));
    drop(responder);
    assert!(!native.join().unwrap());

    // With the receiver gone, new prompts are dismissed immediately
    drop(rx);
    assert!(!callbacks.request_permission(Permission::Camera));
}

#[test]
fn test_exit_hooks_stop_session() {
    let engine = Arc::new(NullEngine::with_frame_time(Duration::from_millis(1)));
    let session = Arc::new(EmulationSession::new("game.3ds", Arc::clone(&engine)));
    let hooks = LifecycleHooks::new();
    {
        let session = Arc::clone(&session);
        hooks.add_shutdown_hook(move || session.stop());
    }
    {
        let session = Arc::clone(&session);
        hooks.add_pause_resume_hook(move || session.toggle_pause().unwrap());
    }

    session.surface_available(SurfaceHandle::new(1, 400, 480)).unwrap();
    session.request_run(false).unwrap();

    hooks.pause_or_resume();
    assert_eq!(session.state(), SessionState::Paused);
    hooks.pause_or_resume();
    assert_eq!(session.state(), SessionState::Running);

    let (ui, _rx) = ChannelUi::new();
    let callbacks = NativeCallbacks::new();
    callbacks.attach_ui(Arc::clone(&ui) as Arc<dyn UiSink>);
    let reason = callbacks.exit_emulation(6);
    hooks.close_game();

    assert_eq!(reason, ExitReason::LoaderInvalidFormat);
    assert_eq!(*ui.exits.lock(), vec![ExitReason::LoaderInvalidFormat]);
    assert_eq!(session.state(), SessionState::Stopped);
    session.join_worker().unwrap();
    hooks.clear();
}
