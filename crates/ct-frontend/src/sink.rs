//! UI surface the native callbacks talk to

use crate::exit::ExitReason;
use crate::prompt::Responder;
use std::fmt;

/// Runtime permission the core may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Camera,
    Microphone,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::Microphone => write!(f, "microphone"),
        }
    }
}

/// Question shown to the user while a native thread waits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Answer is "continue" (true) or "abort" (false)
    CoreError { title: String, message: String },
    /// With `yes_no` unset only a dismiss button is offered
    Alert { title: String, message: String, yes_no: bool },
    /// Answer is whether the user granted it
    Permission(Permission),
}

/// Host UI
///
/// `show_prompt` must not block: it hands the prompt to the UI thread and
/// returns. The UI answers through the responder, or drops it to dismiss.
pub trait UiSink: Send + Sync {
    fn show_prompt(&self, prompt: Prompt, responder: Responder);

    fn has_permission(&self, permission: Permission) -> bool;

    /// Tell the user why emulation ended; the host closes afterwards
    fn show_exit(&self, reason: ExitReason);
}
