//! Entry points the native core calls back into
//!
//! Every callback runs on a native thread. Those that need an answer post a
//! [`Prompt`] to the attached [`UiSink`] and block that thread, never the UI,
//! until the user replies. With no sink attached they log and return `false`.

use crate::exit::ExitReason;
use crate::prompt::{self, Reply};
use crate::sink::{Permission, Prompt, UiSink};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Error categories the core can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreError {
    /// A required system archive is missing
    SystemFiles,
    Savestate,
    Unknown,
}

/// Router from native callbacks to the current UI
#[derive(Default)]
pub struct NativeCallbacks {
    ui: RwLock<Option<Arc<dyn UiSink>>>,
}

impl NativeCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route callbacks to `sink`, replacing any previous one
    pub fn attach_ui(&self, sink: Arc<dyn UiSink>) {
        debug!("Registering UI sink");
        if self.ui.write().replace(sink).is_some() {
            debug!("Replaced previous UI sink");
        }
    }

    pub fn detach_ui(&self) {
        debug!("Unregistering UI sink");
        self.ui.write().take();
    }

    pub fn has_ui(&self) -> bool {
        self.ui.read().is_some()
    }

    fn ui(&self) -> Option<Arc<dyn UiSink>> {
        self.ui.read().clone()
    }

    /// Show `prompt` and block until it is answered; `None` without a sink
    fn ask(&self, prompt: Prompt) -> Option<Reply> {
        // Clone the sink out so the lock is not held while waiting
        let ui = self.ui()?;
        let (responder, pending) = prompt::channel();
        ui.show_prompt(prompt, responder);
        Some(pending.wait())
    }

    /// Returns true to continue emulation, false to abort
    ///
    /// `None` stands for an error kind this frontend has no dialog for; those
    /// continue without asking.
    pub fn on_core_error(&self, kind: Option<CoreError>, details: &str) -> bool {
        if !self.has_ui() {
            error!("Core error {:?} with no UI attached: {}", kind, details);
            return false;
        }
        let (title, message) = match kind {
            Some(CoreError::SystemFiles) => {
                let archive = if details.is_empty() { "A system archive" } else { details };
                (
                    "System Archive Not Found",
                    format!("{archive} is missing. Please dump your system archives."),
                )
            }
            Some(CoreError::Savestate) => ("Save/Load Error", details.to_owned()),
            Some(CoreError::Unknown) => (
                "Fatal Error",
                "A fatal error occurred. Check the log for details.".to_owned(),
            ),
            None => return true,
        };

        error!("{}: {}", title, message);
        let prompt = Prompt::CoreError { title: title.to_owned(), message };
        self.ask(prompt).is_some_and(Reply::accepted)
    }

    /// Show an alert; only a yes/no alert can return true
    pub fn display_alert_msg(&self, title: &str, message: &str, yes_no: bool) -> bool {
        error!("Alert: {}", message);
        let prompt = Prompt::Alert {
            title: title.to_owned(),
            message: message.to_owned(),
            yes_no,
        };
        match self.ask(prompt) {
            Some(reply) => yes_no && reply.accepted(),
            None => {
                warn!("No UI attached, can't show alert");
                false
            }
        }
    }

    pub fn request_permission(&self, permission: Permission) -> bool {
        let Some(ui) = self.ui() else {
            error!("No UI attached to grant {} permission", permission);
            return false;
        };
        if ui.has_permission(permission) {
            return true;
        }
        drop(ui);

        let granted = self
            .ask(Prompt::Permission(permission))
            .is_some_and(Reply::accepted);
        info!("{} permission {}", permission, if granted { "granted" } else { "denied" });
        granted
    }

    /// Report the end of emulation with the loader's result code
    pub fn exit_emulation(&self, result_code: i32) -> ExitReason {
        let reason = ExitReason::from_code(result_code);
        if reason.is_error() {
            error!("Emulation exited: {}", reason);
        } else {
            info!("Emulation exited: {}", reason);
        }
        match self.ui() {
            Some(ui) => ui.show_exit(reason),
            None => warn!("No UI attached, can't show exit reason"),
        }
        reason
    }
}
