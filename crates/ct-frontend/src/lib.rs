//! Native callback routing for citrine
//!
//! Connects the native core to whatever UI is currently attached and lets
//! any component request shutdown or a pause toggle.

pub mod callbacks;
pub mod exit;
pub mod lifecycle;
pub mod prompt;
pub mod sink;

pub use callbacks::{CoreError, NativeCallbacks};
pub use exit::ExitReason;
pub use lifecycle::LifecycleHooks;
pub use prompt::{PendingReply, Reply, Responder};
pub use sink::{Permission, Prompt, UiSink};
