//! Touch input for citrine
//!
//! This crate turns pointer events into emulated controller input:
//! - Button ids and states shared with the native layer
//! - On-screen buttons, d-pad and analog sticks
//! - Default layout and user placement
//! - Touchscreen passthrough and layout editing

pub mod buttons;
pub mod controls;
pub mod layout;
pub mod overlay;
pub mod sink;
pub mod touch;

pub use buttons::{ButtonId, ButtonState, TOUCHSCREEN_DEVICE};
pub use controls::{DpadDirections, OverlayButton, OverlayDpad, OverlayJoystick};
pub use overlay::{InputOverlay, OverlayUpdate};
pub use sink::InputSink;
pub use touch::{Pointer, PointerAction, PointerEvent, Rect};
