//! Native input entry points

use crate::buttons::{ButtonId, ButtonState};

/// Receiver for the events the overlay produces
///
/// Implemented by the native bridge. Calls are forwarded as-is.
pub trait InputSink {
    fn on_gamepad_event(&self, device: &str, button: ButtonId, state: ButtonState);

    fn on_gamepad_move_event(&self, device: &str, axis: ButtonId, x: f32, y: f32);

    /// Press or release on the emulated touchscreen, in view coordinates
    fn on_touch_event(&self, x: f32, y: f32, pressed: bool);

    fn on_touch_moved(&self, x: f32, y: f32);
}
