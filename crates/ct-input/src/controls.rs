//! On-screen controls
//!
//! Each control tracks at most one pointer and reports whether an event
//! changed its state.

use crate::buttons::{ButtonId, ButtonState};
use crate::touch::{Pointer, PointerEvent, Rect};
use bitflags::bitflags;

/// Normalized distance from the d-pad center before a direction registers
pub const DPAD_DEADZONE: f32 = 0.5;

bitflags! {
    /// Directions currently held on a d-pad
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DpadDirections: u8 {
        const UP    = 0x01;
        const DOWN  = 0x02;
        const LEFT  = 0x04;
        const RIGHT = 0x08;
    }
}

impl DpadDirections {
    /// Directions for a normalized offset from the d-pad center
    pub fn from_axes(x: f32, y: f32) -> Self {
        let mut dirs = Self::empty();
        dirs.set(Self::UP, y < -DPAD_DEADZONE);
        dirs.set(Self::DOWN, y > DPAD_DEADZONE);
        dirs.set(Self::LEFT, x < -DPAD_DEADZONE);
        dirs.set(Self::RIGHT, x > DPAD_DEADZONE);
        dirs
    }
}

/// Whether `event` ends the gesture of the tracked pointer
fn releases(event: &PointerEvent, action: Pointer, tracked: Option<i32>) -> bool {
    match tracked {
        Some(id) => (event.is_up() && action.id == id) || event.is_cancel(),
        None => false,
    }
}

/// A single push button
#[derive(Debug, Clone)]
pub struct OverlayButton {
    id: ButtonId,
    bounds: Rect,
    pressed: bool,
    tracked: Option<i32>,
}

impl OverlayButton {
    pub fn new(id: ButtonId, bounds: Rect) -> Self {
        Self { id, bounds, pressed: false, tracked: None }
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn state(&self) -> ButtonState {
        ButtonState::from_pressed(self.pressed)
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn tracked_pointer(&self) -> Option<i32> {
        self.tracked
    }

    /// Returns true when the button changed between pressed and released
    pub fn update(&mut self, event: &PointerEvent, action: Pointer) -> bool {
        if event.is_down() && self.tracked.is_none() {
            let (x, y) = action.pixel();
            if !self.bounds.contains(x, y) {
                return false;
            }
            self.tracked = Some(action.id);
            self.pressed = true;
            return true;
        }
        if releases(event, action, self.tracked) {
            self.tracked = None;
            self.pressed = false;
            return true;
        }
        false
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.bounds.offset(dx, dy);
    }
}

/// Four-way directional pad
#[derive(Debug, Clone)]
pub struct OverlayDpad {
    bounds: Rect,
    directions: DpadDirections,
    tracked: Option<i32>,
}

impl OverlayDpad {
    pub const UP: ButtonId = ButtonId::DpadUp;
    pub const DOWN: ButtonId = ButtonId::DpadDown;
    pub const LEFT: ButtonId = ButtonId::DpadLeft;
    pub const RIGHT: ButtonId = ButtonId::DpadRight;

    pub fn new(bounds: Rect) -> Self {
        Self { bounds, directions: DpadDirections::empty(), tracked: None }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn directions(&self) -> DpadDirections {
        self.directions
    }

    pub fn tracked_pointer(&self) -> Option<i32> {
        self.tracked
    }

    /// Button states in up, down, left, right order
    pub fn button_states(&self) -> [(ButtonId, ButtonState); 4] {
        let state = |dir| ButtonState::from_pressed(self.directions.contains(dir));
        [
            (Self::UP, state(DpadDirections::UP)),
            (Self::DOWN, state(DpadDirections::DOWN)),
            (Self::LEFT, state(DpadDirections::LEFT)),
            (Self::RIGHT, state(DpadDirections::RIGHT)),
        ]
    }

    /// Returns true when the four button states must be re-sent
    ///
    /// Without `slide` only the initial touch picks a direction; moves are
    /// ignored until the finger lifts.
    pub fn update(&mut self, event: &PointerEvent, action: Pointer, slide: bool) -> bool {
        if event.is_down() && self.tracked.is_none() {
            let (x, y) = action.pixel();
            if !self.bounds.contains(x, y) {
                return false;
            }
            self.tracked = Some(action.id);
        }
        if releases(event, action, self.tracked) {
            self.tracked = None;
            self.directions = DpadDirections::empty();
            return true;
        }
        let Some(id) = self.tracked else {
            return false;
        };
        if !slide && !event.is_down() {
            return false;
        }
        let Some(pointer) = event.pointer(id) else {
            return false;
        };

        let (x, y) = self.bounds.normalize(pointer.x, pointer.y);
        let directions = DpadDirections::from_axes(x, y);
        let changed = directions != self.directions;
        self.directions = directions;
        changed
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.bounds.offset(dx, dy);
    }
}

/// Analog stick
///
/// `bounds` is where the stick is drawn at rest. While held with relative
/// centering the active area is recentered on the initial touch.
#[derive(Debug, Clone)]
pub struct OverlayJoystick {
    id: ButtonId,
    bounds: Rect,
    active: Rect,
    x: f32,
    y: f32,
    tracked: Option<i32>,
}

impl OverlayJoystick {
    pub fn new(id: ButtonId, bounds: Rect) -> Self {
        Self { id, bounds, active: bounds, x: 0.0, y: 0.0, tracked: None }
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Area the axes are currently measured against
    pub fn active_bounds(&self) -> Rect {
        self.active
    }

    pub fn axes(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn is_pressed(&self) -> bool {
        self.tracked.is_some()
    }

    pub fn tracked_pointer(&self) -> Option<i32> {
        self.tracked
    }

    /// Center of the knob in view pixels
    pub fn knob_position(&self) -> (i32, i32) {
        let half_w = self.active.width() as f32 / 2.0;
        let half_h = self.active.height() as f32 / 2.0;
        (
            self.active.center_x().saturating_add((self.x * half_w) as i32),
            self.active.center_y().saturating_add((self.y * half_h) as i32),
        )
    }

    /// Returns true when the axes changed and a move event is due
    pub fn update(&mut self, event: &PointerEvent, action: Pointer, rel_center: bool) -> bool {
        if event.is_down() && self.tracked.is_none() {
            let (x, y) = action.pixel();
            if !self.bounds.contains(x, y) {
                return false;
            }
            if rel_center {
                self.active.offset(
                    x.saturating_sub(self.active.center_x()),
                    y.saturating_sub(self.active.center_y()),
                );
            }
            self.tracked = Some(action.id);
        }
        if releases(event, action, self.tracked) {
            self.tracked = None;
            self.x = 0.0;
            self.y = 0.0;
            self.active = self.bounds;
            return true;
        }
        let Some(pointer) = self.tracked.and_then(|id| event.pointer(id)) else {
            return false;
        };

        let (x, y) = clamp_to_circle(self.active.normalize(pointer.x, pointer.y));
        let changed = x != self.x || y != self.y;
        self.x = x;
        self.y = y;
        changed
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.bounds.offset(dx, dy);
        self.active = self.bounds;
    }
}

/// Scale `(x, y)` back onto the unit circle when it lies outside it
fn clamp_to_circle((x, y): (f32, f32)) -> (f32, f32) {
    let radius = x.hypot(y);
    if radius > 1.0 {
        (x / radius, y / radius)
    } else {
        (x, y)
    }
}
