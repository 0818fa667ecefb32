//! Touch input overlay
//!
//! Routes pointer events to the on-screen controls and forwards the resulting
//! button and axis changes to an [`InputSink`]. Pointers no control claimed
//! drive the emulated touchscreen. In edit mode touches drag controls around
//! instead.

use crate::buttons::TOUCHSCREEN_DEVICE;
use crate::layout::Controls;
use crate::sink::InputSink;
use crate::touch::{Pointer, PointerEvent, Rect};
use ct_core::config::{ControlPlacement, OverlayConfig};
use ct_core::error::InputError;
use tracing::{debug, trace};

/// Outcome of one pointer event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayUpdate {
    /// Some control changed and should be redrawn
    pub redraw: bool,
    /// Edit mode finished moving a control to this position
    pub placement: Option<ControlPlacement>,
}

/// Which control edit mode is dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selected {
    Button(usize),
    Dpad(usize),
    Joystick(usize),
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    control: Selected,
    pointer: i32,
    last: (i32, i32),
}

/// Behavior switches copied out of the overlay config
#[derive(Debug, Clone, Copy)]
struct Settings {
    touch_enabled: bool,
    dpad_slide: bool,
    joystick_rel_center: bool,
}

impl From<&OverlayConfig> for Settings {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            touch_enabled: config.touch_enabled,
            dpad_slide: config.dpad_slide,
            joystick_rel_center: config.joystick_rel_center,
        }
    }
}

/// On-screen controller
pub struct InputOverlay {
    controls: Controls,
    settings: Settings,
    screen: Rect,
    edit_mode: bool,
    drag: Option<Drag>,
    /// Pointer currently pressing the emulated touchscreen
    touch_pointer: Option<i32>,
}

impl InputOverlay {
    pub fn new(config: &OverlayConfig, width: u32, height: u32) -> Self {
        let screen = Rect::new(0, 0, clamp_dim(width), clamp_dim(height));
        Self {
            controls: Controls::build(config, screen),
            settings: Settings::from(config),
            screen,
            edit_mode: false,
            drag: None,
            touch_pointer: None,
        }
    }

    /// Rebuild the controls after the config or the screen size changed
    ///
    /// Held controls are dropped without emitting releases; callers reload
    /// between gestures.
    pub fn reload(&mut self, config: &OverlayConfig, width: u32, height: u32) {
        *self = Self { edit_mode: self.edit_mode, ..Self::new(config, width, height) };
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn is_in_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        debug!("Overlay edit mode: {}", edit_mode);
        self.edit_mode = edit_mode;
        self.drag = None;
    }

    /// Handle one pointer event
    pub fn on_touch(
        &mut self,
        event: &PointerEvent,
        sink: &dyn InputSink,
    ) -> Result<OverlayUpdate, InputError> {
        let action = event.action_pointer()?;
        if self.edit_mode {
            return Ok(self.on_touch_while_editing(event, action));
        }

        let mut update = OverlayUpdate::default();
        let Settings { touch_enabled, dpad_slide, joystick_rel_center } = self.settings;

        for button in &mut self.controls.buttons {
            if button.update(event, action) {
                sink.on_gamepad_event(TOUCHSCREEN_DEVICE, button.id(), button.state());
                update.redraw = true;
            }
        }
        for dpad in &mut self.controls.dpads {
            if dpad.update(event, action, dpad_slide) {
                for (id, state) in dpad.button_states() {
                    sink.on_gamepad_event(TOUCHSCREEN_DEVICE, id, state);
                }
                update.redraw = true;
            }
        }
        for joystick in &mut self.controls.joysticks {
            if joystick.update(event, action, joystick_rel_center) {
                let (x, y) = joystick.axes();
                sink.on_gamepad_move_event(TOUCHSCREEN_DEVICE, joystick.id(), x, y);
                update.redraw = true;
            }
        }

        if touch_enabled {
            self.forward_touchscreen(event, action, sink);
        }
        Ok(update)
    }

    /// Whether some control is tracking the pointer
    pub fn is_consumed(&self, pointer_id: i32) -> bool {
        let owned = Some(pointer_id);
        self.controls.buttons.iter().any(|b| b.tracked_pointer() == owned)
            || self.controls.dpads.iter().any(|d| d.tracked_pointer() == owned)
            || self.controls.joysticks.iter().any(|j| j.tracked_pointer() == owned)
    }

    /// The emulated touchscreen is single-touch: the first unclaimed finger
    /// owns it until it lifts.
    fn forward_touchscreen(&mut self, event: &PointerEvent, action: Pointer, sink: &dyn InputSink) {
        if event.is_down() {
            if self.touch_pointer.is_none() && !self.is_consumed(action.id) {
                trace!("Touchscreen press at ({}, {})", action.x, action.y);
                self.touch_pointer = Some(action.id);
                sink.on_touch_event(action.x, action.y, true);
            }
        } else if event.is_move() {
            if let Some(pointer) = self.touch_pointer.and_then(|id| event.pointer(id)) {
                sink.on_touch_moved(pointer.x, pointer.y);
            }
        } else if event.is_cancel() || (event.is_up() && self.touch_pointer == Some(action.id)) {
            if self.touch_pointer.take().is_some() {
                sink.on_touch_event(0.0, 0.0, false);
            }
        }
    }

    fn on_touch_while_editing(&mut self, event: &PointerEvent, action: Pointer) -> OverlayUpdate {
        let mut update = OverlayUpdate::default();
        let (x, y) = action.pixel();

        if event.is_down() {
            if self.drag.is_none() {
                self.drag = self.control_at(x, y).map(|control| Drag {
                    control,
                    pointer: action.id,
                    last: (x, y),
                });
            }
        } else if event.is_move() {
            if let Some(drag) = self.drag.as_mut() {
                if let Some(pointer) = event.pointer(drag.pointer) {
                    let (px, py) = pointer.pixel();
                    let (dx, dy) = (px.saturating_sub(drag.last.0), py.saturating_sub(drag.last.1));
                    drag.last = (px, py);
                    let control = drag.control;
                    self.move_control(control, dx, dy);
                    update.redraw = true;
                }
            }
        } else if event.is_cancel() || event.is_up() {
            if let Some(drag) = self.drag.filter(|d| event.is_cancel() || d.pointer == action.id) {
                self.drag = None;
                let placement = self.placement_of(drag.control);
                debug!("Control {} moved to ({}, {})", placement.id, placement.x, placement.y);
                update.placement = Some(placement);
            }
        }
        update
    }

    fn control_at(&self, x: i32, y: i32) -> Option<Selected> {
        let c = &self.controls;
        c.buttons
            .iter()
            .position(|b| b.bounds().contains(x, y))
            .map(Selected::Button)
            .or_else(|| c.dpads.iter().position(|d| d.bounds().contains(x, y)).map(Selected::Dpad))
            .or_else(|| {
                c.joysticks
                    .iter()
                    .position(|j| j.bounds().contains(x, y))
                    .map(Selected::Joystick)
            })
    }

    fn move_control(&mut self, control: Selected, dx: i32, dy: i32) {
        let c = &mut self.controls;
        match control {
            Selected::Button(i) => c.buttons[i].move_by(dx, dy),
            Selected::Dpad(i) => c.dpads[i].move_by(dx, dy),
            Selected::Joystick(i) => c.joysticks[i].move_by(dx, dy),
        }
    }

    fn placement_of(&self, control: Selected) -> ControlPlacement {
        let c = &self.controls;
        let (id, bounds) = match control {
            Selected::Button(i) => (c.buttons[i].id(), c.buttons[i].bounds()),
            Selected::Dpad(i) => (crate::controls::OverlayDpad::UP, c.dpads[i].bounds()),
            Selected::Joystick(i) => (c.joysticks[i].id(), c.joysticks[i].bounds()),
        };
        ControlPlacement { id: id.raw(), x: bounds.left, y: bounds.top }
    }
}

fn clamp_dim(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
