//! Default overlay layout
//!
//! Controls are square, sized from the shorter screen side and the user scale.
//! Default positions are given in thousandths of the screen size, with one
//! table for landscape and one for portrait.

use crate::buttons::ButtonId;
use crate::controls::{OverlayButton, OverlayDpad, OverlayJoystick};
use crate::touch::Rect;
use ct_core::config::{ControlToggles, OverlayConfig};

/// How a control reacts to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Button,
    Dpad,
    Joystick,
}

/// Static description of one overlay control
#[derive(Debug, Clone, Copy)]
pub struct ControlDef {
    /// Id the control reports and is saved under
    pub id: ButtonId,
    pub kind: ControlKind,
    /// Fraction of the shorter screen side at stock scale
    pub size: f32,
    pub landscape: (u16, u16),
    pub portrait: (u16, u16),
}

const fn control(
    id: ButtonId,
    kind: ControlKind,
    size: f32,
    landscape: (u16, u16),
    portrait: (u16, u16),
) -> ControlDef {
    ControlDef { id, kind, size, landscape, portrait }
}

const FACE: f32 = 0.11;
const SMALL: f32 = 0.08;
const SHOULDER: f32 = 0.18;
const DPAD: f32 = 0.22;
const STICK: f32 = 0.275;
// The c-stick is drawn at half the circle pad's size
const C_STICK: f32 = STICK / 2.0;

pub const CONTROLS: [ControlDef; 14] = [
    control(ButtonId::A, ControlKind::Button, FACE, (915, 560), (870, 760)),
    control(ButtonId::B, ControlKind::Button, FACE, (855, 680), (760, 830)),
    control(ButtonId::X, ControlKind::Button, FACE, (855, 440), (760, 690)),
    control(ButtonId::Y, ControlKind::Button, FACE, (795, 560), (650, 760)),
    control(ButtonId::TriggerL, ControlKind::Button, SHOULDER, (20, 20), (20, 520)),
    control(ButtonId::TriggerR, ControlKind::Button, SHOULDER, (880, 20), (800, 520)),
    control(ButtonId::Zl, ControlKind::Button, SHOULDER, (130, 20), (200, 520)),
    control(ButtonId::Zr, ControlKind::Button, SHOULDER, (770, 20), (620, 520)),
    control(ButtonId::Start, ControlKind::Button, SMALL, (560, 900), (560, 940)),
    control(ButtonId::Select, ControlKind::Button, SMALL, (390, 900), (330, 940)),
    control(ButtonId::Home, ControlKind::Button, SMALL, (475, 900), (445, 940)),
    control(ButtonId::DpadUp, ControlKind::Dpad, DPAD, (40, 560), (30, 780)),
    control(ButtonId::StickLeft, ControlKind::Joystick, STICK, (40, 260), (30, 600)),
    control(ButtonId::StickC, ControlKind::Joystick, C_STICK, (790, 260), (820, 600)),
];

/// Whether the user has this control switched on
pub fn is_enabled(toggles: &ControlToggles, id: ButtonId) -> bool {
    match id {
        ButtonId::A => toggles.a,
        ButtonId::B => toggles.b,
        ButtonId::X => toggles.x,
        ButtonId::Y => toggles.y,
        ButtonId::TriggerL => toggles.l,
        ButtonId::TriggerR => toggles.r,
        ButtonId::Zl => toggles.zl,
        ButtonId::Zr => toggles.zr,
        ButtonId::Start => toggles.start,
        ButtonId::Select => toggles.select,
        ButtonId::Home => toggles.home,
        ButtonId::DpadUp => toggles.dpad,
        ButtonId::StickLeft => toggles.circle_pad,
        ButtonId::StickC => toggles.c_stick,
        _ => false,
    }
}

/// Side length of a control in pixels
pub fn control_size(def: &ControlDef, screen: Rect, scale: u32) -> i32 {
    let factor = (scale.min(100) + 50) as f32 / 100.0;
    let short_side = screen.width().min(screen.height()).max(0) as f32;
    (short_side * def.size * factor) as i32
}

/// Bounds of a control at its default position
pub fn default_bounds(def: &ControlDef, screen: Rect, scale: u32) -> Rect {
    let size = control_size(def, screen, scale);
    let (px, py) = if screen.width() >= screen.height() {
        def.landscape
    } else {
        def.portrait
    };
    let x = (screen.width() as f32 * f32::from(px) / 1000.0) as i32;
    let y = (screen.height() as f32 * f32::from(py) / 1000.0) as i32;

    // Keep the whole control on screen
    Rect::from_origin(x, y, size, size).clamped_to(screen)
}

/// Enabled controls, placed from the saved layout or the defaults
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub buttons: Vec<OverlayButton>,
    pub dpads: Vec<OverlayDpad>,
    pub joysticks: Vec<OverlayJoystick>,
}

impl Controls {
    pub fn build(config: &OverlayConfig, screen: Rect) -> Self {
        let mut controls = Self::default();
        for def in CONTROLS.iter().filter(|s| is_enabled(&config.toggles, s.id)) {
            let mut bounds = default_bounds(def, screen, config.scale);
            if let Some(saved) = config.placement(def.id.raw()) {
                // Saved layouts come from an editable file and may predate a
                // screen size change
                bounds.move_to(saved.x, saved.y);
                bounds = bounds.clamped_to(screen);
            }
            match def.kind {
                ControlKind::Button => controls.buttons.push(OverlayButton::new(def.id, bounds)),
                ControlKind::Dpad => controls.dpads.push(OverlayDpad::new(bounds)),
                ControlKind::Joystick => {
                    controls.joysticks.push(OverlayJoystick::new(def.id, bounds))
                }
            }
        }
        tracing::debug!(
            "Overlay layout: {} buttons, {} d-pads, {} joysticks",
            controls.buttons.len(),
            controls.dpads.len(),
            controls.joysticks.len()
        );
        controls
    }

    pub fn len(&self) -> usize {
        self.buttons.len() + self.dpads.len() + self.joysticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
