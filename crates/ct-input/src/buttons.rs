//! Button identifiers shared with the native input layer
//!
//! The numeric values are part of the native contract and must not change.

use ct_core::error::InputError;

/// Device name the overlay reports its events under
pub const TOUCHSCREEN_DEVICE: &str = "Touchscreen";

/// Buttons and axes understood by the native input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ButtonId {
    A = 700,
    B = 701,
    X = 702,
    Y = 703,
    Start = 704,
    Select = 705,
    Home = 706,
    Zl = 707,
    Zr = 708,
    DpadUp = 709,
    DpadDown = 710,
    DpadLeft = 711,
    DpadRight = 712,
    StickLeft = 713,
    StickLeftUp = 714,
    StickLeftDown = 715,
    StickLeftLeft = 716,
    StickLeftRight = 717,
    StickC = 718,
    StickCUp = 719,
    StickCDown = 720,
    StickCLeft = 771,
    StickCRight = 772,
    TriggerL = 773,
    TriggerR = 774,
    Dpad = 780,
    Debug = 781,
    Gpio14 = 782,
}

impl ButtonId {
    pub const ALL: [ButtonId; 28] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::Start,
        Self::Select,
        Self::Home,
        Self::Zl,
        Self::Zr,
        Self::DpadUp,
        Self::DpadDown,
        Self::DpadLeft,
        Self::DpadRight,
        Self::StickLeft,
        Self::StickLeftUp,
        Self::StickLeftDown,
        Self::StickLeftLeft,
        Self::StickLeftRight,
        Self::StickC,
        Self::StickCUp,
        Self::StickCDown,
        Self::StickCLeft,
        Self::StickCRight,
        Self::TriggerL,
        Self::TriggerR,
        Self::Dpad,
        Self::Debug,
        Self::Gpio14,
    ];

    /// Raw code passed across the native boundary
    pub fn raw(self) -> i32 {
        self as i32
    }

    /// Whether this id names an analog stick rather than a button
    pub fn is_stick(self) -> bool {
        matches!(self, Self::StickLeft | Self::StickC)
    }
}

impl TryFrom<i32> for ButtonId {
    type Error = InputError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|id| id.raw() == raw)
            .ok_or(InputError::UnknownButton(raw))
    }
}

/// Button state as reported to the native input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ButtonState {
    #[default]
    Released = 0,
    Pressed = 1,
}

impl ButtonState {
    pub fn raw(self) -> i32 {
        self as i32
    }

    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            Self::Pressed
        } else {
            Self::Released
        }
    }
}
