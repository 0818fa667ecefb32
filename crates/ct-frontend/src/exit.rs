//! Why the native core ended emulation

use std::fmt;

/// Result code reported by the native loader when emulation exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitReason {
    Success = 0,
    NotInitialized = 1,
    GetLoader = 2,
    SystemMode = 3,
    Loader = 4,
    LoaderEncrypted = 5,
    LoaderInvalidFormat = 6,
    SystemFiles = 7,
    ShutdownRequested = 11,
    Unknown = 12,
}

impl ExitReason {
    /// Codes outside the known set map to `Unknown`
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::NotInitialized,
            2 => Self::GetLoader,
            3 => Self::SystemMode,
            4 => Self::Loader,
            5 => Self::LoaderEncrypted,
            6 => Self::LoaderInvalidFormat,
            7 => Self::SystemFiles,
            11 => Self::ShutdownRequested,
            _ => Self::Unknown,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Self::Success | Self::ShutdownRequested)
    }

    /// Dialog title; loader failures are blamed on an encrypted or badly dumped game
    pub fn caption(self) -> &'static str {
        match self {
            Self::Success | Self::ShutdownRequested => "Emulation ended",
            Self::LoaderEncrypted => "Your ROM is Encrypted",
            _ => "Invalid ROM format",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}
