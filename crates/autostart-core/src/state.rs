//! The enable/disable flag stored in the `StartupApproved` lists.
//!
//! Each approved list holds one 12-byte binary value per entry name. Only
//! the exact [`ENABLED_FLAG`] pattern means "run at logon"; every other
//! value, including vendor-specific ones, is read as disabled. A missing
//! value means the entry has never been toggled, which Windows treats as
//! enabled.

use std::fmt;

use serde::Serialize;

/// Width of an approved-list flag value.
pub const FLAG_LEN: usize = 12;

/// Flag bytes written when an entry is enabled.
pub const ENABLED_FLAG: [u8; FLAG_LEN] = [0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// Flag bytes written when an entry is disabled.
pub const DISABLED_FLAG: [u8; FLAG_LEN] = [0x03, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// Whether an entry will run at logon, as recorded in its approved list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartupState {
    /// No flag exists for the entry.
    NotFound,
    /// A flag exists and is anything but the enabled pattern.
    Disabled,
    /// The flag equals [`ENABLED_FLAG`].
    Enabled,
}

impl StartupState {
    /// Returns true if Windows will launch the entry at logon.
    ///
    /// Entries without a flag run by default.
    pub fn will_run(self) -> bool {
        matches!(self, Self::Enabled | Self::NotFound)
    }
}

impl From<bool> for StartupState {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

impl fmt::Display for StartupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("not-found"),
            Self::Disabled => f.write_str("disabled"),
            Self::Enabled => f.write_str("enabled"),
        }
    }
}

/// Decodes the raw approved-list value for an entry, if one exists.
pub fn decode(raw: Option<&[u8]>) -> StartupState {
    match raw {
        None => StartupState::NotFound,
        Some(bytes) if bytes == ENABLED_FLAG => StartupState::Enabled,
        Some(_) => StartupState::Disabled,
    }
}

/// Encodes a state for writing.
///
/// `None` means the value must be deleted rather than written.
pub fn encode(state: StartupState) -> Option<[u8; FLAG_LEN]> {
    match state {
        StartupState::NotFound => None,
        StartupState::Disabled => Some(DISABLED_FLAG),
        StartupState::Enabled => Some(ENABLED_FLAG),
    }
}
