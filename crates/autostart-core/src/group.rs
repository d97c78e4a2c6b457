use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::source::{self, GroupSource};
use crate::state::StartupState;
use crate::store::{KeyStore, Stores};
use crate::{Error, RemovalHalf, Result};

/// One of the five fixed autostart locations.
///
/// Declaration order is the order groups are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupId {
    /// The current user's Startup folder.
    StartMenuUser,
    /// The all-users Startup folder. Requires elevation to modify.
    StartMenuCommon,
    /// `HKEY_CURRENT_USER` Run key.
    Hkcu,
    /// `HKEY_LOCAL_MACHINE` Run key of the 32-bit (WOW6432Node) view.
    /// Requires elevation to modify.
    Hklm32,
    /// `HKEY_LOCAL_MACHINE` Run key. Requires elevation to modify.
    Hklm64,
}

impl GroupId {
    pub const ALL: [GroupId; 5] = [
        GroupId::StartMenuUser,
        GroupId::StartMenuCommon,
        GroupId::Hkcu,
        GroupId::Hklm32,
        GroupId::Hklm64,
    ];

    /// Stable kebab-case name used on the command line and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartMenuUser => "start-menu-user",
            Self::StartMenuCommon => "start-menu-common",
            Self::Hkcu => "hkcu",
            Self::Hklm32 => "hklm32",
            Self::Hklm64 => "hklm64",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        GroupId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownGroup { name: s.into() })
    }
}

/// Registry root a key lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Hive {
    CurrentUser,
    LocalMachine,
}

impl fmt::Display for Hive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentUser => f.write_str("HKEY_CURRENT_USER"),
            Self::LocalMachine => f.write_str("HKEY_LOCAL_MACHINE"),
        }
    }
}

/// Which registry view (32- or 64-bit redirection) to open a key through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RegistryView {
    /// Whatever the calling process would get.
    Default,
    Registry32,
    Registry64,
}

/// Address of a key in the hierarchical store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct KeyLocation {
    pub hive: Hive,
    pub view: RegistryView,
    pub path: String,
}

impl KeyLocation {
    pub fn new(hive: Hive, view: RegistryView, path: impl Into<String>) -> Self {
        Self {
            hive,
            view,
            path: path.into(),
        }
    }
}

impl fmt::Display for KeyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r"{}\{}", self.hive, self.path)
    }
}

/// Static configuration shared by every entry of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDescriptor {
    pub id: GroupId,
    /// Where the group's enable/disable flags live.
    pub approved: KeyLocation,
    /// Whether changing the group needs administrator rights.
    pub requires_elevated_privileges: bool,
    /// Whether entries are launcher files in a folder rather than key values.
    pub is_shortcut: bool,
}

/// A catalog slot: descriptor plus the source that enumerates it.
#[derive(Debug, Clone)]
pub struct Group {
    pub descriptor: GroupDescriptor,
    pub source: GroupSource,
}

impl Group {
    pub fn id(&self) -> GroupId {
        self.descriptor.id
    }

    /// Human-readable primary location (folder path or key path).
    pub fn location(&self) -> String {
        match &self.source {
            GroupSource::Folder(folder) => folder.dir.display().to_string(),
            GroupSource::Key(key) => key.location.to_string(),
        }
    }

    /// Reads the approved-list state for `name`.
    pub fn state(&self, keys: &dyn KeyStore, name: &str) -> Result<StartupState> {
        source::read_state(keys, &self.descriptor.approved, name)
    }

    /// Rewrites the approved-list flag for `name`.
    pub fn set_state(&self, keys: &dyn KeyStore, name: &str, state: StartupState) -> Result<()> {
        source::write_state(keys, &self.descriptor.approved, name, state)?;
        log::info!("Set '{name}' in {} to {state}", self.id());
        Ok(())
    }

    /// Removes an entry from its primary location and its approved list.
    ///
    /// Key-backed groups attempt both deletions regardless of each other.
    /// Folder-backed groups only clear the flag once the launcher is gone.
    pub fn remove_raw_entry(&self, stores: Stores<'_>, name: &str, identifier: &str) -> Removal {
        let primary = self.source.remove_primary(stores, identifier);
        let approved = match (&self.source, &primary) {
            (GroupSource::Folder(_), Err(_)) => None,
            _ => Some(source::write_state(
                stores.keys,
                &self.descriptor.approved,
                name,
                StartupState::NotFound,
            )),
        };
        Removal { primary, approved }
    }
}

/// Outcome of the two halves of a removal.
#[derive(Debug)]
pub struct Removal {
    pub primary: Result<()>,
    /// `None` when the flag was left alone because the primary half failed.
    pub approved: Option<Result<()>>,
}

impl Removal {
    /// Returns true if the entry's primary definition is gone.
    pub fn primary_removed(&self) -> bool {
        self.primary.is_ok()
    }

    /// Folds both halves into one result.
    ///
    /// If only one of two attempted halves failed the error is
    /// [`Error::PartialRemoval`] naming it. Otherwise the primary error is
    /// returned as is.
    pub fn into_result(self) -> Result<()> {
        match (self.primary, self.approved) {
            (Ok(()), None | Some(Ok(()))) => Ok(()),
            (Ok(()), Some(Err(e))) => Err(Error::PartialRemoval {
                failed: RemovalHalf::Approved,
                source: Box::new(e),
            }),
            (Err(e), Some(Ok(()))) => Err(Error::PartialRemoval {
                failed: RemovalHalf::Primary,
                source: Box::new(e),
            }),
            (Err(e), None | Some(Err(_))) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_ids_parse_case_insensitively() {
        assert_eq!("HKCU".parse::<GroupId>().unwrap(), GroupId::Hkcu);
        assert_eq!(
            "start-menu-common".parse::<GroupId>().unwrap(),
            GroupId::StartMenuCommon
        );
    }

    #[test]
    fn unknown_group_is_rejected() {
        let err = "hkcr".parse::<GroupId>().unwrap_err();

        assert_eq!(err.to_string(), "unknown group 'hkcr'");
    }

    #[test]
    fn all_lists_groups_in_declaration_order() {
        for (i, id) in GroupId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn key_location_displays_with_hive_prefix() {
        let loc = KeyLocation::new(
            Hive::LocalMachine,
            RegistryView::Registry64,
            r"Software\Microsoft\Windows\CurrentVersion\Run",
        );

        assert_eq!(
            loc.to_string(),
            r"HKEY_LOCAL_MACHINE\Software\Microsoft\Windows\CurrentVersion\Run"
        );
    }

    fn denied(location: &str) -> Error {
        Error::AccessDenied {
            location: location.into(),
        }
    }

    #[test]
    fn skipped_approved_half_returns_primary_error() {
        let removal = Removal {
            primary: Err(denied("Agent.lnk")),
            approved: None,
        };

        assert!(matches!(removal.into_result(), Err(Error::AccessDenied { .. })));
    }

    #[test]
    fn one_failed_half_of_two_is_partial() {
        let removal = Removal {
            primary: Err(denied("Run")),
            approved: Some(Ok(())),
        };

        assert!(matches!(
            removal.into_result(),
            Err(Error::PartialRemoval {
                failed: RemovalHalf::Primary,
                ..
            })
        ));
    }
}
