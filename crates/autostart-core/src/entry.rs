use serde::Serialize;

use crate::command::{self, CommandLine};
use crate::group::{GroupDescriptor, GroupId};
use crate::source::RawEntry;
use crate::state::StartupState;

/// One program found in a startup group.
///
/// `state` holds whatever was last read from or written to the approved
/// list; it is not refreshed behind the caller's back. After a removal the
/// entry stays `NotFound` and rejects further state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// File name (folders) or value name (keys).
    pub name: String,
    /// The string exactly as found in the store.
    pub raw_command: String,
    pub executable_path: String,
    pub arguments: String,
    /// The folder or key the entry was read from.
    pub origin_path: String,
    pub group: GroupId,
    pub state: StartupState,
    pub requires_elevated_privileges: bool,
    pub is_shortcut: bool,
    /// Set when the raw command had an unterminated quote and was kept whole.
    pub malformed: bool,
    /// Set once the primary definition was deleted; no further writes apply.
    #[serde(skip)]
    pub(crate) removed: bool,
}

impl Entry {
    /// Builds an entry from a raw store record.
    ///
    /// Launcher files are resolved by the shell, so their path is kept as
    /// is. Key values are split into path and arguments; an unsplittable
    /// value is kept whole and flagged instead of failing.
    pub fn from_raw(raw: RawEntry, descriptor: &GroupDescriptor, state: StartupState) -> Self {
        let (line, malformed) = if descriptor.is_shortcut {
            (CommandLine::whole(&raw.raw_command), false)
        } else {
            match command::split(&raw.raw_command) {
                Ok(line) => (line, false),
                Err(e) => {
                    log::warn!("'{}' in {}: {e}", raw.name, descriptor.id);
                    (CommandLine::whole(&raw.raw_command), true)
                }
            }
        };

        Self {
            name: raw.name,
            raw_command: raw.raw_command,
            executable_path: line.path,
            arguments: line.arguments,
            origin_path: raw.origin_path,
            group: descriptor.id,
            state,
            requires_elevated_privileges: descriptor.requires_elevated_privileges,
            is_shortcut: descriptor.is_shortcut,
            malformed,
            removed: false,
        }
    }

    /// Returns true once the entry has been removed from its group.
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// The identifier the group's source removes this entry by.
    pub fn removal_identifier(&self) -> &str {
        if self.is_shortcut {
            &self.raw_command
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{Hive, KeyLocation, RegistryView};

    fn descriptor(id: GroupId, is_shortcut: bool) -> GroupDescriptor {
        GroupDescriptor {
            id,
            approved: KeyLocation::new(Hive::CurrentUser, RegistryView::Default, "Approved"),
            requires_elevated_privileges: false,
            is_shortcut,
        }
    }

    fn raw(name: &str, command: &str) -> RawEntry {
        RawEntry {
            name: name.into(),
            raw_command: command.into(),
            origin_path: "origin".into(),
        }
    }

    #[test]
    fn key_entry_is_split_into_path_and_arguments() {
        // Arrange
        let desc = descriptor(GroupId::Hkcu, false);

        // Act
        let entry = Entry::from_raw(
            raw("Sync", r#""C:\Program Files\Sync\sync.exe" --background"#),
            &desc,
            StartupState::Enabled,
        );

        // Assert
        assert_eq!(entry.executable_path, r"C:\Program Files\Sync\sync.exe");
        assert_eq!(entry.arguments, "--background");
        assert!(!entry.malformed);
        assert_eq!(entry.removal_identifier(), "Sync");
    }

    #[test]
    fn shortcut_entry_keeps_raw_path_without_arguments() {
        let desc = descriptor(GroupId::StartMenuUser, true);
        let launcher = r"C:\Users\ana\Startup\Notes -min.lnk";

        let entry = Entry::from_raw(raw("Notes -min.lnk", launcher), &desc, StartupState::NotFound);

        assert_eq!(entry.executable_path, launcher);
        assert_eq!(entry.arguments, "");
        assert_eq!(entry.removal_identifier(), launcher);
    }

    #[test]
    fn unterminated_quote_is_kept_whole_and_flagged() {
        let desc = descriptor(GroupId::Hklm64, false);

        let entry = Entry::from_raw(
            raw("Broken", r#""C:\Vendor\agent.exe -x"#),
            &desc,
            StartupState::Disabled,
        );

        assert!(entry.malformed);
        assert_eq!(entry.executable_path, r#""C:\Vendor\agent.exe -x"#);
        assert_eq!(entry.arguments, "");
    }
}
