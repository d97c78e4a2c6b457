//! The five startup groups and where each one lives.
//!
//! Built once from the detected Startup folder paths and passed by
//! reference afterwards. Nothing in it changes after construction.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::group::{Group, GroupDescriptor, GroupId, Hive, KeyLocation, RegistryView};
use crate::source::{FolderSource, GroupSource, KeySource};

pub const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";
pub const RUN32_KEY: &str = r"Software\WOW6432Node\Microsoft\Windows\CurrentVersion\Run";
pub const APPROVED_RUN_KEY: &str =
    r"Software\Microsoft\Windows\CurrentVersion\Explorer\StartupApproved\Run";
pub const APPROVED_RUN32_KEY: &str =
    r"Software\Microsoft\Windows\CurrentVersion\Explorer\StartupApproved\Run32";
pub const APPROVED_FOLDER_KEY: &str =
    r"Software\Microsoft\Windows\CurrentVersion\Explorer\StartupApproved\StartupFolder";

/// Paths of the per-user and all-users Startup folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupFolders {
    pub user: PathBuf,
    pub common: PathBuf,
}

/// Read-only registry of the five groups, indexed by [`GroupId`].
#[derive(Debug, Clone)]
pub struct Catalog {
    groups: [Group; 5],
}

impl Catalog {
    pub fn new(folders: StartupFolders) -> Self {
        let hkcu = |path: &str| KeyLocation::new(Hive::CurrentUser, RegistryView::Default, path);
        let hklm = |path: &str| KeyLocation::new(Hive::LocalMachine, RegistryView::Registry64, path);

        Self {
            groups: [
                folder_group(
                    GroupId::StartMenuUser,
                    folders.user,
                    hkcu(APPROVED_FOLDER_KEY),
                    false,
                ),
                folder_group(
                    GroupId::StartMenuCommon,
                    folders.common,
                    hklm(APPROVED_FOLDER_KEY),
                    true,
                ),
                key_group(GroupId::Hkcu, hkcu(RUN_KEY), hkcu(APPROVED_RUN_KEY), false),
                key_group(GroupId::Hklm32, hklm(RUN32_KEY), hklm(APPROVED_RUN32_KEY), true),
                key_group(GroupId::Hklm64, hklm(RUN_KEY), hklm(APPROVED_RUN_KEY), true),
            ],
        }
    }

    pub fn get(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }

    /// Iterates the groups in [`GroupId::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }
}

fn folder_group(id: GroupId, dir: PathBuf, approved: KeyLocation, elevated: bool) -> Group {
    Group {
        descriptor: GroupDescriptor {
            id,
            approved,
            requires_elevated_privileges: elevated,
            is_shortcut: true,
        },
        source: GroupSource::Folder(FolderSource { dir }),
    }
}

fn key_group(id: GroupId, location: KeyLocation, approved: KeyLocation, elevated: bool) -> Group {
    Group {
        descriptor: GroupDescriptor {
            id,
            approved,
            requires_elevated_privileges: elevated,
            is_shortcut: false,
        },
        source: GroupSource::Key(KeySource { location }),
    }
}
