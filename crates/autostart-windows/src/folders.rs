use std::path::PathBuf;

use autostart_core::{Error, Result, StartupFolders};
use windows::Win32::System::Com::CoTaskMemFree;
use windows::Win32::UI::Shell::{
    FOLDERID_CommonStartup, FOLDERID_Startup, KF_FLAG_DEFAULT, SHGetKnownFolderPath,
};
use windows::core::GUID;

/// Resolves the current user's and the all-users Startup folders.
pub fn startup_folders() -> Result<StartupFolders> {
    Ok(StartupFolders {
        user: known_folder(&FOLDERID_Startup, "Startup")?,
        common: known_folder(&FOLDERID_CommonStartup, "CommonStartup")?,
    })
}

fn known_folder(id: &GUID, label: &str) -> Result<PathBuf> {
    // SAFETY: SHGetKnownFolderPath allocates the returned string with the
    // COM allocator; it is copied and then freed exactly once.
    unsafe {
        let raw = SHGetKnownFolderPath(id, KF_FLAG_DEFAULT, None).map_err(|e| Error::Store {
            location: format!("known folder {label}"),
            message: e.message(),
        })?;
        let path = raw.to_string();
        CoTaskMemFree(Some(raw.0 as *const _));
        path.map(PathBuf::from).map_err(|e| Error::Store {
            location: format!("known folder {label}"),
            message: e.to_string(),
        })
    }
}
