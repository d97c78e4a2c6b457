//! Where a group's entries come from and how they are added or removed.
//!
//! Folder-backed groups hold one launcher file per entry; key-backed groups
//! hold one string value per entry. Both keep their enable/disable flags in
//! a separate approved list, handled by [`ApprovedList`].

use std::path::{Path, PathBuf};

use crate::group::KeyLocation;
use crate::state::{self, StartupState};
use crate::store::{KeyHandle, KeyStore, Stores, Value};
use crate::Result;

/// File the shell keeps in every special folder. Never a startup entry.
const DESKTOP_INI: &str = "desktop.ini";

const LAUNCHER_EXTENSION: &str = "lnk";

/// An entry as found in its backing store, before state and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub name: String,
    /// Launcher file path (folders) or full value string (keys).
    pub raw_command: String,
    pub origin_path: String,
}

/// A startup folder containing launcher files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSource {
    pub dir: PathBuf,
}

/// A registry key whose string values are launch commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySource {
    pub location: KeyLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSource {
    Folder(FolderSource),
    Key(KeySource),
}

impl GroupSource {
    /// Enumerates the raw entries of this source in store order.
    pub fn list_raw_entries(&self, stores: Stores<'_>) -> Result<Vec<RawEntry>> {
        match self {
            Self::Folder(folder) => folder.list(stores),
            Self::Key(key) => key.list(stores.keys),
        }
    }

    /// Adds an entry called `name` that launches `target`.
    pub fn add_raw_entry(&self, stores: Stores<'_>, name: &str, target: &str) -> Result<()> {
        match self {
            Self::Folder(folder) => folder.add(stores, name, target),
            Self::Key(key) => key.add(stores.keys, name, target),
        }
    }

    /// Deletes the entry's primary definition only.
    ///
    /// `identifier` is the launcher path for folders and the value name
    /// for keys.
    pub fn remove_primary(&self, stores: Stores<'_>, identifier: &str) -> Result<()> {
        match self {
            Self::Folder(folder) => folder.remove(stores, identifier),
            Self::Key(key) => {
                delete_if_present(stores.keys, &key.location, identifier).map(|_| ())
            }
        }
    }
}

impl FolderSource {
    fn list(&self, stores: Stores<'_>) -> Result<Vec<RawEntry>> {
        let files = stores.files.list_files(&self.dir)?;
        Ok(files
            .into_iter()
            .filter(|file| file.name != DESKTOP_INI)
            .map(|file| RawEntry {
                name: file.name,
                raw_command: file.full_path.display().to_string(),
                origin_path: file.directory.display().to_string(),
            })
            .collect())
    }

    /// Returns `<dir>/<name>.lnk`, keeping an extension the caller already gave.
    pub fn launcher_path(&self, name: &str) -> PathBuf {
        let has_extension = Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(LAUNCHER_EXTENSION));
        if has_extension {
            self.dir.join(name)
        } else {
            self.dir.join(format!("{name}.{LAUNCHER_EXTENSION}"))
        }
    }

    fn add(&self, stores: Stores<'_>, name: &str, target: &str) -> Result<()> {
        let at = self.launcher_path(name);
        stores.launchers.create_launcher(&at, Path::new(target))?;
        log::info!("Created launcher {} -> {target}", at.display());
        Ok(())
    }

    fn remove(&self, stores: Stores<'_>, launcher: &str) -> Result<()> {
        let path = Path::new(launcher);
        if !stores.files.file_exists(path) {
            log::debug!("Launcher {launcher} already gone");
            return Ok(());
        }
        stores.files.delete_file(path)?;
        log::info!("Deleted launcher {launcher}");
        Ok(())
    }
}

impl KeySource {
    fn list(&self, keys: &dyn KeyStore) -> Result<Vec<RawEntry>> {
        let Some(key) = keys.open_readable(&self.location)? else {
            log::debug!("{} does not exist", self.location);
            return Ok(Vec::new());
        };
        let origin = self.location.to_string();

        let mut entries = Vec::new();
        for name in key.value_names()? {
            match key.value(&name) {
                Ok(Some(Value::String(command))) => entries.push(RawEntry {
                    name,
                    raw_command: command,
                    origin_path: origin.clone(),
                }),
                Ok(Some(Value::Binary(_))) => {
                    log::warn!("Skipping non-string value '{name}' in {origin}");
                }
                // Deleted between listing and reading.
                Ok(None) => {}
                Err(e) => log::warn!("Skipping unreadable value '{name}' in {origin}: {e}"),
            }
        }
        Ok(entries)
    }

    fn add(&self, keys: &dyn KeyStore, name: &str, target: &str) -> Result<()> {
        let key = keys.open_writable(&self.location)?;
        key.set_value(name, &Value::String(target.to_string()))?;
        log::info!("Wrote '{name}' = {target} to {}", self.location);
        Ok(())
    }
}

/// A group's approved list, opened once for a batch of reads.
pub struct ApprovedList<'a> {
    key: Option<Box<dyn KeyHandle + 'a>>,
}

impl<'a> ApprovedList<'a> {
    pub fn open(keys: &'a dyn KeyStore, location: &KeyLocation) -> Result<Self> {
        Ok(Self {
            key: keys.open_readable(location)?,
        })
    }

    /// Reads the state for `name`; a missing list or value is `NotFound`.
    pub fn state(&self, name: &str) -> Result<StartupState> {
        let Some(key) = &self.key else {
            return Ok(StartupState::NotFound);
        };
        Ok(match key.value(name)? {
            None => StartupState::NotFound,
            Some(value) => state::decode(Some(value.as_bytes().unwrap_or_default())),
        })
    }
}

/// Reads the state for a single name.
pub fn read_state(keys: &dyn KeyStore, approved: &KeyLocation, name: &str) -> Result<StartupState> {
    ApprovedList::open(keys, approved)?.state(name)
}

/// Replaces the flag for `name`: delete first, then write if the state has bytes.
///
/// Writing `NotFound` to a list that doesn't exist is a no-op.
pub fn write_state(
    keys: &dyn KeyStore,
    approved: &KeyLocation,
    name: &str,
    state: StartupState,
) -> Result<()> {
    let Some(flag) = state::encode(state) else {
        delete_if_present(keys, approved, name)?;
        return Ok(());
    };
    let key = keys.open_writable(approved)?;
    key.delete_value(name)?;
    key.set_value(name, &Value::Binary(flag.to_vec()))?;
    Ok(())
}

/// Deletes `name` from `location`, skipping the write open when the key is absent.
fn delete_if_present(keys: &dyn KeyStore, location: &KeyLocation, name: &str) -> Result<bool> {
    if keys.open_readable(location)?.is_none() {
        return Ok(false);
    }
    let deleted = keys.open_writable(location)?.delete_value(name)?;
    if deleted {
        log::info!("Deleted '{name}' from {location}");
    }
    Ok(deleted)
}
