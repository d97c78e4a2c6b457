//! In-process stores for tests and dry runs.
//!
//! Both keep insertion order as their natural enumeration order and can be
//! told to reject access to a location, which surfaces as
//! [`Error::AccessDenied`] the way a non-elevated process would see it.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::group::KeyLocation;
use crate::store::{DirectoryStore, FileEntry, KeyHandle, KeyStore, LauncherFactory, Value};
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    keys: RefCell<HashMap<KeyLocation, Vec<(String, Value)>>>,
    read_only: RefCell<HashSet<KeyLocation>>,
    unreadable: RefCell<HashSet<KeyLocation>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`, creating the key if needed.
    pub fn insert(&self, location: &KeyLocation, name: &str, value: Value) {
        let mut keys = self.keys.borrow_mut();
        let values = keys.entry(location.clone()).or_default();
        match values.iter().position(|(n, _)| n == name) {
            Some(pos) => values[pos].1 = value,
            None => values.push((name.to_string(), value)),
        }
    }

    /// Makes every later write to `location` fail with access denied.
    pub fn deny_writes(&self, location: &KeyLocation) {
        self.read_only.borrow_mut().insert(location.clone());
    }

    /// Makes every later open of `location` fail with access denied.
    pub fn deny_reads(&self, location: &KeyLocation) {
        self.unreadable.borrow_mut().insert(location.clone());
    }

    /// Snapshot of a key's values, or `None` if the key doesn't exist.
    pub fn values(&self, location: &KeyLocation) -> Option<Vec<(String, Value)>> {
        self.keys.borrow().get(location).cloned()
    }

    pub fn get(&self, location: &KeyLocation, name: &str) -> Option<Value> {
        self.keys
            .borrow()
            .get(location)?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn check_writable(&self, location: &KeyLocation) -> Result<()> {
        if self.read_only.borrow().contains(location) {
            return Err(Error::AccessDenied {
                location: location.to_string(),
            });
        }
        Ok(())
    }
}

impl KeyStore for MemoryKeyStore {
    fn open_readable(&self, location: &KeyLocation) -> Result<Option<Box<dyn KeyHandle + '_>>> {
        if self.unreadable.borrow().contains(location) {
            return Err(Error::AccessDenied {
                location: location.to_string(),
            });
        }
        if !self.keys.borrow().contains_key(location) {
            return Ok(None);
        }
        Ok(Some(Box::new(MemoryKey {
            store: self,
            location: location.clone(),
            writable: false,
        })))
    }

    fn open_writable(&self, location: &KeyLocation) -> Result<Box<dyn KeyHandle + '_>> {
        self.check_writable(location)?;
        self.keys.borrow_mut().entry(location.clone()).or_default();
        Ok(Box::new(MemoryKey {
            store: self,
            location: location.clone(),
            writable: true,
        }))
    }
}

struct MemoryKey<'a> {
    store: &'a MemoryKeyStore,
    location: KeyLocation,
    writable: bool,
}

impl MemoryKey<'_> {
    fn ensure_writable(&self) -> Result<()> {
        if !self.writable {
            return Err(Error::Store {
                location: self.location.to_string(),
                message: "key was opened read-only".into(),
            });
        }
        self.store.check_writable(&self.location)
    }
}

impl KeyHandle for MemoryKey<'_> {
    fn value_names(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .values(&self.location)
            .unwrap_or_default()
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    fn value(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.store.get(&self.location, name))
    }

    fn set_value(&self, name: &str, value: &Value) -> Result<()> {
        self.ensure_writable()?;
        self.store.insert(&self.location, name, value.clone());
        Ok(())
    }

    fn delete_value(&self, name: &str) -> Result<bool> {
        self.ensure_writable()?;
        let mut keys = self.store.keys.borrow_mut();
        let Some(values) = keys.get_mut(&self.location) else {
            return Ok(false);
        };
        let before = values.len();
        values.retain(|(n, _)| n != name);
        Ok(values.len() != before)
    }
}

/// Directory store and launcher factory backed by a list of file paths.
#[derive(Debug, Default)]
pub struct MemoryDirectoryStore {
    files: RefCell<Vec<PathBuf>>,
    targets: RefCell<HashMap<PathBuf, PathBuf>>,
    read_only: RefCell<HashSet<PathBuf>>,
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain file at `path`.
    pub fn add_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut files = self.files.borrow_mut();
        if !files.contains(&path) {
            files.push(path);
        }
    }

    /// Makes deletions and launcher creation inside `dir` fail with access denied.
    pub fn deny_writes(&self, dir: impl Into<PathBuf>) {
        self.read_only.borrow_mut().insert(dir.into());
    }

    /// Returns the target a launcher created at `path` points at.
    pub fn launcher_target(&self, path: &Path) -> Option<PathBuf> {
        self.targets.borrow().get(path).cloned()
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        let denied = path
            .parent()
            .is_some_and(|dir| self.read_only.borrow().contains(dir));
        if denied {
            return Err(Error::AccessDenied {
                location: path.display().to_string(),
            });
        }
        Ok(())
    }
}

impl DirectoryStore for MemoryDirectoryStore {
    fn list_files(&self, dir: &Path) -> Result<Vec<FileEntry>> {
        Ok(self
            .files
            .borrow()
            .iter()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| {
                Some(FileEntry {
                    name: path.file_name()?.to_string_lossy().into_owned(),
                    full_path: path.clone(),
                    directory: dir.to_path_buf(),
                })
            })
            .collect())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.borrow().iter().any(|p| p == path)
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        self.check_writable(path)?;
        let mut files = self.files.borrow_mut();
        let Some(pos) = files.iter().position(|p| p == path) else {
            return Err(Error::NotFound {
                what: path.display().to_string(),
            });
        };
        files.remove(pos);
        self.targets.borrow_mut().remove(path);
        Ok(())
    }
}

impl LauncherFactory for MemoryDirectoryStore {
    fn create_launcher(&self, at: &Path, target: &Path) -> Result<()> {
        self.check_writable(at)?;
        self.add_file(at);
        self.targets
            .borrow_mut()
            .insert(at.to_path_buf(), target.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{Hive, RegistryView};

    fn run_key() -> KeyLocation {
        KeyLocation::new(Hive::CurrentUser, RegistryView::Default, "Run")
    }

    #[test]
    fn missing_key_opens_as_none() {
        let store = MemoryKeyStore::new();

        assert!(store.open_readable(&run_key()).unwrap().is_none());
    }

    #[test]
    fn values_keep_insertion_order() {
        // Arrange
        let store = MemoryKeyStore::new();
        store.insert(&run_key(), "b", Value::String("b.exe".into()));
        store.insert(&run_key(), "a", Value::String("a.exe".into()));

        // Act
        let key = store.open_readable(&run_key()).unwrap().unwrap();

        // Assert
        assert_eq!(key.value_names().unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn delete_reports_whether_value_existed() {
        let store = MemoryKeyStore::new();
        store.insert(&run_key(), "a", Value::String("a.exe".into()));
        let key = store.open_writable(&run_key()).unwrap();

        assert!(key.delete_value("a").unwrap());
        assert!(!key.delete_value("a").unwrap());
    }

    #[test]
    fn denied_key_rejects_writes() {
        let store = MemoryKeyStore::new();
        store.deny_writes(&run_key());

        let result = store.open_writable(&run_key());

        assert!(matches!(result, Err(Error::AccessDenied { .. })));
    }

    #[test]
    fn launcher_lands_in_its_directory_listing() {
        // Arrange
        let dirs = MemoryDirectoryStore::new();
        let dir = Path::new("/startup");
        let at = dir.join("Notes.lnk");

        // Act
        dirs.create_launcher(&at, Path::new("/apps/notes.exe")).unwrap();

        // Assert
        let listed = dirs.list_files(dir).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Notes.lnk");
        assert_eq!(dirs.launcher_target(&at), Some(PathBuf::from("/apps/notes.exe")));
    }
}
