//! Storage collaborators the core reads and writes through.
//!
//! Each platform crate (e.g. `autostart-windows`) provides its own
//! implementation. [`crate::memory`] has in-process fakes and
//! [`crate::fs`] a portable directory store.

use std::path::{Path, PathBuf};

use crate::Result;
use crate::group::KeyLocation;

/// A value stored under a configuration key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Binary(Vec<u8>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::String(_) => None,
            Self::Binary(b) => Some(b),
        }
    }
}

/// Hierarchical key-value store (the registry on Windows).
pub trait KeyStore {
    /// Opens a key for reading. Returns `Ok(None)` if it doesn't exist.
    fn open_readable(&self, location: &KeyLocation) -> Result<Option<Box<dyn KeyHandle + '_>>>;

    /// Opens a key for writing, creating it if needed.
    fn open_writable(&self, location: &KeyLocation) -> Result<Box<dyn KeyHandle + '_>>;
}

/// An open key. The underlying handle is released when this is dropped.
pub trait KeyHandle {
    /// Lists value names in the store's natural order.
    fn value_names(&self) -> Result<Vec<String>>;

    /// Reads a value. Returns `Ok(None)` if it doesn't exist.
    fn value(&self, name: &str) -> Result<Option<Value>>;

    fn set_value(&self, name: &str, value: &Value) -> Result<()>;

    /// Deletes a value. Returns `Ok(false)` if it didn't exist.
    fn delete_value(&self, name: &str) -> Result<bool>;
}

/// A file found in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name without the directory.
    pub name: String,
    pub full_path: PathBuf,
    pub directory: PathBuf,
}

/// File-system view of the startup folders.
pub trait DirectoryStore {
    /// Lists the files (not sub-directories) of `dir` in natural order.
    ///
    /// A missing directory yields an empty list.
    fn list_files(&self, dir: &Path) -> Result<Vec<FileEntry>>;

    fn file_exists(&self, path: &Path) -> bool;

    fn delete_file(&self, path: &Path) -> Result<()>;
}

/// Creates the OS artifact that launches `target` when its folder is
/// processed at logon (a `.lnk` shortcut on Windows).
pub trait LauncherFactory {
    fn create_launcher(&self, at: &Path, target: &Path) -> Result<()>;
}

/// The three collaborators an operation may touch, borrowed together.
#[derive(Clone, Copy)]
pub struct Stores<'a> {
    pub keys: &'a dyn KeyStore,
    pub files: &'a dyn DirectoryStore,
    pub launchers: &'a dyn LauncherFactory,
}
