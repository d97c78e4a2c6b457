use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::store::{DirectoryStore, FileEntry};
use crate::{Error, Result};

/// [`DirectoryStore`] over the real file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDirectoryStore;

impl DirectoryStore for FsDirectoryStore {
    fn list_files(&self, dir: &Path) -> Result<Vec<FileEntry>> {
        let read_dir = match fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::from_io(e, dir.display())),
        };

        let mut files = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| Error::from_io(e, dir.display()))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            files.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                full_path: entry.path(),
                directory: dir.to_path_buf(),
            });
        }
        Ok(files)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| Error::from_io(e, path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("autostart-fs-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = std::env::temp_dir().join("autostart-fs-does-not-exist");

        assert!(FsDirectoryStore.list_files(&dir).unwrap().is_empty());
    }

    #[test]
    fn lists_files_but_not_subdirectories() {
        // Arrange
        let dir = scratch_dir("list");
        fs::write(dir.join("Notes.lnk"), b"").unwrap();
        fs::create_dir(dir.join("nested")).unwrap();

        // Act
        let files = FsDirectoryStore.list_files(&dir).unwrap();

        // Assert
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "Notes.lnk");
        assert_eq!(files[0].full_path, dir.join("Notes.lnk"));
        assert_eq!(files[0].directory, dir);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = scratch_dir("delete");
        let file = dir.join("Old.lnk");
        fs::write(&file, b"").unwrap();

        FsDirectoryStore.delete_file(&file).unwrap();

        assert!(!FsDirectoryStore.file_exists(&file));
        fs::remove_dir_all(&dir).unwrap();
    }
}
