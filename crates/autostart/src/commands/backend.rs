//! Wires the core [`Explorer`] to the platform stores.
//!
//! On Windows the catalog is built from the known Startup folders (with any
//! `[folders]` overrides from the config applied) and the explorer runs
//! against the live registry and file system. Other platforms have nothing
//! to inspect, so every command that needs the explorer exits with an error.

use autostart_core::config::Config;
use autostart_core::{Entry, Error, Explorer, GroupId};

/// Builds the explorer and hands it to `f`.
#[cfg(windows)]
pub fn with_explorer<T>(config: &Config, f: impl FnOnce(&Explorer<'_>) -> T) -> T {
    use autostart_core::Catalog;
    use autostart_core::fs::FsDirectoryStore;
    use autostart_windows::{RegistryStore, ShellLinkFactory};

    let folders = match autostart_windows::startup_folders() {
        Ok(detected) => config.folders.apply(detected),
        Err(e) => fail(&e),
    };
    let catalog = Catalog::new(folders);
    let explorer = Explorer::new(&catalog, &RegistryStore, &FsDirectoryStore, &ShellLinkFactory);
    f(&explorer)
}

#[cfg(not(windows))]
pub fn with_explorer<T>(_config: &Config, _f: impl FnOnce(&Explorer<'_>) -> T) -> T {
    eprintln!("Error: autostart only supports Windows");
    std::process::exit(1);
}

/// Looks up an entry, exiting if it doesn't exist.
pub fn find_entry(explorer: &Explorer<'_>, group: GroupId, name: &str) -> Entry {
    match explorer.find(group, name) {
        Ok(Some(entry)) => entry,
        Ok(None) => fail(&Error::NotFound {
            what: format!("'{name}' in {group}"),
        }),
        Err(e) => fail(&e),
    }
}

/// Prints `e` to stderr and exits with status 1.
pub fn fail(e: &Error) -> ! {
    eprintln!("Error: {e}");
    if e.is_access_denied() && !is_elevated() {
        eprintln!("Hint: this group needs an elevated (Run as administrator) prompt.");
    }
    std::process::exit(1);
}

/// Whether this process runs as administrator.
#[cfg(windows)]
pub fn is_elevated() -> bool {
    autostart_windows::is_elevated()
}

#[cfg(not(windows))]
pub fn is_elevated() -> bool {
    false
}
