//! Windows backends for the autostart stores.
#![cfg(windows)]

/// Known-folder lookup for the Startup folders.
pub mod folders;

/// Process token elevation check.
pub mod elevation;

/// Registry-backed `KeyStore`.
pub mod registry;

/// `.lnk` creation through the shell link COM object.
pub mod shortcut;

mod wide;

pub use elevation::is_elevated;
pub use folders::startup_folders;
pub use registry::RegistryStore;
pub use shortcut::ShellLinkFactory;
