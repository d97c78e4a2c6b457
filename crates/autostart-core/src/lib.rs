pub mod catalog;
pub mod command;
pub mod config;
pub mod entry;
pub mod error;
pub mod explorer;
pub mod fs;
pub mod group;
pub mod log;
pub mod memory;
pub mod source;
pub mod state;
pub mod store;

pub use catalog::{Catalog, StartupFolders};
pub use command::CommandLine;
pub use entry::Entry;
pub use error::{Error, RemovalHalf, Result};
pub use explorer::{EntriesByGroup, Explorer};
pub use group::{Group, GroupDescriptor, GroupId, Hive, KeyLocation, RegistryView};
pub use source::GroupSource;
pub use state::StartupState;
pub use store::{DirectoryStore, FileEntry, KeyHandle, KeyStore, LauncherFactory, Value};
