mod loader;
pub mod template;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::StartupFolders;
use crate::log::LogConfig;

pub use loader::{config_dir, config_path, load, try_load};

/// Top-level configuration for autostart.
///
/// Loaded from `~/.config/autostart/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File logging settings.
    pub logging: LogConfig,
    /// Replacements for the detected Startup folder paths.
    pub folders: FolderOverrides,
}

/// Optional Startup folder paths that take precedence over the OS ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common: Option<PathBuf>,
}

impl FolderOverrides {
    /// Replaces each detected folder that has an override.
    pub fn apply(&self, detected: StartupFolders) -> StartupFolders {
        StartupFolders {
            user: self.user.clone().unwrap_or(detected.user),
            common: self.common.clone().unwrap_or(detected.common),
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// Keeps the log rotation size between 1 MB and 1 GB.
    pub fn validate(&mut self) {
        self.logging.max_file_mb = self.logging.max_file_mb.clamp(1, 1024);
    }
}

#[cfg(test)]
mod tests;
