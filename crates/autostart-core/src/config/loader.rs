use std::path::PathBuf;

use super::Config;
use crate::{Error, Result};

/// Returns the config directory: `~/.config/autostart/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("autostart"))
}

/// Returns the config file path: `~/.config/autostart/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns [`Error::NotFound`] if the file doesn't exist and
/// [`Error::Config`] if it can't be parsed.
pub fn try_load() -> Result<Config> {
    let path = config_path().ok_or_else(|| Error::NotFound {
        what: "home directory".into(),
    })?;
    let content = std::fs::read_to_string(&path).map_err(|e| Error::from_io(e, path.display()))?;
    parse(&content).map_err(|message| Error::Config {
        path: path.display().to_string(),
        message,
    })
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped via [`Config::validate`].
/// A missing file silently returns defaults; other errors are printed.
pub fn load() -> Config {
    match try_load() {
        Ok(config) => config,
        Err(Error::NotFound { .. }) => Config::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}

pub(super) fn parse(content: &str) -> std::result::Result<Config, String> {
    let mut config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
    config.validate();
    Ok(config)
}
