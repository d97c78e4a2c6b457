//! File-based `log` backend with size-based rotation.
//!
//! When enabled, records go to `~/.config/autostart/logs/autostart.log`.
//! Once the file exceeds the configured max size it is rotated to
//! `autostart.log.1` (one backup kept). When file logging is disabled,
//! `env_logger` writes to stderr instead, filtered by `RUST_LOG`.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};

const LOG_FILE_NAME: &str = "autostart.log";
const BACKUP_SUFFIX: &str = ".1";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Parses a config level name; unknown names fall back to `Info`.
pub fn parse_level(s: &str) -> LevelFilter {
    match s.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

struct FileState {
    file: File,
    written: u64,
}

/// Appends formatted records to a file, rotating it when it grows too large.
pub struct FileLogger {
    path: PathBuf,
    min_level: LevelFilter,
    max_bytes: u64,
    state: Mutex<FileState>,
}

impl FileLogger {
    /// Opens (or creates) the log file at `path` for appending.
    pub fn open(path: &Path, config: &LogConfig) -> std::io::Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path: path.to_path_buf(),
            min_level: parse_level(&config.level),
            max_bytes: config.max_file_mb * 1024 * 1024,
            state: Mutex::new(FileState { file, written }),
        })
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    fn rotate(&self, state: &mut FileState) {
        let _ = fs::rename(&self.path, self.backup_path());
        if let Ok(f) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            state.file = f;
        }
        state.written = 0;
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.min_level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let line = format!("{} [{}] {}\n", timestamp(), record.level(), record.args());
        let _ = state.file.write_all(line.as_bytes());
        state.written += line.len() as u64;

        if self.max_bytes > 0 && state.written >= self.max_bytes {
            self.rotate(&mut state);
        }
    }

    fn flush(&self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.file.flush();
        }
    }
}

/// Installs the global logger. Call once at startup.
///
/// Uses the rotating file logger when `config.enabled` is set and the log
/// file can be opened; otherwise falls back to `env_logger` on stderr.
pub fn init(config: &LogConfig) {
    if config.enabled {
        let path = crate::config::config_dir().map(|d| d.join("logs").join(LOG_FILE_NAME));
        if let Some(Ok(logger)) = path.map(|p| FileLogger::open(&p, config)) {
            let level = logger.min_level;
            if log::set_boxed_logger(Box::new(logger)).is_ok() {
                log::set_max_level(level);
                return;
            }
        }
    }
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}

fn timestamp() -> String {
    // Simple UTC time of day. No chrono dependency.
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let (h, m, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}")
}
