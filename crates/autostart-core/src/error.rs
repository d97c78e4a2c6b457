use std::fmt;

use thiserror::Error;

/// Result alias used across the autostart crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Which half of a two-step removal failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalHalf {
    /// The entry's primary definition (registry value or launcher file).
    Primary,
    /// The entry's flag in the approved list.
    Approved,
}

impl fmt::Display for RemovalHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary location"),
            Self::Approved => f.write_str("approved list"),
        }
    }
}

/// Errors raised while reading or changing startup entries.
///
/// A value missing from a store is not an error during enumeration or
/// state reads: it shows up as `StartupState::NotFound` or an empty list.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{what} does not exist")]
    NotFound { what: String },

    #[error("unterminated quote in command: {command}")]
    MalformedCommand { command: String },

    #[error("access denied to {location}")]
    AccessDenied { location: String },

    #[error("removal from the {failed} failed: {source}")]
    PartialRemoval {
        failed: RemovalHalf,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid entry name '{name}': must be non-empty and name a single file")]
    InvalidName { name: String },

    #[error("unknown group '{name}'")]
    UnknownGroup { name: String },

    #[error("{location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{location}: {message}")]
    Store { location: String, message: String },

    #[error("{path}: {message}")]
    Config { path: String, message: String },
}

impl Error {
    /// Maps an I/O error at `location`, keeping permission failures distinct.
    pub fn from_io(source: std::io::Error, location: impl fmt::Display) -> Self {
        let location = location.to_string();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::AccessDenied { location },
            std::io::ErrorKind::NotFound => Self::NotFound { what: location },
            _ => Self::Io { location, source },
        }
    }

    /// Returns true if retrying with elevated rights might succeed.
    pub fn is_access_denied(&self) -> bool {
        match self {
            Self::AccessDenied { .. } => true,
            Self::PartialRemoval { source, .. } => source.is_access_denied(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_io_maps_to_access_denied() {
        // Arrange
        let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);

        // Act
        let err = Error::from_io(io, r"C:\ProgramData\Startup\app.lnk");

        // Assert
        assert!(err.is_access_denied());
        assert_eq!(
            err.to_string(),
            r"access denied to C:\ProgramData\Startup\app.lnk"
        );
    }

    #[test]
    fn partial_removal_reports_failed_half() {
        let err = Error::PartialRemoval {
            failed: RemovalHalf::Approved,
            source: Box::new(Error::AccessDenied {
                location: "HKEY_LOCAL_MACHINE\\Run".into(),
            }),
        };

        assert!(err.is_access_denied());
        assert!(err.to_string().starts_with("removal from the approved list failed"));
    }
}
