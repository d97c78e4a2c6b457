//! Splits a raw launch command into an executable path and its arguments.
//!
//! Vendors write `Run` values in inconsistent ways: a quoted executable
//! followed by free-form arguments, or a bare path directly followed by a
//! `-flag` or `/switch`. This only locates the first argument boundary; it
//! is not a shell tokenizer. An unquoted path that itself contains ` -` or
//! ` /` is split in the wrong place.

use serde::Serialize;

use crate::{Error, Result};

const QUOTE: char = '"';
const ARGUMENT_DELIMITERS: [&str; 2] = [" -", " /"];

/// An executable path and the argument string that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    pub path: String,
    pub arguments: String,
}

impl CommandLine {
    /// Treats the whole string as the path, with no arguments.
    pub fn whole(raw: &str) -> Self {
        Self {
            path: raw.to_string(),
            arguments: String::new(),
        }
    }
}

/// Splits `raw` into path and arguments.
///
/// Returns [`Error::MalformedCommand`] if `raw` opens a quote that never
/// closes. Callers that must not fail fall back to [`CommandLine::whole`].
pub fn split(raw: &str) -> Result<CommandLine> {
    if let Some(rest) = raw.strip_prefix(QUOTE) {
        let Some(end) = rest.find(QUOTE) else {
            return Err(Error::MalformedCommand {
                command: raw.to_string(),
            });
        };
        return Ok(CommandLine {
            path: rest[..end].to_string(),
            arguments: rest[end + QUOTE.len_utf8()..].trim_start().to_string(),
        });
    }

    // A delimiter at index 0 would leave an empty path, so it doesn't count.
    let boundary = ARGUMENT_DELIMITERS
        .iter()
        .filter_map(|delim| raw.find(*delim))
        .filter(|&idx| idx > 0)
        .min();

    Ok(match boundary {
        Some(idx) => CommandLine {
            path: raw[..idx].to_string(),
            arguments: raw[idx..].trim().to_string(),
        },
        None => CommandLine::whole(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(raw: &str) -> (String, String) {
        let line = split(raw).unwrap();
        (line.path, line.arguments)
    }

    #[test]
    fn quoted_path_with_arguments() {
        // Arrange
        let raw = r#""C:\Program Files\App\app.exe" --flag value"#;

        // Act
        let (path, args) = parts(raw);

        // Assert
        assert_eq!(path, r"C:\Program Files\App\app.exe");
        assert_eq!(args, "--flag value");
    }

    #[test]
    fn quoted_path_without_arguments() {
        let (path, args) = parts(r#""C:\Program Files\App\app.exe""#);

        assert_eq!(path, r"C:\Program Files\App\app.exe");
        assert_eq!(args, "");
    }

    #[test]
    fn quoted_arguments_keep_trailing_whitespace() {
        let (_, args) = parts("\"C:\\a.exe\"   /s  ");

        assert_eq!(args, "/s  ");
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        // Act
        let result = split(r#""C:\Program Files\App\app.exe --flag"#);

        // Assert
        assert!(matches!(result, Err(Error::MalformedCommand { .. })));
    }

    #[test]
    fn bare_path_with_dash_argument() {
        let (path, args) = parts(r"C:\Tools\run.exe -silent");

        assert_eq!(path, r"C:\Tools\run.exe");
        assert_eq!(args, "-silent");
    }

    #[test]
    fn bare_path_with_slash_argument() {
        let (path, args) = parts(r"C:\Tools\run.exe /update");

        assert_eq!(path, r"C:\Tools\run.exe");
        assert_eq!(args, "/update");
    }

    #[test]
    fn bare_path_without_delimiter() {
        let (path, args) = parts(r"C:\Tools\run.exe");

        assert_eq!(path, r"C:\Tools\run.exe");
        assert_eq!(args, "");
    }

    #[test]
    fn earliest_delimiter_wins_regardless_of_kind() {
        // Slash comes first here even though dash is scanned first.
        let (path, args) = parts(r"C:\Tools\run.exe /min -tray");

        assert_eq!(path, r"C:\Tools\run.exe");
        assert_eq!(args, "/min -tray");
    }

    #[test]
    fn unquoted_path_with_spaces_splits_at_first_flag() {
        let (path, args) = parts(r"C:\Program Files\Vendor\agent.exe -autorun  ");

        assert_eq!(path, r"C:\Program Files\Vendor\agent.exe");
        assert_eq!(args, "-autorun");
    }

    #[test]
    fn leading_delimiter_is_ignored() {
        let (path, args) = parts(" -x");

        assert_eq!(path, " -x");
        assert_eq!(args, "");
    }

    #[test]
    fn empty_command_is_empty_path() {
        assert_eq!(split("").unwrap(), CommandLine::default());
    }
}
