/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `autostart init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# autostart configuration
# Location: ~/.config/autostart/config.toml

[logging]
# Enable file logging to ~/.config/autostart/logs/autostart.log.
# When disabled, warnings go to stderr (set RUST_LOG for more detail).
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10

[folders]
# Override the Startup folder locations detected from Windows.
# user = 'C:\Users\me\AppData\Roaming\Microsoft\Windows\Start Menu\Programs\Startup'
# common = 'C:\ProgramData\Microsoft\Windows\Start Menu\Programs\StartUp'
"##
    .to_string()
}
