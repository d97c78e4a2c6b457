use super::loader::parse;
use super::template::generate_config;
use super::*;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();

    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.max_file_mb, 10);
    assert_eq!(config.folders, FolderOverrides::default());
}

#[test]
fn config_template_matches_default_values() {
    // Arrange
    let toml_str = generate_config();

    // Act
    let config = parse(&toml_str).unwrap();

    // Assert
    assert_eq!(config, Config::default());
}

#[test]
fn partial_toml_uses_defaults_for_missing_sections() {
    // Arrange
    let toml_str = "[logging]\nenabled = true\n";

    // Act
    let config = parse(toml_str).unwrap();

    // Assert
    assert!(config.logging.enabled);
    assert_eq!(config.logging.level, "info");
    assert!(config.folders.user.is_none());
}

#[test]
fn validate_clamps_rotation_size() {
    let mut config = Config::default();
    config.logging.max_file_mb = 0;
    config.validate();
    assert_eq!(config.logging.max_file_mb, 1);

    config.logging.max_file_mb = 1_000_000;
    config.validate();
    assert_eq!(config.logging.max_file_mb, 1024);
}

#[test]
fn folder_override_replaces_only_given_paths() {
    // Arrange
    let config = parse("[folders]\ncommon = 'D:\\Startup'\n").unwrap();
    let detected = StartupFolders {
        user: PathBuf::from(r"C:\Users\ana\Startup"),
        common: PathBuf::from(r"C:\ProgramData\Startup"),
    };

    // Act
    let folders = config.folders.apply(detected);

    // Assert
    assert_eq!(folders.user, PathBuf::from(r"C:\Users\ana\Startup"));
    assert_eq!(folders.common, PathBuf::from(r"D:\Startup"));
}

#[test]
fn malformed_toml_is_rejected() {
    assert!(parse("[logging\nenabled = true").is_err());
}
