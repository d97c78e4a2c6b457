use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_autostart"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute autostart");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("run at Windows logon"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_autostart"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute autostart");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("autostart"));
}

#[test]
fn unknown_group_is_rejected() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_autostart"));
    cmd.args(["list", "--group", "hkcr"]);

    // Act
    let output = cmd.output().expect("failed to execute autostart");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown group 'hkcr'"));
}

#[test]
fn add_requires_a_group() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_autostart"));
    cmd.args(["add", "Tool", r"C:\Tools\tool.exe"]);

    let output = cmd.output().expect("failed to execute autostart");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--group"));
}
