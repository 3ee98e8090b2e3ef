//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn colorgrab_bin(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("colorgrab").expect("binary should be built");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("COLORGRAB_FORMAT");
    cmd
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("clipboard"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--interval"))
        .stdout(predicate::str::contains("--offset"))
        .stdout(predicate::str::contains("--notify"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("hold-clipboard").not());
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("colorgrab"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("colorgrab"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_help() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home)
        .args(["config", "set", "format", "rgb"])
        .assert()
        .success();

    colorgrab_bin(&home)
        .args(["config", "get", "format"])
        .assert()
        .success()
        .stdout(predicate::str::diff("rgb\n"));

    assert!(home.path().join("colorgrab").join("config.toml").exists());
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home).args(["config", "init"]).assert().success();
    colorgrab_bin(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn invalid_format_flag_is_usage_error() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home)
        .args(["--format", "hsl"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn invalid_interval_is_usage_error() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home)
        .args(["--interval", "5ms"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid interval"));
}

#[test]
fn invalid_offset_is_usage_error() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home)
        .args(["--offset", "16"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn invalid_env_format_is_usage_error() {
    let home = TempDir::new().unwrap();
    colorgrab_bin(&home)
        .env("COLORGRAB_FORMAT", "cmyk")
        .assert()
        .failure()
        .code(2);
}
