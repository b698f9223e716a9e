//! Integration tests for configuration precedence.

use std::ffi::OsString;
use std::fs;

use ortho_config::OrthoConfig as _;
use tempfile::TempDir;

use safesplice_config::{Config, LogFormat};

fn write_config(dir: &TempDir, body: &str) -> OsString {
    let path = dir.path().join("safesplice.toml");
    if let Err(error) = fs::write(&path, body) {
        panic!("failed to write configuration: {error}");
    }
    path.into_os_string()
}

fn load(args: Vec<OsString>) -> Config {
    match Config::load_from_iter(args) {
        Ok(config) => config,
        Err(error) => panic!("configuration should load: {error}"),
    }
}

#[test]
fn file_values_are_loaded() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        "backup_suffix = \".orig\"\nlog_format = \"json\"\nretain_backup_on_success = false\n",
    );

    let config = load(vec![
        OsString::from("safesplice"),
        OsString::from("--config-path"),
        path,
    ]);

    assert_eq!(config.backup_suffix(), ".orig");
    assert_eq!(config.log_format(), LogFormat::Json);
    assert!(!config.retain_backup_on_success());
}

#[test]
fn cli_flags_override_file_values() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "backup_suffix = \".orig\"\n");

    let config = load(vec![
        OsString::from("safesplice"),
        OsString::from("--config-path"),
        path,
        OsString::from("--backup-suffix"),
        OsString::from(".prev"),
    ]);

    assert_eq!(config.backup_suffix(), ".prev");
}

#[test]
fn retention_defaults_to_keeping_backups() {
    let config = load(vec![OsString::from("safesplice")]);

    assert_eq!(config.retain_backup_on_success, None);
    assert!(config.retain_backup_on_success());
}

#[test]
fn file_retention_survives_cli_loading() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "retain_backup_on_success = true\n");

    let config = load(vec![
        OsString::from("safesplice"),
        OsString::from("--config-path"),
        path,
        OsString::from("--backup-suffix"),
        OsString::from(".prev"),
    ]);

    assert_eq!(config.retain_backup_on_success, Some(true));
    assert_eq!(config.backup_suffix(), ".prev");
}
