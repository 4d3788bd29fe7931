//! Integration tests for Settings config loading.
//!
//! These run without a global config (temp directories only).

use std::fs;

use tempfile::TempDir;

use exprtree::config::{ConfigError, LogSettings, Settings};

#[test]
fn given_no_files_when_load_then_defaults() {
    let settings = Settings::load(None).expect("load settings");
    assert_eq!(settings.log.span_events, LogSettings::default().span_events);
}

#[test]
fn given_explicit_file_when_load_then_file_values_apply() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exprtree.toml");
    fs::write(
        &path,
        r#"
[log]
filter = "exprtree=debug"
span_events = true
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.log.filter, "exprtree=debug");
    assert!(settings.log.span_events);
}

#[test]
fn given_partial_file_when_load_then_unspecified_values_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.toml");
    fs::write(&path, "[log]\nspan_events = true\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert!(settings.log.span_events);
    assert_eq!(settings.log.filter, LogSettings::default().filter);
}

#[test]
fn given_missing_file_when_load_then_read_error() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load(Some(&dir.path().join("missing.toml")));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn given_malformed_file_when_load_then_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[log\nfilter = ").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}
