//! # Configuration Tests
//!
//! Defaults, JSON loading, and validation of the memory layout.

use std::io::Write;

use niosim_core::config::{Config, ConfigError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.memory.size, 64 * 1024);
    assert_eq!(config.memory.program_start, 0);
    assert_eq!(config.memory.data_offset, None);
    assert_eq!(config.assembler.entry_label, "_start");
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.step_limit, Some(10_000_000));
    config.validate().unwrap();
}

#[test]
fn empty_object_is_complete() {
    assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_json_str(
        r#"{ "memory": { "program_start": 256 }, "general": { "step_limit": null } }"#,
    )
    .unwrap();
    assert_eq!(config.memory.program_start, 256);
    assert_eq!(config.memory.size, 64 * 1024);
    assert_eq!(config.general.step_limit, None);
    assert_eq!(config.assembler.entry_label, "_start");
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = Config::from_json_str(r#"{ "memory": { "size": "big" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}

#[rstest]
#[case::zero_size(r#"{ "memory": { "size": 0 } }"#)]
#[case::unaligned_size(r#"{ "memory": { "size": 1022 } }"#)]
#[case::unaligned_start(r#"{ "memory": { "program_start": 2 } }"#)]
#[case::start_outside(r#"{ "memory": { "size": 1024, "program_start": 1024 } }"#)]
#[case::unaligned_data(r#"{ "memory": { "data_offset": 6 } }"#)]
#[case::data_outside(r#"{ "memory": { "size": 1024, "data_offset": 2048 } }"#)]
#[case::empty_entry(r#"{ "assembler": { "entry_label": "  " } }"#)]
fn invalid_layouts(#[case] json: &str) {
    let err = Config::from_json_str(json).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
}

#[test]
fn loads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "assembler": {{ "entry_label": "main" }} }}"#).unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.assembler.entry_label, "main");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Config::from_file(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other}"),
    }
}

#[test]
fn round_trips_through_json() {
    let mut config = Config::default();
    config.memory.data_offset = Some(0x800);
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json_str(&text).unwrap(), config);
}
