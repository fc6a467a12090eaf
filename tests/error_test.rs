//! Tests for error types

use std::path::{Path, PathBuf};

use trueno_ensemble::entity::EntityKind;
use trueno_ensemble::Error;

#[test]
fn test_configuration_error() {
    let error = Error::Configuration("unsupported strategy grid".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Configuration error"));
    assert!(error_str.contains("grid"));
}

#[test]
fn test_generation_error() {
    let error = Error::Generation("STEPS has an empty value list".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Generation error"));
    assert!(error_str.contains("STEPS"));
}

#[test]
fn test_collision_error() {
    let error = Error::Collision {
        kind: EntityKind::Model,
        name: "sweep_0".to_string(),
        path: PathBuf::from("/exp/sweep/sweep_0"),
    };
    let error_str = format!("{error}");
    assert!(error_str.starts_with("Model directory for sweep_0"));
    assert!(error_str.contains("/exp/sweep/sweep_0"));
    assert!(error_str.contains("Enable overwrite"));
}

#[test]
fn test_model_exists_error() {
    let error = Error::ModelExists {
        ensemble: "sweep".to_string(),
        model: "sweep_1".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("sweep_1 already exists in ensemble sweep"));
}

#[test]
fn test_invalid_pattern_conversion() {
    let regex_error = regex::Regex::new("(unclosed").unwrap_err();
    let error: Error = regex_error.into();
    assert!(format!("{error}").contains("Invalid tag pattern"));
}

#[test]
fn test_io_error_context() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = Error::io("copy file", Path::new("/inputs/in.lammps"), io_error);
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("copy file /inputs/in.lammps"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_timeout_error() {
    let error = Error::Timeout {
        key: "producer_result".to_string(),
        waited_ms: 1500,
    };
    assert_eq!(
        format!("{error}"),
        "Timed out after 1500ms waiting for key producer_result"
    );
}

#[test]
fn test_entity_kind_display() {
    assert_eq!(EntityKind::Ensemble.to_string(), "Ensemble");
    assert_eq!(EntityKind::Orchestrator.to_string(), "Orchestrator");
}

#[test]
fn test_error_debug() {
    let error = Error::Configuration("test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("Configuration"));
}
