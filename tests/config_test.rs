//! Configuration tests
//!
//! Covers TOML file loading, environment overrides, merge priority, and the
//! fail-fast behavior when the knowledge base identifier is missing.

use std::path::PathBuf;
use talent8::config::{AppConfig, ConfigError};
use tempfile::TempDir;

#[test]
fn test_load_from_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    std::fs::write(
        &config_path,
        r#"
aws_region = "eu-central-1"
knowledge_base_id = "KBFILE0001"
aws_access_key_id = "AKIAEXAMPLE"
aws_secret_access_key = "example-secret"
"#,
    )
    .unwrap();

    let config = AppConfig::from_file(&config_path).unwrap();
    assert_eq!(config.aws_region(), "eu-central-1");
    assert_eq!(config.knowledge_base_id(), Some("KBFILE0001"));
    assert_eq!(
        config.static_credentials(),
        Some(("AKIAEXAMPLE", "example-secret"))
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let err = AppConfig::from_file(&PathBuf::from("/nonexistent/talent8.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "knowledge_base_id = [not toml").unwrap();

    let err = AppConfig::from_file(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_missing_knowledge_base_id_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, r#"aws_region = "eu-west-1""#).unwrap();

    let config = AppConfig::from_file(&config_path).unwrap();
    let err = config.require_knowledge_base_id().unwrap_err();
    assert!(matches!(err, ConfigError::MissingKnowledgeBaseId));
    assert_eq!(err.to_string(), "BEDROCK_KNOWLEDGE_BASE_ID is not set");
}

// Everything that reads or writes process environment lives in this single
// test so parallel test threads cannot race on the variables.
#[test]
fn test_env_and_file_priority() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
aws_region = "eu-west-1"
knowledge_base_id = "KBFILE0001"
"#,
    )
    .unwrap();

    let config_path = config_path.to_str().unwrap();

    std::env::remove_var("AWS_REGION");
    std::env::remove_var("BEDROCK_KNOWLEDGE_BASE_ID");

    // File only: file values apply.
    let config = AppConfig::load(Some(config_path)).unwrap();
    assert_eq!(config.aws_region(), "eu-west-1");
    assert_eq!(config.knowledge_base_id(), Some("KBFILE0001"));

    // Environment set: environment wins over the file.
    std::env::set_var("AWS_REGION", "ap-northeast-1");
    std::env::set_var("BEDROCK_KNOWLEDGE_BASE_ID", "KBENV00001");

    let config = AppConfig::load(Some(config_path)).unwrap();
    assert_eq!(config.aws_region(), "ap-northeast-1");
    assert_eq!(config.knowledge_base_id(), Some("KBENV00001"));

    // Environment only: no file needed at all.
    let config = AppConfig::load(None).unwrap();
    assert_eq!(config.require_knowledge_base_id().unwrap(), "KBENV00001");

    std::env::remove_var("AWS_REGION");
    std::env::remove_var("BEDROCK_KNOWLEDGE_BASE_ID");
}
