//! Integration tests for configuration loading and validation

use agent_content_core::config::{load_from_json, load_from_yaml, ConfigError, ContentConfig};
use agent_content_core::protocol::AuthorRole;
use agent_content_core::providers::agents::types::MessageDeltaChunk;
use agent_content_core::providers::AgentContentGenerator;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test config file
fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_valid_yaml_config() {
    let yaml = r#"
version: "0.1"
agent:
  default_name: research-agent
metadata:
  include_message_context: true
  include_usage: false
streaming:
  choice_index: 1
functions:
  name_separator: "."
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);

    let config = load_from_yaml(path).unwrap();
    assert_eq!(config.version, "0.1");
    assert_eq!(config.agent.default_name.as_deref(), Some("research-agent"));
    assert!(config.metadata.include_message_context);
    assert!(!config.metadata.include_usage);
    assert_eq!(config.streaming.choice_index, 1);
    assert_eq!(config.functions.name_separator, ".");
}

#[test]
fn test_load_valid_json_config() {
    let json = r#"{
  "version": "0.1",
  "metadata": {"include_usage": false}
}"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.json", json);

    let config = load_from_json(path).unwrap();
    assert_eq!(config.version, "0.1");
    assert!(config.metadata.include_message_context);
    assert!(!config.metadata.include_usage);
    assert_eq!(config.functions.name_separator, "-");
}

#[test]
fn test_minimal_config_matches_default() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", "version: \"0.1\"\n");

    assert_eq!(load_from_yaml(path).unwrap(), ContentConfig::default());
}

#[test]
fn test_missing_version_field() {
    let yaml = r#"
agent:
  default_name: helper
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);

    let result = load_from_yaml(path);
    match result {
        Err(ConfigError::ParseError { message, .. }) => assert!(message.contains("version")),
        other => panic!("Expected parse error for missing version, got: {:?}", other),
    }
}

#[test]
fn test_invalid_version() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", "version: \"2.0\"\n");

    let result = load_from_yaml(path);
    if let Err(ConfigError::ValidationError(e)) = result {
        assert_eq!(e.field_path, "version");
    } else {
        panic!("Expected validation error for invalid version");
    }
}

#[test]
fn test_empty_separator_rejected() {
    let json = r#"{"version": "0.1", "functions": {"name_separator": ""}}"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.json", json);

    match load_from_json(path) {
        Err(ConfigError::ValidationError(e)) => {
            assert_eq!(e.field_path, "functions.name_separator")
        }
        other => panic!("Expected validation error, got: {:?}", other),
    }
}

#[test]
fn test_unknown_section_rejected() {
    let yaml = r#"
version: "0.1"
routing:
  strategy: priority
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);

    assert!(matches!(
        load_from_yaml(path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_malformed_json_reports_position() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.json", "{\n  \"version\": \n}");

    match load_from_json(path) {
        Err(ConfigError::ParseError { line, .. }) => assert_eq!(line, Some(3)),
        other => panic!("Expected parse error, got: {:?}", other),
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_from_yaml(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::IoError { .. })));
}

#[test]
fn test_env_var_interpolation() {
    use std::env;

    env::set_var("AGENT_CONTENT_IT_AGENT", "interpolated-agent");

    let yaml = r#"
version: "0.1"
agent:
  default_name: ${AGENT_CONTENT_IT_AGENT}
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);

    let config = load_from_yaml(path).unwrap();
    assert_eq!(
        config.agent.default_name.as_deref(),
        Some("interpolated-agent")
    );

    env::remove_var("AGENT_CONTENT_IT_AGENT");
}

#[test]
fn test_missing_env_var_fails_load() {
    let yaml = r#"
version: "0.1"
agent:
  default_name: ${AGENT_CONTENT_IT_NOT_SET}
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);

    match load_from_yaml(path) {
        Err(ConfigError::EnvVarNotFound { var }) => assert_eq!(var, "AGENT_CONTENT_IT_NOT_SET"),
        other => panic!("Expected missing variable error, got: {:?}", other),
    }
}

#[test]
fn test_loaded_config_drives_generator() {
    let yaml = r#"
version: "0.1"
streaming:
  choice_index: 4
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);
    let generator = AgentContentGenerator::new(load_from_yaml(path).unwrap());

    let chunk: MessageDeltaChunk = serde_json::from_value(serde_json::json!({
        "id": "m",
        "delta": {"content": [{"type": "text", "index": 0, "text": {"value": "hi"}}]}
    }))
    .unwrap();

    let out = generator
        .generate_streaming_message_content(AuthorRole::Assistant, &chunk)
        .unwrap();
    assert_eq!(out.choice_index, 4);
    assert_eq!(generator.config().streaming.choice_index, 4);
}
