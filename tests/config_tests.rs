//! Configuration loading integration tests

use flowgate::authz::{GrantTable, ResourceKind};
use flowgate::config::{LogFormat, load_config, load_config_from_str};
use flowgate::error::ConfigError;
use serial_test::serial;
use std::io::Write;

const GRANTS_TOML: &str = r#"
[logging]
level = "warn"
format = "json"

[grants.global]
"global:admin" = ["workflow:read", "workflow:create"]

[grants.project]
"project:admin" = ["workflow:read", "workflow:create"]
"project:viewer" = ["workflow:read"]

[grants.workflow]
"workflow:owner" = ["workflow:read", "workflow:create"]

[grants.credential]
"credential:user" = ["credential:read"]
"#;

#[test]
fn test_full_grants_file_parses() {
    let config = load_config_from_str(GRANTS_TOML).unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.grants.global.len(), 1);
    assert_eq!(config.grants.project.len(), 2);
    assert_eq!(
        config.grants.kind_table(ResourceKind::Workflow).len(),
        1
    );
    assert_eq!(
        config.grants.kind_table(ResourceKind::Credential).len(),
        1
    );
}

#[test]
fn test_parsed_grants_compile_into_table() {
    let config = load_config_from_str(GRANTS_TOML).unwrap();
    let table = GrantTable::from_config(&config.grants).unwrap();

    let required = vec!["workflow:read".to_string(), "workflow:create".to_string()];
    let roles = table.roles_with_scopes(ResourceKind::Project, &required);
    assert!(roles.contains("project:admin"));
    assert!(!roles.contains("project:viewer"));
}

#[test]
fn test_defaults_when_sections_absent() {
    let config = load_config_from_str("").unwrap();
    assert!(config.grants.global.is_empty());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_malformed_scope_rejected() {
    let toml = r#"
[grants.project]
"project:viewer" = ["workflowread"]
"#;
    let result = load_config_from_str(toml);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_unknown_log_level_rejected() {
    let toml = r#"
[logging]
level = "chatty"
"#;
    let result = load_config_from_str(toml);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
#[serial]
fn test_load_from_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(GRANTS_TOML.as_bytes()).unwrap();
    file.flush().unwrap();

    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.grants.project.len(), 2);
}

#[test]
#[serial]
fn test_explicit_file_must_exist() {
    let result = load_config(Some("/nonexistent/flowgate.toml"));
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(GRANTS_TOML.as_bytes()).unwrap();
    file.flush().unwrap();

    // set_var is unsafe in edition 2024; #[serial] keeps env mutation exclusive
    unsafe {
        std::env::set_var("FLOWGATE_LOGGING__LEVEL", "error");
    }
    let result = load_config(Some(file.path().to_str().unwrap()));
    unsafe {
        std::env::remove_var("FLOWGATE_LOGGING__LEVEL");
    }

    let config = result.unwrap();
    assert_eq!(config.logging.level, "error");
    // file values not overridden stay intact
    assert_eq!(config.logging.format, LogFormat::Json);
}
