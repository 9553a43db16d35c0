//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (FLOWGATE_*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "flowgate.toml",
    ".flowgate.toml",
    "~/.config/flowgate/config.toml",
    "/etc/flowgate/config.toml",
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with FLOWGATE_ prefix
    // e.g., FLOWGATE_LOGGING__LEVEL=debug
    // Double underscore (__) maps to nested keys (logging.level)
    builder = builder.add_source(
        Environment::with_prefix("FLOWGATE")
            .separator("__")
            .try_parsing(true),
    );

    // Build and deserialize
    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_grant_table(&config.grants.global, "grants.global")?;
    validate_grant_table(&config.grants.project, "grants.project")?;
    validate_grant_table(&config.grants.workflow, "grants.workflow")?;
    validate_grant_table(&config.grants.credential, "grants.credential")?;

    const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::Invalid {
            message: format!(
                "logging.level must be one of {:?}, got: {}",
                LEVELS, config.logging.level
            ),
        });
    }

    Ok(())
}

/// Validate role and scope names in a grant table
fn validate_grant_table(
    table: &std::collections::HashMap<String, Vec<String>>,
    field_path: &str,
) -> Result<(), ConfigError> {
    for (role, scopes) in table {
        if role.is_empty() {
            return Err(ConfigError::Invalid {
                message: format!("empty role name in {}", field_path),
            });
        }
        for scope in scopes {
            if scope.is_empty() || !scope.contains(':') {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "scope '{}' for role '{}' in {} is not of the form kind:action",
                        scope, role, field_path
                    ),
                });
            }
        }
    }
    Ok(())
}
