//! Configuration types for flowgate
//!
//! The grant catalog is deliberately not baked into the crate: which roles
//! exist and which scopes they grant is platform policy, loaded from TOML
//! files and/or environment variables.

use crate::authz::ResourceKind;
use serde::Deserialize;
use std::collections::HashMap;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Role → scope grant tables
    pub grants: GrantsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Role → scope grant tables, one per role namespace.
///
/// Keys are role slugs, values the scopes that role grants:
///
/// ```toml
/// [grants.global]
/// "global:admin" = ["workflow:read", "workflow:create"]
///
/// [grants.project]
/// "project:admin" = ["workflow:read", "workflow:create"]
/// "project:viewer" = ["workflow:read"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GrantsConfig {
    /// Grants of the platform-wide roles
    pub global: HashMap<String, Vec<String>>,

    /// Grants of roles held within a project
    pub project: HashMap<String, Vec<String>>,

    /// Grants of roles attached to workflow-sharing records
    pub workflow: HashMap<String, Vec<String>>,

    /// Grants of roles attached to credential-sharing records
    pub credential: HashMap<String, Vec<String>>,
}

impl GrantsConfig {
    /// The raw grant table for a resource kind
    pub fn kind_table(&self, kind: ResourceKind) -> &HashMap<String, Vec<String>> {
        match kind {
            ResourceKind::Project => &self.project,
            ResourceKind::Workflow => &self.workflow,
            ResourceKind::Credential => &self.credential,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
