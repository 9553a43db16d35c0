//! Compiled role→scope grant table
//!
//! The grant catalog itself is configuration (see
//! [`crate::config::GrantsConfig`]); this module compiles it into hash sets
//! for membership tests and answers the two questions the resolver asks:
//! does a global role grant these scopes, and which roles of a given
//! resource kind grant them all.

use crate::authz::types::{ResourceKind, ScopeMode};
use crate::config::GrantsConfig;
use crate::error::ConfigError;
use std::collections::{HashMap, HashSet};

/// Compiled grant table
#[derive(Debug, Default)]
pub struct GrantTable {
    global: HashMap<String, HashSet<String>>,
    project: HashMap<String, HashSet<String>>,
    workflow: HashMap<String, HashSet<String>>,
    credential: HashMap<String, HashSet<String>>,
}

impl GrantTable {
    /// Compile a grant table from configuration
    pub fn from_config(config: &GrantsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            global: Self::compile_kind("grants.global", &config.global)?,
            project: Self::compile_kind("grants.project", &config.project)?,
            workflow: Self::compile_kind("grants.workflow", &config.workflow)?,
            credential: Self::compile_kind("grants.credential", &config.credential)?,
        })
    }

    /// Create an empty table that grants nothing (for testing)
    pub fn empty() -> Self {
        Self::default()
    }

    fn compile_kind(
        field_path: &str,
        table: &HashMap<String, Vec<String>>,
    ) -> Result<HashMap<String, HashSet<String>>, ConfigError> {
        let mut compiled = HashMap::with_capacity(table.len());
        for (role, scopes) in table {
            if role.is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("empty role name in {}", field_path),
                });
            }
            let mut set = HashSet::with_capacity(scopes.len());
            for scope in scopes {
                // scopes are "kind:action" slugs, e.g. "workflow:create"
                if scope.is_empty() || !scope.contains(':') {
                    return Err(ConfigError::Invalid {
                        message: format!(
                            "scope '{}' for role '{}' in {} is not of the form kind:action",
                            scope, role, field_path
                        ),
                    });
                }
                set.insert(scope.clone());
            }
            compiled.insert(role.clone(), set);
        }
        Ok(compiled)
    }

    fn kind_table(&self, kind: ResourceKind) -> &HashMap<String, HashSet<String>> {
        match kind {
            ResourceKind::Project => &self.project,
            ResourceKind::Workflow => &self.workflow,
            ResourceKind::Credential => &self.credential,
        }
    }

    /// Does the given global role grant the required scopes?
    ///
    /// `AllOf` over an empty scope list is vacuously true; `AnyOf` over an
    /// empty list is false.
    pub fn global_role_grants(&self, role: &str, scopes: &[String], mode: ScopeMode) -> bool {
        let granted = self.global.get(role);
        match mode {
            ScopeMode::AllOf => scopes
                .iter()
                .all(|s| granted.is_some_and(|g| g.contains(s.as_str()))),
            ScopeMode::AnyOf => scopes
                .iter()
                .any(|s| granted.is_some_and(|g| g.contains(s.as_str()))),
        }
    }

    /// Every role of the given resource kind that grants all of the
    /// required scopes.
    pub fn roles_with_scopes(&self, kind: ResourceKind, scopes: &[String]) -> HashSet<&str> {
        self.kind_table(kind)
            .iter()
            .filter(|(_, granted)| scopes.iter().all(|s| granted.contains(s.as_str())))
            .map(|(role, _)| role.as_str())
            .collect()
    }
}
