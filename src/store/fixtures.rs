//! World fixtures for the CLI and tests
//!
//! A fixture file describes a small world in TOML: users with their roles,
//! which project owns each workflow and credential, and the rows of the
//! relational membership table.
//!
//! ```toml
//! [[users]]
//! id = "alice"
//! role = "global:member"
//! project_roles = [{ project_id = "P1", role = "project:admin" }]
//!
//! [workflows]
//! W1 = "P1"
//!
//! [credentials]
//! C1 = "P1"
//!
//! [[memberships]]
//! user_id = "alice"
//! project_id = "P2"
//! role = "project:viewer"
//! ```

use crate::authz::User;
use crate::error::ConfigError;
use crate::store::memory::{InMemoryMembershipStore, InMemorySharingStore};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One row of the relational membership table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MembershipRow {
    pub user_id: String,
    pub project_id: String,
    pub role: String,
}

/// A deserialized fixture file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FixtureSet {
    pub users: Vec<User>,

    /// workflow id → owning project id
    pub workflows: HashMap<String, String>,

    /// credential id → owning project id
    pub credentials: HashMap<String, String>,

    pub memberships: Vec<MembershipRow>,
}

impl FixtureSet {
    /// Parse a fixture set from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Load a fixture set from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Look up a user snapshot by id
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Build a sharing store holding this fixture's records
    pub fn sharing_store(&self) -> InMemorySharingStore {
        let mut store = InMemorySharingStore::new();
        for (workflow_id, project_id) in &self.workflows {
            store.share_workflow(workflow_id.clone(), project_id.clone());
        }
        for (credential_id, project_id) in &self.credentials {
            store.share_credential(credential_id.clone(), project_id.clone());
        }
        store
    }

    /// Build a membership store holding this fixture's rows
    pub fn membership_store(&self) -> InMemoryMembershipStore {
        let mut store = InMemoryMembershipStore::new();
        for row in &self.memberships {
            store.insert(row.user_id.clone(), row.project_id.clone(), row.role.clone());
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sharing::{MembershipStore, SharingStore};

    const FIXTURE: &str = r#"
[[users]]
id = "alice"
role = "global:member"
project_roles = [{ project_id = "P1", role = "project:admin" }]

[[users]]
id = "bob"
role = "global:admin"

[workflows]
W1 = "P1"

[credentials]
C1 = "P2"

[[memberships]]
user_id = "alice"
project_id = "P2"
role = "project:viewer"
"#;

    #[test]
    fn test_parse_fixture() {
        let fixtures = FixtureSet::from_toml_str(FIXTURE).unwrap();
        assert_eq!(fixtures.users.len(), 2);

        let alice = fixtures.user("alice").unwrap();
        assert_eq!(alice.role, "global:member");
        assert_eq!(alice.role_in_project("P1"), Some("project:admin"));

        // bob has no project_roles key at all
        let bob = fixtures.user("bob").unwrap();
        assert!(bob.project_roles.is_empty());

        assert!(fixtures.user("carol").is_none());
    }

    #[tokio::test]
    async fn test_fixture_stores() {
        let fixtures = FixtureSet::from_toml_str(FIXTURE).unwrap();

        let sharing = fixtures.sharing_store();
        assert_eq!(
            sharing.project_id_for_workflow("W1").await.unwrap(),
            Some("P1".to_string())
        );
        assert_eq!(
            sharing.project_id_for_credential("C1").await.unwrap(),
            Some("P2".to_string())
        );

        let memberships = fixtures.membership_store();
        assert_eq!(
            memberships.role_of("alice", "P2").await.unwrap(),
            Some("project:viewer".to_string())
        );
    }

    #[test]
    fn test_empty_fixture() {
        let fixtures = FixtureSet::from_toml_str("").unwrap();
        assert!(fixtures.users.is_empty());
        assert!(fixtures.workflows.is_empty());
    }

    #[test]
    fn test_malformed_fixture_is_load_error() {
        let result = FixtureSet::from_toml_str("users = 42");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
