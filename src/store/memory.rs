//! In-memory store implementations
//!
//! Hash-map backed reference implementations of the store contracts, used
//! by the CLI fixtures and by tests. Real deployments plug in their own
//! backends; persistence is out of scope for this crate.

use crate::error::StoreError;
use crate::store::sharing::{MembershipStore, SharingStore};
use async_trait::async_trait;
use std::collections::HashMap;

/// Sharing records held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySharingStore {
    workflows: HashMap<String, String>,
    credentials: HashMap<String, String>,
}

impl InMemorySharingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a workflow as owned by a project
    pub fn share_workflow(&mut self, workflow_id: impl Into<String>, project_id: impl Into<String>) {
        self.workflows.insert(workflow_id.into(), project_id.into());
    }

    /// Record a credential as owned by a project
    pub fn share_credential(
        &mut self,
        credential_id: impl Into<String>,
        project_id: impl Into<String>,
    ) {
        self.credentials
            .insert(credential_id.into(), project_id.into());
    }
}

#[async_trait]
impl SharingStore for InMemorySharingStore {
    async fn project_id_for_workflow(
        &self,
        workflow_id: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.workflows.get(workflow_id).cloned())
    }

    async fn project_id_for_credential(
        &self,
        credential_id: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.credentials.get(credential_id).cloned())
    }
}

/// Membership rows held in memory, keyed by (user, project)
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipStore {
    rows: HashMap<(String, String), String>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a membership row; a later insert for the same (user, project)
    /// pair replaces the earlier role.
    pub fn insert(
        &mut self,
        user_id: impl Into<String>,
        project_id: impl Into<String>,
        role: impl Into<String>,
    ) {
        self.rows
            .insert((user_id.into(), project_id.into()), role.into());
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn role_of(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self
            .rows
            .get(&(user_id.to_string(), project_id.to_string()))
            .cloned())
    }
}
