//! Project-role sources
//!
//! Where does the user's role within a project come from? Two answers exist
//! in the platform: the role list embedded in the user snapshot, and the
//! relational project-membership table. Both are modeled behind one trait so
//! the resolver can consult either, or chain them, without changing its
//! state machine.

use crate::authz::types::User;
use crate::error::StoreError;
use crate::store::MembershipStore;
// async_trait required for dyn-compatibility with Arc<dyn ProjectRoleSource>
use async_trait::async_trait;
use std::sync::Arc;

/// Source of a user's role within a project
#[async_trait]
pub trait ProjectRoleSource: Send + Sync {
    /// The single role the user holds in the given project, if any
    async fn project_role(
        &self,
        user: &User,
        project_id: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Short description of the source (for logging)
    fn source_kind(&self) -> &'static str;
}

/// Shared reference type alias for role sources
pub type SharedRoleSource = Arc<dyn ProjectRoleSource>;

/// Role source backed by the role list embedded in the user snapshot.
///
/// No external reads; the snapshot is authoritative for the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedRoleSource;

#[async_trait]
impl ProjectRoleSource for EmbeddedRoleSource {
    async fn project_role(
        &self,
        user: &User,
        project_id: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(user.role_in_project(project_id).map(str::to_owned))
    }

    fn source_kind(&self) -> &'static str {
        "embedded"
    }
}

/// Role source backed by the relational project-membership table
pub struct MembershipRoleSource {
    store: Arc<dyn MembershipStore>,
}

impl MembershipRoleSource {
    pub fn new(store: Arc<dyn MembershipStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProjectRoleSource for MembershipRoleSource {
    async fn project_role(
        &self,
        user: &User,
        project_id: &str,
    ) -> Result<Option<String>, StoreError> {
        self.store.role_of(&user.id, project_id).await
    }

    fn source_kind(&self) -> &'static str {
        "membership"
    }
}

/// Composition of role sources; the first source that yields a role wins.
///
/// Lookup errors are not skipped over: a failing source fails the chain.
pub struct ChainedRoleSource {
    sources: Vec<SharedRoleSource>,
}

impl ChainedRoleSource {
    pub fn new(sources: Vec<SharedRoleSource>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl ProjectRoleSource for ChainedRoleSource {
    async fn project_role(
        &self,
        user: &User,
        project_id: &str,
    ) -> Result<Option<String>, StoreError> {
        for source in &self.sources {
            if let Some(role) = source.project_role(user, project_id).await? {
                return Ok(Some(role));
            }
        }
        Ok(None)
    }

    fn source_kind(&self) -> &'static str {
        "chained"
    }
}
