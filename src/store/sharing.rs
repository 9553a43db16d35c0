//! Lookup contracts against the platform's shared stores
//!
//! Each lookup is a single-key read. A missing record is a legitimate
//! outcome (`Ok(None)`), not an error; the resolver folds it into a denial.
//! No caching and no retries live at this layer.

use crate::error::StoreError;
// async_trait required for dyn-compatibility with Arc<dyn SharingStore>
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to workflow- and credential-sharing records
#[async_trait]
pub trait SharingStore: Send + Sync {
    /// The project owning the given workflow, per its sharing record
    async fn project_id_for_workflow(
        &self,
        workflow_id: &str,
    ) -> Result<Option<String>, StoreError>;

    /// The project owning the given credential, per its sharing record
    async fn project_id_for_credential(
        &self,
        credential_id: &str,
    ) -> Result<Option<String>, StoreError>;
}

/// Read access to the relational project-membership table
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// The role the user holds in the given project, per the membership table
    async fn role_of(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Option<String>, StoreError>;
}

/// Shared reference type alias for sharing stores
pub type SharedSharingStore = Arc<dyn SharingStore>;

/// Shared reference type alias for membership stores
pub type SharedMembershipStore = Arc<dyn MembershipStore>;
