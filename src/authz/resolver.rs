//! Access resolver
//!
//! Answers one question: does this user hold a role, global or
//! project-scoped, that grants the required scopes on this resource?
//!
//! Evaluation order:
//! 1. Global role (all required scopes). A hit grants immediately.
//! 2. If the check is global-only, a miss denies immediately; no project
//!    resolution is attempted.
//! 3. Resolve the owning project: an explicit project id is used as-is; a
//!    workflow or credential id goes through its sharing record.
//! 4. Evaluate the user's role within the resolved project against the set
//!    of project roles granting all required scopes.
//!
//! A check with no resource identifier at all (and not global-only) is a
//! [`CheckError::MissingResourceId`]; an identifier whose sharing lookup
//! comes back empty is an ordinary denial.

use crate::authz::grants::GrantTable;
use crate::authz::roles::SharedRoleSource;
use crate::authz::types::{AccessDecision, ResourceKind, ResourceRef, ScopeMode, User};
use crate::error::{AccessDeniedError, AppError, CheckError};
use crate::store::SharedSharingStore;
use tracing::{debug, trace};

/// Access resolver
///
/// Holds no per-request state; every collaborator is injected at
/// construction and checks may run concurrently.
pub struct AccessResolver {
    grants: GrantTable,
    roles: SharedRoleSource,
    sharing: SharedSharingStore,
}

impl AccessResolver {
    /// Create a new resolver from its collaborators
    pub fn new(grants: GrantTable, roles: SharedRoleSource, sharing: SharedSharingStore) -> Self {
        Self {
            grants,
            roles,
            sharing,
        }
    }

    /// Does the user's global role grant the given scopes?
    ///
    /// Side-effect-free; never touches a store.
    pub fn has_global_scopes(&self, user: &User, scopes: &[String], mode: ScopeMode) -> bool {
        self.grants.global_role_grants(&user.role, scopes, mode)
    }

    /// Run an authorization check.
    ///
    /// Returns the decision as a value; a denial is never an error. The only
    /// errors are a missing resource identifier on a project-scoped check
    /// and store failures, which propagate unchanged.
    ///
    /// An empty `required` list is granted at the global step (all-of over
    /// the empty set holds for any role).
    pub async fn check(
        &self,
        user: &User,
        required: &[String],
        resource: Option<&ResourceRef>,
        global_only: bool,
    ) -> Result<AccessDecision, CheckError> {
        debug!(
            user = %user.id,
            scopes = ?required,
            resource = ?resource,
            global_only,
            "Checking access"
        );

        if self.has_global_scopes(user, required, ScopeMode::AllOf) {
            trace!(role = %user.role, "Granted by global role");
            return Ok(AccessDecision::Granted);
        }

        if global_only {
            trace!("Global-only check, no project fallback");
            return Ok(AccessDecision::Denied(
                "required scopes are not granted by the user's global role".to_string(),
            ));
        }

        let Some(resource) = resource else {
            return Err(CheckError::MissingResourceId);
        };

        let project_id = match resource {
            ResourceRef::Project(id) => Some(id.clone()),
            ResourceRef::Workflow(id) => self.sharing.project_id_for_workflow(id).await?,
            ResourceRef::Credential(id) => self.sharing.project_id_for_credential(id).await?,
        };

        let Some(project_id) = project_id else {
            // the identifier was real input but resolves to no project:
            // an unshared or unknown resource is a denial, not an error
            trace!("No owning project resolved");
            return Ok(AccessDecision::Denied(format!(
                "{} is not shared with any project",
                resource
            )));
        };

        let Some(held) = self.roles.project_role(user, &project_id).await? else {
            trace!(project = %project_id, source = self.roles.source_kind(), "No project role held");
            return Ok(AccessDecision::Denied(format!(
                "user holds no role in project '{}'",
                project_id
            )));
        };

        let granting = self
            .grants
            .roles_with_scopes(ResourceKind::Project, required);
        if granting.contains(held.as_str()) {
            trace!(project = %project_id, role = %held, "Granted by project role");
            Ok(AccessDecision::Granted)
        } else {
            trace!(project = %project_id, role = %held, "Project role does not grant scopes");
            Ok(AccessDecision::Denied(format!(
                "role '{}' does not grant the required scopes in project '{}'",
                held, project_id
            )))
        }
    }

    /// Run an authorization check, returning an error if denied
    pub async fn require(
        &self,
        user: &User,
        required: &[String],
        resource: Option<&ResourceRef>,
        global_only: bool,
    ) -> Result<(), AppError> {
        match self.check(user, required, resource, global_only).await? {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Denied(reason) => {
                Err(AccessDeniedError::new(required.to_vec(), reason).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::roles::EmbeddedRoleSource;
    use crate::config::GrantsConfig;
    use crate::store::InMemorySharingStore;
    use std::sync::Arc;

    fn grants() -> GrantTable {
        let mut config = GrantsConfig::default();
        config
            .global
            .insert("global:admin".into(), vec!["workflow:read".into(), "workflow:create".into()]);
        config.project.insert(
            "project:admin".into(),
            vec!["workflow:read".into(), "workflow:create".into()],
        );
        config
            .project
            .insert("project:viewer".into(), vec!["workflow:read".into()]);
        GrantTable::from_config(&config).unwrap()
    }

    fn resolver(sharing: InMemorySharingStore) -> AccessResolver {
        AccessResolver::new(grants(), Arc::new(EmbeddedRoleSource), Arc::new(sharing))
    }

    fn scopes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_global_role_grants_without_resource() {
        let resolver = resolver(InMemorySharingStore::new());
        let user = User::new("u1", "global:admin");

        let decision = resolver
            .check(&user, &scopes(&["workflow:create"]), None, false)
            .await
            .unwrap();
        assert!(decision.is_granted());
    }

    #[tokio::test]
    async fn test_global_only_denies_without_fallback() {
        let resolver = resolver(InMemorySharingStore::new());
        let user = User::new("u1", "global:member").with_project_role("P1", "project:admin");

        let decision = resolver
            .check(
                &user,
                &scopes(&["workflow:create"]),
                Some(&ResourceRef::Project("P1".into())),
                true,
            )
            .await
            .unwrap();
        // the project role would grant, but global-only never consults it
        assert!(decision.is_denied());
    }

    #[tokio::test]
    async fn test_project_role_grants_on_explicit_project() {
        let resolver = resolver(InMemorySharingStore::new());
        let user = User::new("u1", "global:member").with_project_role("P1", "project:admin");

        let decision = resolver
            .check(
                &user,
                &scopes(&["workflow:create"]),
                Some(&ResourceRef::Project("P1".into())),
                false,
            )
            .await
            .unwrap();
        assert!(decision.is_granted());
    }

    #[tokio::test]
    async fn test_wrong_project_denies() {
        let resolver = resolver(InMemorySharingStore::new());
        let user = User::new("u1", "global:member").with_project_role("P1", "project:admin");

        let decision = resolver
            .check(
                &user,
                &scopes(&["workflow:create"]),
                Some(&ResourceRef::Project("P2".into())),
                false,
            )
            .await
            .unwrap();
        assert!(decision.is_denied());
    }

    #[tokio::test]
    async fn test_workflow_resolves_to_owning_project() {
        let mut sharing = InMemorySharingStore::new();
        sharing.share_workflow("W1", "P1");
        let resolver = resolver(sharing);
        let user = User::new("u1", "global:member").with_project_role("P1", "project:viewer");

        let decision = resolver
            .check(
                &user,
                &scopes(&["workflow:read"]),
                Some(&ResourceRef::Workflow("W1".into())),
                false,
            )
            .await
            .unwrap();
        assert!(decision.is_granted());
    }

    #[tokio::test]
    async fn test_unshared_workflow_denies() {
        let resolver = resolver(InMemorySharingStore::new());
        let user = User::new("u1", "global:member").with_project_role("P1", "project:admin");

        let decision = resolver
            .check(
                &user,
                &scopes(&["workflow:read"]),
                Some(&ResourceRef::Workflow("W9".into())),
                false,
            )
            .await
            .unwrap();
        match decision {
            AccessDecision::Denied(reason) => assert!(reason.contains("not shared")),
            AccessDecision::Granted => panic!("expected denial"),
        }
    }

    #[tokio::test]
    async fn test_missing_identifier_is_an_error() {
        let resolver = resolver(InMemorySharingStore::new());
        let user = User::new("u1", "global:member");

        let result = resolver
            .check(&user, &scopes(&["workflow:read"]), None, false)
            .await;
        assert!(matches!(result, Err(CheckError::MissingResourceId)));
    }

    #[tokio::test]
    async fn test_empty_role_list_denies() {
        let resolver = resolver(InMemorySharingStore::new());
        let user = User::new("u1", "global:member");

        let decision = resolver
            .check(
                &user,
                &scopes(&["workflow:read"]),
                Some(&ResourceRef::Project("P1".into())),
                false,
            )
            .await
            .unwrap();
        assert!(decision.is_denied());
    }

    #[tokio::test]
    async fn test_empty_scope_list_is_granted_globally() {
        let resolver = resolver(InMemorySharingStore::new());
        let user = User::new("u1", "global:ghost");

        let decision = resolver.check(&user, &[], None, false).await.unwrap();
        assert!(decision.is_granted());
    }

    #[tokio::test]
    async fn test_require_maps_denial_to_error() {
        let resolver = resolver(InMemorySharingStore::new());
        let user = User::new("u1", "global:member");

        let result = resolver
            .require(
                &user,
                &scopes(&["workflow:create"]),
                Some(&ResourceRef::Project("P1".into())),
                false,
            )
            .await;
        assert!(matches!(result, Err(AppError::AccessDenied(_))));

        let admin = User::new("u2", "global:admin");
        resolver
            .require(&admin, &scopes(&["workflow:create"]), None, false)
            .await
            .unwrap();
    }
}
