//! Core authorization vocabulary
//!
//! Types shared by the grant table, the role sources, and the resolver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a set of required scopes is combined when testing a role's grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeMode {
    /// Every required scope must be granted
    #[default]
    AllOf,
    /// At least one required scope must be granted
    AnyOf,
}

/// Resource kind a grant table is parameterized by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Project,
    Workflow,
    Credential,
}

impl ResourceKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Project => "project",
            ResourceKind::Workflow => "workflow",
            ResourceKind::Credential => "credential",
        }
    }

    /// Try to parse a kind from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "project" => Some(ResourceKind::Project),
            "workflow" => Some(ResourceKind::Workflow),
            "credential" => Some(ResourceKind::Credential),
            _ => None,
        }
    }

    /// Get all kinds
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Project,
            ResourceKind::Workflow,
            ResourceKind::Credential,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The resource an authorization check is about.
///
/// Exactly one identifier, enforced by the type: a check either names the
/// owning project directly or names a workflow or credential whose owning
/// project must be looked up through its sharing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    Project(String),
    Workflow(String),
    Credential(String),
}

impl ResourceRef {
    /// Build a reference from three optional identifiers, as they arrive in
    /// a request DTO. Precedence is fixed: project id wins over workflow id,
    /// which wins over credential id. Returns `None` when all three are
    /// absent.
    pub fn from_parts(
        project_id: Option<String>,
        workflow_id: Option<String>,
        credential_id: Option<String>,
    ) -> Option<Self> {
        if let Some(id) = project_id {
            Some(ResourceRef::Project(id))
        } else if let Some(id) = workflow_id {
            Some(ResourceRef::Workflow(id))
        } else {
            credential_id.map(ResourceRef::Credential)
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceRef::Project(_) => ResourceKind::Project,
            ResourceRef::Workflow(_) => ResourceKind::Workflow,
            ResourceRef::Credential(_) => ResourceKind::Credential,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ResourceRef::Project(id) | ResourceRef::Workflow(id) | ResourceRef::Credential(id) => {
                id
            }
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.id())
    }
}

/// A role held by a user within exactly one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRoleAssignment {
    pub project_id: String,
    pub role: String,
}

/// Snapshot of a user as the identity store hands it out.
///
/// `role` is the global role slug (e.g. `global:admin`); `project_roles`
/// holds at most one active role per project. The resolver only reads this
/// snapshot, never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    /// Global role slug
    pub role: String,

    /// Per-project role assignments; an absent list deserializes to empty
    #[serde(default)]
    pub project_roles: Vec<ProjectRoleAssignment>,
}

impl User {
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            project_roles: Vec::new(),
        }
    }

    /// Builder-style variant of [`User::assign_project_role`]
    pub fn with_project_role(
        mut self,
        project_id: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        self.assign_project_role(project_id, role);
        self
    }

    /// Assign a role within a project. A later assignment for the same
    /// project overwrites the earlier one; the list never holds two entries
    /// for one project.
    pub fn assign_project_role(&mut self, project_id: impl Into<String>, role: impl Into<String>) {
        let project_id = project_id.into();
        let role = role.into();
        if let Some(existing) = self
            .project_roles
            .iter_mut()
            .find(|a| a.project_id == project_id)
        {
            existing.role = role;
        } else {
            self.project_roles
                .push(ProjectRoleAssignment { project_id, role });
        }
    }

    /// The role this user holds in the given project, if any.
    ///
    /// First match wins; the at-most-one-per-project invariant makes the
    /// first match the only match.
    pub fn role_in_project(&self, project_id: &str) -> Option<&str> {
        self.project_roles
            .iter()
            .find(|a| a.project_id == project_id)
            .map(|a| a.role.as_str())
    }
}

/// Terminal result of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access is granted
    Granted,
    /// Access is denied with a reason
    Denied(String),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AccessDecision::Denied(_))
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessDecision::Granted => write!(f, "granted"),
            AccessDecision::Denied(reason) => write!(f, "denied: {}", reason),
        }
    }
}
