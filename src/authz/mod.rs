//! Authorization module
//!
//! Decides whether a user may perform an action on a shared resource.
//!
//! ## Model
//!
//! A **scope** is an atomic capability slug (`workflow:create`). Roles grant
//! scopes through an externally configured grant table, in two flavors:
//!
//! - the user's single **global role**, granting scopes platform-wide
//! - a **project role**, held per project and granting scopes only on that
//!   project's resources
//!
//! A check names its resource with exactly one identifier. Workflows and
//! credentials are owned by projects, so those identifiers are first mapped
//! to the owning project through their sharing records:
//!
//! ```text
//! global role → project id (direct, or via sharing record) → project role
//! ```
//!
//! A global-only check stops after the first step. A check that supplies no
//! identifier at all fails with an error rather than a denial.

pub mod grants;
pub mod resolver;
pub mod roles;
pub mod types;

pub use grants::GrantTable;
pub use resolver::AccessResolver;
pub use roles::{
    ChainedRoleSource, EmbeddedRoleSource, MembershipRoleSource, ProjectRoleSource,
    SharedRoleSource,
};
pub use types::{
    AccessDecision, ProjectRoleAssignment, ResourceKind, ResourceRef, ScopeMode, User,
};
