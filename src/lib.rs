//! flowgate
//!
//! Project-scoped authorization for a multi-tenant workflow automation
//! platform.
//!
//! ## Features
//!
//! - **Two-tier grants** - a platform-wide global role plus per-project roles,
//!   evaluated against an externally configured role → scope table
//! - **Resource indirection** - workflow and credential identifiers resolve to
//!   their owning project through sharing records before evaluation
//! - **Pluggable role sources** - the embedded per-user role list and the
//!   relational membership table are interchangeable behind one trait
//! - **Loud misconfiguration** - a check wired up without any resource
//!   identifier is an error, while an ordinary unauthorized attempt is a
//!   plain denial
//!
//! ## Example Configuration
//!
//! ```toml
//! [grants.global]
//! "global:admin" = ["workflow:read", "workflow:create", "credential:read"]
//!
//! [grants.project]
//! "project:admin" = ["workflow:read", "workflow:create"]
//! "project:viewer" = ["workflow:read"]
//! ```
//!
//! ## Running a check
//!
//! ```no_run
//! use flowgate::authz::{AccessResolver, EmbeddedRoleSource, GrantTable, ResourceRef, User};
//! use flowgate::store::InMemorySharingStore;
//! use std::sync::Arc;
//!
//! # async fn demo(grants: GrantTable) -> Result<(), flowgate::error::CheckError> {
//! let resolver = AccessResolver::new(
//!     grants,
//!     Arc::new(EmbeddedRoleSource),
//!     Arc::new(InMemorySharingStore::new()),
//! );
//!
//! let user = User::new("alice", "global:member").with_project_role("P1", "project:admin");
//! let decision = resolver
//!     .check(
//!         &user,
//!         &["workflow:create".to_string()],
//!         Some(&ResourceRef::Project("P1".into())),
//!         false,
//!     )
//!     .await?;
//! assert!(decision.is_granted());
//! # Ok(())
//! # }
//! ```

pub mod authz;
pub mod config;
pub mod error;
pub mod store;

// Re-export main types
pub use authz::{AccessDecision, AccessResolver, GrantTable, ResourceKind, ResourceRef, User};
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result};
