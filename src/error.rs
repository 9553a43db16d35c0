//! Error types for flowgate
//!
//! This module defines the error hierarchy used throughout the crate.
//! We use `thiserror` for library-style errors that are part of the API.
//!
//! One distinction matters more than the rest: an unauthorized access
//! attempt is a *denial*, returned as a plain value from the resolver,
//! while a check that was wired up without any resource identifier is a
//! [`CheckError::MissingResourceId`], a defect in the caller that must
//! surface loudly during development instead of masquerading as a denial.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authorization check error: {0}")]
    Check(#[from] CheckError),

    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessDeniedError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by an authorization check itself.
///
/// Lookup failures from the underlying stores pass through unchanged; the
/// resolver never catches or reinterprets them.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The caller asked for a project-scoped check but supplied no project,
    /// workflow, or credential identifier. This is a route-wiring defect,
    /// not a runtime denial.
    #[error("no resource identifier supplied for a project-scoped check")]
    MissingResourceId,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of the external lookup backends.
///
/// "Record not found" is not an error at this layer; lookups return
/// `Ok(None)` for a missing sharing or membership record.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),

    #[error("store query failed: {0}")]
    Query(String),
}

/// Denial expressed as an error, for callers that want to `?` their way out
/// of a handler. Produced by [`crate::authz::AccessResolver::require`];
/// the resolver's `check` path never raises it.
#[derive(Error, Debug)]
#[error("required scopes {scopes:?} not granted: {reason}")]
pub struct AccessDeniedError {
    pub scopes: Vec<String>,
    pub reason: String,
}

impl AccessDeniedError {
    pub fn new(scopes: impl Into<Vec<String>>, reason: impl Into<String>) -> Self {
        Self {
            scopes: scopes.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
