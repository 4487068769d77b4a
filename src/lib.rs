//! Back office service for dating-app onboarding content.
//!
//! The crate manages eight onboarding taxonomies (gender, sexual orientation,
//! lifestyle, ...), the employees who curate them, and the roles that grant
//! those employees per-module capabilities.
//!
//! Employees authenticate with email and password and receive a signed session
//! token carrying a snapshot of their role's capability matrix. Every protected
//! route checks that snapshot; role changes apply on the next login.
//!
//! # Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `axum_api` | HTTP routes, handlers and the session extractor |
//! | `mocks` | In-memory repositories |
//! | `postgres` | `sqlx` repositories storing documents as JSONB |
//! | `tracing` | Span instrumentation and the tracing event listener |

pub mod access;
pub mod actions;
pub mod api;
pub mod config;
pub mod crypto;
pub mod events;
pub mod jwt;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod repository;
pub mod secret;
pub mod session;
pub mod taxonomy;
pub mod validators;

pub use access::{AccessAction, ActionSet, CapabilityMatrix, Principal};
pub use events::{register_event_listeners, AdminEvent};
pub use repository::{
    Employee, EmployeeRepository, EmployeeRole, RoleRepository, TaxonomyRepository,
};
#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockEmployeeRepository, MockRoleRepository, MockTaxonomyRepository};
pub use secret::SecretString;
pub use taxonomy::{TaxonomyDocument, TaxonomyKind, TaxonomyOption};
pub use validators::FieldErrors;

use std::fmt;

/// Every failure the back office can report.
///
/// The HTTP layer maps each variant onto a status code; infrastructure
/// variants never leak their detail to clients.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminError {
    Validation(FieldErrors),
    NotFound(String),
    Unauthorized,
    InvalidCredentials,
    AccountInactive,
    Forbidden,
    Conflict(String),
    PasswordHashError,
    ConfigurationError(String),
    DatabaseError(String),
    Internal(String),
}

impl AdminError {
    /// Shorthand for a validation failure on a single field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        Self::Validation(errors)
    }

    /// Infrastructure failures that clients only ever see as a generic 500.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::PasswordHashError
                | Self::ConfigurationError(_)
                | Self::DatabaseError(_)
                | Self::Internal(_)
        )
    }
}

impl std::error::Error for AdminError {}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminError::Validation(_) => write!(f, "Validation failed"),
            AdminError::NotFound(msg) | AdminError::Conflict(msg) => write!(f, "{msg}"),
            AdminError::Unauthorized => write!(f, "Unauthorized"),
            AdminError::InvalidCredentials => write!(f, "Invalid credentials"),
            AdminError::AccountInactive => write!(f, "Account is inactive"),
            AdminError::Forbidden => write!(f, "Access denied"),
            AdminError::PasswordHashError => write!(f, "Failed to hash password"),
            AdminError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            AdminError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            AdminError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}
