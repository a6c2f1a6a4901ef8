//! Unified error handling for geoscaff-core.
//!
//! This module provides a unified error type that wraps domain, configure
//! and application errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{ConfigureError, DomainError};

/// Root error type for geoscaff-core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeoscaffError {
    /// A blueprint or artifact path is invalid.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The configure option scan or platform detection failed.
    #[error("Configure error: {0}")]
    Configure(#[from] ConfigureError),

    /// Orchestration or I/O failed.
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl GeoscaffError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Configure(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in geoscaff".into(),
                "Please report this issue at: https://github.com/cosecruz/geoscaff/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Configure(_) => ErrorCategory::Validation,
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type GeoscaffResult<T> = Result<T, GeoscaffError>;
