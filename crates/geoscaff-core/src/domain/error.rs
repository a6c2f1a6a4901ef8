// ============================================================================
// domain/error.rs - DOMAIN AND CONFIGURE ERRORS
// ============================================================================

use thiserror::Error;

/// Errors raised while building artifacts from blueprints.
///
/// These are programming errors in the fixed blueprint set or invalid
/// paths, never user input problems.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid skeleton: {reason}")]
    InvalidSkeleton { reason: String },

    #[error("Unknown placeholder '{{{{{name}}}}}' in skeleton")]
    UnknownPlaceholder { name: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Duplicate artifact path: {path}")]
    DuplicatePath { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSkeleton { .. } | Self::UnknownPlaceholder { .. } => vec![
                "A built-in blueprint is malformed".into(),
                "Please report this issue".into(),
            ],
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("Artifact path '{}' must be relative", path),
                "Project names cannot start with a path separator".into(),
            ],
            Self::DuplicatePath { path } => vec![format!(
                "Two blueprints target '{}'; the blueprint table is inconsistent",
                path
            )],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}

/// Fatal outcomes of the configure option scan and platform detection.
///
/// Both abort the configure run before any build tree is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigureError {
    #[error("unrecognized option: {option}")]
    UnrecognizedOption { option: String },

    #[error("OS not supported: {identification}")]
    UnsupportedOs { identification: String },
}

impl ConfigureError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnrecognizedOption { option } => vec![
                format!("'{}' is not a configure option", option),
                "Options: --with-<key>[=<value>], --build_name_suffix=<suffix>".into(),
                "Use --help to print the usage page".into(),
            ],
            Self::UnsupportedOs { .. } => vec![
                "Autodetection supports Linux (x86_64, amd64, i586, i686) and Darwin".into(),
                "Pass the platform explicitly, e.g. Linux64-gcc-dynamic".into(),
                "Use --help-platforms to list the platforms Geogram ships".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_placeholder_message_keeps_braces() {
        let err = DomainError::UnknownPlaceholder {
            name: "AUTHOR".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown placeholder '{{AUTHOR}}' in skeleton"
        );
    }

    #[test]
    fn configure_errors_are_validation() {
        let err = ConfigureError::UnsupportedOs {
            identification: "SunOS box 5.11".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("SunOS"));
    }
}
