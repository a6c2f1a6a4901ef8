//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the
//! decision tables. Those are `DomainError` / `ConfigureError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while generating artifacts or driving the build matrix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The third-party dependency tree is not checked out.
    #[error("Dependency directory not found: {path}")]
    MissingDependency { path: PathBuf },

    /// `configure` was run before `new` wrote the platform-options file.
    #[error("Platform options file not found: {path}")]
    MissingPlatformOptions { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The build-system generator could not be started.
    #[error("Build generator '{program}' is not available: {reason}")]
    GeneratorUnavailable { program: String, reason: String },

    /// The generator ran but reported failure for one build tree.
    #[error("Build generator failed for {tree}: {reason}")]
    GeneratorFailed { tree: String, reason: String },

    /// The host identification query failed.
    #[error("Could not identify the host system: {reason}")]
    HostProbeFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingDependency { path } => vec![
                format!("Geogram is expected at: {}", path.display()),
                "git clone https://github.com/BrunoLevy/geogram.git ext/geogram".into(),
                "Or clone your project with --recursive to fetch submodules".into(),
            ],
            Self::MissingPlatformOptions { path } => vec![
                format!("Missing: {}", path.display()),
                "Run: geoscaff new <NAME> in the project root first".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::GeneratorUnavailable { program, .. } => vec![
                format!("'{}' could not be run", program),
                "Install CMake (see https://cmake.org/download/)".into(),
                "Or point configure.cmake at it in your geoscaff config".into(),
            ],
            Self::GeneratorFailed { tree, .. } => vec![
                format!("Inspect the CMake output for {}", tree),
                "Fix the reported problem and re-run; configuration is idempotent".into(),
            ],
            Self::HostProbeFailed { .. } => vec![
                "Pass the platform explicitly, e.g. Linux64-gcc-dynamic".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingDependency { .. } | Self::MissingPlatformOptions { .. } => {
                ErrorCategory::NotFound
            }
            Self::GeneratorUnavailable { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. }
            | Self::GeneratorFailed { .. }
            | Self::HostProbeFailed { .. } => ErrorCategory::Internal,
        }
    }
}
