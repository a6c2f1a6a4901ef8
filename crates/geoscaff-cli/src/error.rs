//! Error handling for the geoscaff CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use geoscaff_core::error::GeoscaffError;

// Re-export so callers only need `use crate::error::*`.
pub use geoscaff_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Project name validation failed.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `geoscaff-core`.
    #[error("{0}")]
    Core(#[from] GeoscaffError),

    /// The build matrix ran but at least one tree failed to configure.
    #[error("CMake failed for: {}", trees.join(", "))]
    TreesFailed { trees: Vec<String> },

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "The name is used in file names and CMake identifiers".into(),
                "Examples: polycube, mesh_tool, remesh2".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check the file printed by 'geoscaff config path'".into(),
                "Use 'geoscaff init --force' to recreate a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::TreesFailed { .. } => vec![
                "Read the CMake output above for the failing configuration".into(),
                "The other configuration was still generated".into(),
                "Re-run 'geoscaff configure' once the problem is fixed".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{}' feature is not available in this build", feature),
                format!(
                    "Install with the feature enabled: cargo install geoscaff-cli --features {}",
                    feature
                ),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::TreesFailed { .. } => ErrorCategory::BuildFailed,
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Build failed  |  5   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::BuildFailed => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Render the message, the cause chain (verbose only) and the
    /// suggestions as one block for stderr.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = Paint(color);
        let mut out = format!("\n{}\n", paint.red(&format!("\u{2717} Error: {self}")));

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!("  {}\n", paint.dim(&format!("caused by: {err}"))));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", paint.yellow("Suggestions:")));
            for line in &suggestions {
                out.push_str(&format!("  - {line}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint.dim("Run again with -v for the full cause chain.")
            ));
        }
        out
    }

    /// Emit the error as a tracing event at a level matching its category.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, error = %self, "command rejected")
            }
            _ => tracing::error!(?category, error = %self, "command failed"),
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "underlying cause");
        }
    }
}

/// Applies owo-colors styles only when colour is wanted.
#[derive(Clone, Copy)]
struct Paint(bool);

impl Paint {
    fn red(self, text: &str) -> String {
        if self.0 { text.red().bold().to_string() } else { text.to_owned() }
    }

    fn yellow(self, text: &str) -> String {
        if self.0 { text.yellow().bold().to_string() } else { text.to_owned() }
    }

    fn dim(self, text: &str) -> String {
        if self.0 { text.dimmed().to_string() } else { text.to_owned() }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// One or more build trees failed to configure.
    BuildFailed,
    /// Internal/system error.
    Internal,
}
