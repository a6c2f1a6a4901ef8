//! Command handlers, one module per subcommand.
//!
//! Each handler translates parsed arguments into core calls and renders the
//! result. No decision logic lives here.

pub mod completions;
pub mod config;
pub mod configure;
pub mod init;
pub mod new;
pub mod show;

use std::path::PathBuf;

use geoscaff_core::domain::ProjectIdentity;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Validate a project name and derive its identity.
///
/// The name becomes a path component, so separators are rejected here;
/// anything else is passed through untouched.
pub fn identity_for(name: &str) -> CliResult<ProjectIdentity> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot contain path separators".into(),
        });
    }
    Ok(ProjectIdentity::derive(name))
}

/// `--root` if given, else `project.root` from the config.
pub fn project_root(flag: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    flag.unwrap_or_else(|| config.project.root.clone())
}
