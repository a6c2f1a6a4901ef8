use std::fmt;
use std::path::{Path, PathBuf};

use super::DomainError;

/// A filesystem path guaranteed to be **relative**.
///
/// Every artifact lands beneath the project root; an absolute path would
/// escape it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Parent directory, if the path has more than one component.
    pub fn parent(&self) -> Option<&Path> {
        self.0.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Simplified permission model for generated artifacts.
///
/// Only the executable bit matters: `configure.sh` is run directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    executable: bool,
}

impl Permissions {
    pub const fn read_write() -> Self {
        Self { executable: false }
    }

    pub const fn executable() -> Self {
        Self { executable: true }
    }

    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}
