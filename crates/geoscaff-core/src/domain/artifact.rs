use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{
    common::{Permissions, RelativePath},
    error::DomainError,
};

/// Which generated file an artifact is.
///
/// Declaration order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// `cmake/<name>.cmake`
    BuildRoot,
    /// `cmake/<name>_config.cmake`
    BuildRootConfig,
    /// `ext/geogram/CMakeOptions.txt.<name>`
    PlatformOptions,
    /// `CMakeLists.txt`
    TopLevel,
    /// `configure.sh`
    ConfigureScript,
    /// `app/simple_mesh_app.cpp`
    AppStub,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 6] = [
        Self::BuildRoot,
        Self::BuildRootConfig,
        Self::PlatformOptions,
        Self::TopLevel,
        Self::ConfigureScript,
        Self::AppStub,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuildRoot => "build-root",
            Self::BuildRootConfig => "build-root-config",
            Self::PlatformOptions => "platform-options",
            Self::TopLevel => "top-level",
            Self::ConfigureScript => "configure-script",
            Self::AppStub => "app-stub",
        }
    }

    /// Whether the artifact is written into the third-party dependency tree.
    pub const fn requires_dependency(&self) -> bool {
        matches!(self, Self::PlatformOptions)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s.to_ascii_lowercase())
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown artifact '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// One file to write: fully rendered, ready for the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: RelativePath,
    pub content: String,
    pub permissions: Permissions,
}

impl Artifact {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Reject artifact sets where two artifacts would overwrite each other.
pub fn validate_artifacts(artifacts: &[Artifact]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for artifact in artifacts {
        if !seen.insert(artifact.path.as_path()) {
            return Err(DomainError::DuplicatePath {
                path: artifact.path.to_string(),
            });
        }
    }
    Ok(())
}
