//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `geoscaff-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::configure::GeneratorInvocation;
use crate::error::GeoscaffResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `geoscaff_adapters::filesystem::LocalFilesystem` (production)
/// - `geoscaff_adapters::filesystem::MemoryFilesystem` (testing)
///
/// `create_dir_all` must treat an existing directory as success and
/// `write_file` must truncate: every run is a full overwrite.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GeoscaffResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> GeoscaffResult<()>;

    /// Set or clear the executable bit.
    fn set_permissions(&self, path: &Path, executable: bool) -> GeoscaffResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Copy a file, replacing the destination.
    fn copy_file(&self, from: &Path, to: &Path) -> GeoscaffResult<()>;

    /// Names of the immediate subdirectories of `path`.
    fn list_dirs(&self, path: &Path) -> GeoscaffResult<Vec<String>>;
}

/// Port for the downstream build-system generator (CMake).
///
/// Implemented by:
/// - `geoscaff_adapters::build_system::CmakeBuildSystem` (production)
/// - `geoscaff_adapters::build_system::RecordingBuildSystem` (testing)
pub trait BuildSystem: Send + Sync {
    /// Check the generator is installed; returns its version banner.
    fn probe(&self) -> GeoscaffResult<String>;

    /// Run the generator once inside `invocation.tree.directory`.
    fn generate(&self, invocation: &GeneratorInvocation<'_>) -> GeoscaffResult<()>;
}

/// Port for the host system-identification query (`uname -a`).
#[cfg_attr(test, mockall::automock)]
pub trait HostProbe: Send + Sync {
    fn system_identification(&self) -> GeoscaffResult<String>;
}
