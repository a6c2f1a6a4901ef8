//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use geoscaff_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{GeoscaffError, GeoscaffResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> GeoscaffResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> GeoscaffResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> GeoscaffResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            let mode = if executable {
                perms.mode() | 0o111
            } else {
                perms.mode() & !0o111
            };
            perms.set_mode(mode);
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(windows)]
        {
            // Windows doesn't have executable bit in the same way
            let _ = (path, executable);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn copy_file(&self, from: &Path, to: &Path) -> GeoscaffResult<()> {
        std::fs::copy(from, to)
            .map(|bytes| trace!(from = %from.display(), to = %to.display(), bytes, "Copied"))
            .map_err(|e| map_io_error(to, e, "copy file"))
    }

    fn list_dirs(&self, path: &Path) -> GeoscaffResult<Vec<String>> {
        // Immediate children only; symlinks are not followed, matching `find -type d`.
        let mut names = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| GeoscaffError::from(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Failed to list directory: {}", e),
            }))?;
            if entry.file_type().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GeoscaffError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
