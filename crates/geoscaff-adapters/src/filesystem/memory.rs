//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use geoscaff_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{GeoscaffError, GeoscaffResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can hand one clone to a
/// service and inspect the other.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a directory (and its ancestors).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.add_dir(path.as_ref());
        }
        self
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dir(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path))
            .unwrap_or(false)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error() -> GeoscaffError {
    GeoscaffError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

fn missing_parent(path: &Path) -> GeoscaffError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "Parent directory does not exist".into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> GeoscaffResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.add_dir(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> GeoscaffResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(missing_parent(path));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> GeoscaffResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> GeoscaffResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;

        let content = inner.files.get(from).cloned().ok_or_else(|| {
            GeoscaffError::from(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "No such file".into(),
            })
        })?;
        if let Some(parent) = to.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(missing_parent(to));
            }
        }

        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn list_dirs(&self, path: &Path) -> GeoscaffResult<Vec<String>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        Ok(inner
            .directories
            .iter()
            .filter(|d| d.parent() == Some(path))
            .filter_map(|d| d.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/a/b.txt")).as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_storage() {
        let fs = MemoryFilesystem::new().with_dir("/p");
        let view = fs.clone();
        fs.write_file(Path::new("/p/f"), "1").unwrap();
        assert!(view.exists(Path::new("/p/f")));
    }

    #[test]
    fn list_dirs_returns_immediate_children() {
        let fs = MemoryFilesystem::new()
            .with_dir("/r/a/deep")
            .with_dir("/r/b")
            .with_file("/r/file.txt", "");

        assert_eq!(
            fs.list_dirs(Path::new("/r")).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn copy_file_duplicates_content() {
        let fs = MemoryFilesystem::new().with_file("/d/src", "opts");
        fs.copy_file(Path::new("/d/src"), Path::new("/d/dst")).unwrap();
        assert_eq!(fs.read_file(Path::new("/d/dst")).as_deref(), Some("opts"));
    }
}
