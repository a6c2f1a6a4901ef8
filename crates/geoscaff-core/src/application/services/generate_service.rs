//! Generate Service - writes the artifact set for one project.
//!
//! Workflow:
//! 1. Render every blueprint for the identity
//! 2. Check the dependency tree is present (before any write)
//! 3. Overwrite each artifact, creating parent directories as needed

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        Artifact, ArtifactKind, DEPENDENCY_DIR, ProjectIdentity, emit_all, validate_artifacts,
    },
    error::GeoscaffResult,
};

/// One artifact as it landed on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Summary of a generate run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub written: Vec<WrittenArtifact>,
}

impl GenerationReport {
    pub fn file_count(&self) -> usize {
        self.written.len()
    }
}

pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Render every artifact without touching the filesystem.
    pub fn preview(&self, identity: &ProjectIdentity) -> GeoscaffResult<Vec<Artifact>> {
        let artifacts = emit_all(identity)?;
        validate_artifacts(&artifacts)?;
        Ok(artifacts)
    }

    /// Write every artifact beneath `root`.
    pub fn generate(
        &self,
        identity: &ProjectIdentity,
        root: &Path,
    ) -> GeoscaffResult<GenerationReport> {
        self.generate_with(identity, root, |_| {})
    }

    /// Like [`Self::generate`], calling `on_written` after each file.
    #[instrument(skip_all, fields(project = %identity, root = %root.display()))]
    pub fn generate_with<F>(
        &self,
        identity: &ProjectIdentity,
        root: &Path,
        mut on_written: F,
    ) -> GeoscaffResult<GenerationReport>
    where
        F: FnMut(&WrittenArtifact),
    {
        let artifacts = self.preview(identity)?;
        self.check_dependency(root, &artifacts)?;

        let mut report = GenerationReport::default();
        for artifact in &artifacts {
            let written = self.write_artifact(root, artifact)?;
            on_written(&written);
            report.written.push(written);
        }

        info!(files = report.file_count(), "Artifacts written");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn check_dependency(&self, root: &Path, artifacts: &[Artifact]) -> GeoscaffResult<()> {
        if !artifacts.iter().any(|a| a.kind.requires_dependency()) {
            return Ok(());
        }
        let dependency = root.join(DEPENDENCY_DIR);
        if !self.filesystem.is_dir(&dependency) {
            return Err(ApplicationError::MissingDependency { path: dependency }.into());
        }
        Ok(())
    }

    fn write_artifact(&self, root: &Path, artifact: &Artifact) -> GeoscaffResult<WrittenArtifact> {
        let path = root.join(artifact.path.as_path());

        if let Some(parent) = artifact.path.parent() {
            self.filesystem.create_dir_all(&root.join(parent))?;
        }

        self.filesystem.write_file(&path, &artifact.content)?;

        if artifact.permissions.executable_flag() {
            self.filesystem.set_permissions(&path, true)?;
        }

        debug!(kind = %artifact.kind, path = %path.display(), bytes = artifact.size(), "Wrote artifact");

        Ok(WrittenArtifact {
            kind: artifact.kind,
            path,
            bytes: artifact.size(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::error::GeoscaffError;
    use mockall::predicate::*;

    fn service(fs: MockFilesystem) -> GenerateService {
        GenerateService::new(Box::new(fs))
    }

    #[test]
    fn missing_dependency_fails_before_any_write() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir()
            .with(eq(Path::new("/proj/ext/geogram")))
            .return_const(false);
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        let err = service(fs)
            .generate(&ProjectIdentity::derive("demo"), Path::new("/proj"))
            .unwrap_err();

        assert_eq!(
            err,
            GeoscaffError::Application(ApplicationError::MissingDependency {
                path: PathBuf::from("/proj/ext/geogram"),
            })
        );
    }

    #[test]
    fn writes_every_artifact_and_marks_script_executable() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .times(ArtifactKind::ALL.len())
            .returning(|_, _| Ok(()));
        fs.expect_set_permissions()
            .with(eq(Path::new("/proj/configure.sh")), eq(true))
            .times(1)
            .returning(|_, _| Ok(()));

        let report = service(fs)
            .generate(&ProjectIdentity::derive("demo"), Path::new("/proj"))
            .unwrap();

        assert_eq!(report.file_count(), 6);
        assert_eq!(report.written[0].path, PathBuf::from("/proj/cmake/demo.cmake"));
        assert_eq!(report.written[3].path, PathBuf::from("/proj/CMakeLists.txt"));
    }

    #[test]
    fn write_failure_aborts_the_run() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });

        let result = service(fs).generate(&ProjectIdentity::derive("demo"), Path::new("/proj"));
        assert!(matches!(
            result,
            Err(GeoscaffError::Application(ApplicationError::FilesystemError { .. }))
        ));
    }

    #[test]
    fn progress_callback_sees_each_file_in_order() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_set_permissions().returning(|_, _| Ok(()));

        let mut seen = Vec::new();
        service(fs)
            .generate_with(&ProjectIdentity::derive("demo"), Path::new("."), |w| {
                seen.push(w.kind)
            })
            .unwrap();

        assert_eq!(seen, ArtifactKind::ALL.to_vec());
    }

    #[test]
    fn preview_does_not_touch_filesystem() {
        let fs = MockFilesystem::new();
        let artifacts = service(fs).preview(&ProjectIdentity::derive("demo")).unwrap();
        assert_eq!(artifacts.len(), 6);
    }
}
