//! CMake adapter: runs the real generator as a child process.

use std::path::{self, Path};
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use geoscaff_core::{
    application::{ApplicationError, ports::BuildSystem},
    domain::configure::GeneratorInvocation,
    error::GeoscaffResult,
};

/// Default generator program.
pub const DEFAULT_PROGRAM: &str = "cmake";

/// Runs `cmake` (or a configured replacement) with inherited stdio so its
/// output reaches the user unchanged.
#[derive(Debug, Clone)]
pub struct CmakeBuildSystem {
    program: String,
}

impl CmakeBuildSystem {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CmakeBuildSystem {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl BuildSystem for CmakeBuildSystem {
    fn probe(&self) -> GeoscaffResult<String> {
        let unavailable = |reason: String| ApplicationError::GeneratorUnavailable {
            program: self.program.clone(),
            reason,
        };

        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| unavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(unavailable(format!("--version exited with {}", output.status)).into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    #[instrument(skip_all, fields(tree = %invocation.tree.label()))]
    fn generate(&self, invocation: &GeneratorInvocation<'_>) -> GeoscaffResult<()> {
        let tree = invocation.tree.label();

        // The child runs inside the build tree, so a relative source
        // directory would resolve against the wrong place.
        let source_dir = absolute(invocation.source_dir)?;
        let invocation = GeneratorInvocation {
            source_dir: &source_dir,
            ..*invocation
        };
        let args = invocation.arguments();
        debug!(program = %self.program, ?args, dir = %invocation.tree.directory.display(), "Running generator");

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(&invocation.tree.directory)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| ApplicationError::GeneratorUnavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ApplicationError::GeneratorFailed {
                tree,
                reason: format!("{} exited with {}", self.program, status),
            }
            .into())
        }
    }
}

fn absolute(dir: &Path) -> GeoscaffResult<std::path::PathBuf> {
    path::absolute(dir).map_err(|e| {
        ApplicationError::FilesystemError {
            path: dir.to_path_buf(),
            reason: format!("Failed to resolve path: {}", e),
        }
        .into()
    })
}
