//! Recording build system for tests and dry runs.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use geoscaff_core::{
    application::{ApplicationError, ports::BuildSystem},
    domain::configure::{BuildConfiguration, GeneratorInvocation},
    error::{GeoscaffError, GeoscaffResult},
};

/// One generator call as seen by [`RecordingBuildSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRun {
    pub directory: PathBuf,
    pub configuration: BuildConfiguration,
    pub arguments: Vec<String>,
}

/// Never spawns a process; remembers every invocation instead.
///
/// Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingBuildSystem {
    runs: Arc<Mutex<Vec<RecordedRun>>>,
    failing: Vec<BuildConfiguration>,
    unavailable: bool,
}

impl RecordingBuildSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `generate` fail for this configuration.
    pub fn failing_on(mut self, configuration: BuildConfiguration) -> Self {
        self.failing.push(configuration);
        self
    }

    /// Make `probe` fail as if the generator were not installed.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl BuildSystem for RecordingBuildSystem {
    fn probe(&self) -> GeoscaffResult<String> {
        if self.unavailable {
            return Err(ApplicationError::GeneratorUnavailable {
                program: "recording".into(),
                reason: "marked unavailable".into(),
            }
            .into());
        }
        Ok("recording build system".into())
    }

    fn generate(&self, invocation: &GeneratorInvocation<'_>) -> GeoscaffResult<()> {
        let configuration = invocation.tree.configuration;
        self.runs
            .lock()
            .map_err(|_| GeoscaffError::Internal {
                message: "recording log lock poisoned".into(),
            })?
            .push(RecordedRun {
                directory: invocation.tree.directory.clone(),
                configuration,
                arguments: invocation.arguments(),
            });

        if self.failing.contains(&configuration) {
            return Err(ApplicationError::GeneratorFailed {
                tree: invocation.tree.label(),
                reason: "configured to fail".into(),
            }
            .into());
        }
        Ok(())
    }
}
