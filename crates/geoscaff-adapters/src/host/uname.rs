//! `uname -a` probe.

use std::process::{Command, Stdio};

use tracing::debug;

use geoscaff_core::{
    application::{ApplicationError, ports::HostProbe},
    error::GeoscaffResult,
};

/// Asks the running kernel for its identification string.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnameProbe;

impl UnameProbe {
    pub fn new() -> Self {
        Self
    }
}

impl HostProbe for UnameProbe {
    fn system_identification(&self) -> GeoscaffResult<String> {
        let output = Command::new("uname")
            .arg("-a")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::HostProbeFailed {
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ApplicationError::HostProbeFailed {
                reason: format!("uname exited with {}", output.status),
            }
            .into());
        }

        let ident = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(%ident, "Host identified");
        Ok(ident)
    }
}
