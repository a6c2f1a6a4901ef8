//! Fixed identification, for tests and cross-configuring.

use geoscaff_core::{application::ports::HostProbe, error::GeoscaffResult};

#[derive(Debug, Clone)]
pub struct FixedHostProbe(String);

impl FixedHostProbe {
    pub fn new(identification: impl Into<String>) -> Self {
        Self(identification.into())
    }
}

impl HostProbe for FixedHostProbe {
    fn system_identification(&self) -> GeoscaffResult<String> {
        Ok(self.0.clone())
    }
}
