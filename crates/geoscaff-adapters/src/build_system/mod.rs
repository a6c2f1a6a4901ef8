//! Build-system adapters.

mod cmake;
mod recording;

pub use cmake::CmakeBuildSystem;
pub use recording::{RecordedRun, RecordingBuildSystem};
