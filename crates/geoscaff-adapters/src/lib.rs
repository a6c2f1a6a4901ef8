//! Infrastructure adapters for geoscaff.
//!
//! This crate implements the ports defined in `geoscaff-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod build_system;
pub mod filesystem;
pub mod host;

// Re-export commonly used adapters
pub use build_system::{CmakeBuildSystem, RecordedRun, RecordingBuildSystem};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use host::{FixedHostProbe, UnameProbe};
