//! Application layer for geoscaff.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, ConfigureService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! decision tables itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ConfigureOutcome, ConfigureService, GenerateService, GenerationReport, MatrixReport,
    OptionsSource, TreeOutcome, TreeStatus, WrittenArtifact,
};

pub use ports::{BuildSystem, Filesystem, HostProbe};

pub use error::ApplicationError;
