//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! high-level use cases: "generate the artifacts" and "configure the builds".

pub mod configure_service;
pub mod generate_service;

pub use configure_service::{
    ConfigureOutcome, ConfigureService, DEFAULT_BUILD_ROOT, MatrixReport, OptionsSource,
    TreeOutcome, TreeStatus,
};
pub use generate_service::{GenerateService, GenerationReport, WrittenArtifact};
