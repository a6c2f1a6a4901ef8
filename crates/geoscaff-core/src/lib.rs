//! Geoscaff Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for geoscaff,
//! a generator that lays down the CMake build files of a Geogram-based
//! project and configures its Release/Debug build trees.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           geoscaff-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerateService, ConfigureService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, BuildSystem, HostProbe)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    geoscaff-adapters (Infrastructure)   │
//! │ (LocalFilesystem, CmakeBuildSystem, ..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectIdentity, Blueprint, configure) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use geoscaff_core::prelude::*;
//! # fn run(filesystem: Box<dyn Filesystem>) -> GeoscaffResult<()> {
//! let identity = ProjectIdentity::derive("polycube");
//! let service = GenerateService::new(filesystem);
//! service.generate(&identity, std::path::Path::new("."))?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigureOutcome, ConfigureService, GenerateService, GenerationReport, MatrixReport,
        TreeStatus,
        ports::{BuildSystem, Filesystem, HostProbe},
    };
    pub use crate::domain::{Artifact, ArtifactKind, ProjectIdentity};
    pub use crate::error::{GeoscaffError, GeoscaffResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
