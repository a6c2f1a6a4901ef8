//! Core domain layer for geoscaff.
//!
//! Pure logic only: no filesystem, no processes. I/O goes through the
//! ports defined in the application layer.
//!
//! - **identity**: the name-derived tokens
//! - **skeleton** / **blueprint** / **artifact**: what gets written where
//! - **configure**: the decision tables behind `configure.sh`

pub mod artifact;
pub mod blueprint;
pub mod common;
pub mod configure;
pub mod error;
pub mod identity;
pub mod skeleton;

pub use artifact::{Artifact, ArtifactKind, validate_artifacts};
pub use blueprint::{Blueprint, DEPENDENCY_DIR, blueprints, emit_all};
pub use common::{Permissions, RelativePath};
pub use error::{ConfigureError, DomainError, ErrorCategory};
pub use identity::ProjectIdentity;
pub use skeleton::{Placeholder, Skeleton};
