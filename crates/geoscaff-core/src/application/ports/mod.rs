//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `geoscaff-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `BuildSystem`: CMake generation inside one build tree
//!   - `HostProbe`: Raw system identification for platform detection

pub mod output;

pub use output::{BuildSystem, Filesystem, HostProbe};

#[cfg(test)]
pub use output::{MockFilesystem, MockHostProbe};
