//! Configure step: option translation, platform detection, build matrix.
//!
//! The same decision tables are emitted as shell text in `configure.sh`
//! and run natively by `geoscaff configure`.

pub mod matrix;
pub mod options;
pub mod platform;
pub mod usage;

pub use matrix::{BuildConfiguration, BuildTree, GeneratorInvocation, plan};
pub use options::{
    ConfigureRequest, OPTION_PREFIX, OptionAssignment, OptionValue, ScanOutcome, Token, classify,
    translate,
};
pub use platform::{
    DETECTION_RULES, DetectedPlatform, PLATFORM_SENTINEL, PLATFORMS_DIR, PlatformTag, detect,
    supported_platforms,
};
pub use usage::{completion_text, usage_text};
