//! Build matrix: one build tree per configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::configure::{
    options::{BUILD_TYPE_VARIABLE, OptionAssignment},
    platform::PlatformTag,
};

/// Variable carrying the platform tag into Geogram's CMake scripts.
pub const PLATFORM_VARIABLE: &str = "VORPALINE_PLATFORM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildConfiguration {
    Release,
    Debug,
}

impl BuildConfiguration {
    /// Every configuration, in the order the trees are generated.
    pub const ALL: [BuildConfiguration; 2] = [Self::Release, Self::Debug];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "Release",
            Self::Debug => "Debug",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTree {
    pub platform: PlatformTag,
    pub configuration: BuildConfiguration,
    pub suffix: String,
    pub directory: PathBuf,
}

impl BuildTree {
    pub fn new(
        build_root: &Path,
        platform: PlatformTag,
        configuration: BuildConfiguration,
        suffix: impl Into<String>,
    ) -> Self {
        let suffix = suffix.into();
        let directory = build_root.join(dir_name(&platform, configuration, &suffix));
        Self {
            platform,
            configuration,
            suffix,
            directory,
        }
    }

    /// `<platform>-<configuration>`, as printed in progress banners.
    pub fn label(&self) -> String {
        format!("{}-{}", self.platform, self.configuration)
    }
}

/// `<platform>-<configuration><suffix>`.
pub fn dir_name(platform: &PlatformTag, configuration: BuildConfiguration, suffix: &str) -> String {
    format!("{platform}-{configuration}{suffix}")
}

/// Lay out every tree for one platform, Release first.
pub fn plan(build_root: &Path, platform: &PlatformTag, suffix: &str) -> Vec<BuildTree> {
    BuildConfiguration::ALL
        .iter()
        .map(|&config| BuildTree::new(build_root, platform.clone(), config, suffix))
        .collect()
}

/// One call of the downstream generator inside one build tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInvocation<'a> {
    pub tree: &'a BuildTree,
    pub assignments: &'a [OptionAssignment],
    pub source_dir: &'a Path,
}

impl GeneratorInvocation<'_> {
    /// Command-line arguments for the generator.
    ///
    /// The tree's own build type and platform come after the accumulated
    /// assignments so they win over the seeded default.
    pub fn arguments(&self) -> Vec<String> {
        let mut args: Vec<String> = self.assignments.iter().map(|a| a.to_define()).collect();
        args.push(
            OptionAssignment::text(BUILD_TYPE_VARIABLE, self.tree.configuration.as_str())
                .to_define(),
        );
        args.push(OptionAssignment::text(PLATFORM_VARIABLE, self.tree.platform.as_str()).to_define());
        args.push(self.source_dir.display().to_string());
        args
    }
}
