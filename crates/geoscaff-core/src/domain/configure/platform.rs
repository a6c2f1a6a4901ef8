//! Platform autodetection and platform listing.

use std::fmt;

use serde::Serialize;

use crate::domain::error::ConfigureError;

/// Directory (relative to the project root) whose subdirectories are the
/// platforms Geogram ships build settings for.
pub const PLATFORMS_DIR: &str = "ext/geogram/cmake/platforms";

/// Placeholder entry in [`PLATFORMS_DIR`] that is not a real platform.
pub const PLATFORM_SENTINEL: &str = "xxx";

/// The closed set of platforms the autodetector can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DetectedPlatform {
    Linux64GccDynamic,
    Linux32GccDynamic,
    DarwinClangDynamic,
}

impl DetectedPlatform {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linux64GccDynamic => "Linux64-gcc-dynamic",
            Self::Linux32GccDynamic => "Linux32-gcc-dynamic",
            Self::DarwinClangDynamic => "Darwin-clang-dynamic",
        }
    }
}

impl fmt::Display for DetectedPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the detection table.
///
/// Matches when the identification contains `kernel` and, if `any_of` is
/// non-empty, at least one of its entries.
#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub kernel: &'static str,
    pub any_of: &'static [&'static str],
    pub platform: DetectedPlatform,
}

impl DetectionRule {
    pub fn matches(&self, identification: &str) -> bool {
        identification.contains(self.kernel)
            && (self.any_of.is_empty() || self.any_of.iter().any(|a| identification.contains(a)))
    }
}

/// Ordered detection table; the first matching rule wins.
pub const DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        kernel: "Linux",
        any_of: &["x86_64", "amd64"],
        platform: DetectedPlatform::Linux64GccDynamic,
    },
    DetectionRule {
        kernel: "Linux",
        any_of: &["i586", "i686"],
        platform: DetectedPlatform::Linux32GccDynamic,
    },
    DetectionRule {
        kernel: "Darwin",
        any_of: &[],
        platform: DetectedPlatform::DarwinClangDynamic,
    },
];

/// Map a raw system identification (`uname -a`) to a platform.
///
/// There is no fallback: an unmatched string is always fatal.
pub fn detect(identification: &str) -> Result<DetectedPlatform, ConfigureError> {
    DETECTION_RULES
        .iter()
        .find(|rule| rule.matches(identification))
        .map(|rule| rule.platform)
        .ok_or_else(|| ConfigureError::UnsupportedOs {
            identification: identification.trim().to_string(),
        })
}

/// The platform a configure run builds for.
///
/// Explicit overrides are passed through untouched; Geogram may ship
/// platforms the autodetector never produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlatformTag(String);

impl PlatformTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<DetectedPlatform> for PlatformTag {
    fn from(platform: DetectedPlatform) -> Self {
        Self(platform.as_str().to_string())
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn a directory listing of [`PLATFORMS_DIR`] into the supported set.
pub fn supported_platforms<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut platforms: Vec<String> = entries
        .into_iter()
        .map(Into::into)
        .filter(|name| name != PLATFORM_SENTINEL)
        .collect();
    platforms.sort();
    platforms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_x86_64_is_64_bit() {
        let ident = "Linux build01 6.1.0-18-amd64 #1 SMP Debian x86_64 GNU/Linux";
        assert_eq!(detect(ident).unwrap(), DetectedPlatform::Linux64GccDynamic);
    }

    #[test]
    fn linux_amd64_alone_is_64_bit() {
        let ident = "Linux host 5.10.0-amd64 #1 SMP";
        assert_eq!(detect(ident).unwrap(), DetectedPlatform::Linux64GccDynamic);
    }

    #[test]
    fn linux_i686_is_32_bit() {
        for ident in ["Linux old 4.9.0 #1 SMP i686 GNU/Linux", "Linux older 2.6 i586"] {
            assert_eq!(detect(ident).unwrap(), DetectedPlatform::Linux32GccDynamic);
        }
    }

    #[test]
    fn darwin_is_clang() {
        let ident = "Darwin mac.local 23.4.0 Darwin Kernel Version 23.4.0 arm64";
        assert_eq!(detect(ident).unwrap(), DetectedPlatform::DarwinClangDynamic);
    }

    #[test]
    fn linux_on_unknown_arch_is_fatal() {
        assert!(matches!(
            detect("Linux pi 6.6.20 #1 SMP aarch64 GNU/Linux"),
            Err(ConfigureError::UnsupportedOs { .. })
        ));
    }

    #[test]
    fn solaris_is_fatal() {
        let err = detect("SunOS host 5.11 11.4 sun4v sparc\n").unwrap_err();
        assert_eq!(
            err,
            ConfigureError::UnsupportedOs {
                identification: "SunOS host 5.11 11.4 sun4v sparc".into()
            }
        );
    }

    #[test]
    fn sixty_four_bit_rule_wins_over_thirty_two() {
        // Multilib kernels can mention both.
        let ident = "Linux host 5.4 i686 x86_64";
        assert_eq!(detect(ident).unwrap(), DetectedPlatform::Linux64GccDynamic);
    }

    #[test]
    fn platform_tag_from_detected() {
        let tag: PlatformTag = DetectedPlatform::DarwinClangDynamic.into();
        assert_eq!(tag.as_str(), "Darwin-clang-dynamic");
    }

    #[test]
    fn supported_platforms_drop_sentinel_and_sort() {
        let listed = supported_platforms(["Linux64-gcc-dynamic", "xxx", "Darwin-clang-dynamic"]);
        assert_eq!(listed, vec!["Darwin-clang-dynamic", "Linux64-gcc-dynamic"]);
    }
}
