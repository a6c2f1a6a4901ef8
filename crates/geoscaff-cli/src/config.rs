//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `GEOSCAFF_*` environment variables, `__` between sections
//!    (`GEOSCAFF_CONFIGURE__CMAKE=/opt/cmake/bin/cmake`)
//! 3. `--config FILE`, or else `.geoscaff.toml` in the CWD over the
//!    per-user config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// File name of the per-directory config.
pub const LOCAL_CONFIG: &str = ".geoscaff.toml";

const ENV_PREFIX: &str = "GEOSCAFF";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project: ProjectConfig,
    pub configure: ConfigureConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory artifacts are written beneath.
    pub root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigureConfig {
    /// Build trees go here, relative to the project root.
    pub build_root: PathBuf,
    /// Generator program.
    pub cmake: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl Default for ConfigureConfig {
    fn default() -> Self {
        Self {
            build_root: PathBuf::from("build"),
            cmake: "cmake".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;
        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(File::from(Path::new(LOCAL_CONFIG)).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let loaded = builder.build().context("Failed to read configuration")?;
        loaded
            .try_deserialize()
            .context("Configuration has an invalid value")
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.geoscaff.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "geoscaff", "geoscaff")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }

    /// Look up one dotted key, rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "project.root" => self.project.root.display().to_string(),
            "configure.build_root" => self.configure.build_root.display().to_string(),
            "configure.cmake" => self.configure.cmake.clone(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Every known dotted key.
    pub const KEYS: [&'static str; 5] = [
        "project.root",
        "configure.build_root",
        "configure.cmake",
        "output.no_color",
        "output.format",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_the_script() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.configure.build_root, PathBuf::from("build"));
        assert_eq!(cfg.configure.cmake, "cmake");
        assert_eq!(cfg.project.root, PathBuf::from("."));
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        std::fs::write(
            file.path(),
            "[configure]\ncmake = \"/opt/cmake/bin/cmake\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.configure.cmake, "/opt/cmake/bin/cmake");
        // Untouched keys keep their defaults.
        assert_eq!(cfg.configure.build_root, PathBuf::from("build"));
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let missing = PathBuf::from("/definitely/not/here/geoscaff.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn every_key_resolves() {
        let cfg = AppConfig::default();
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
        assert_eq!(cfg.get("nope"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
