//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use geoscaff_core::domain::ArtifactKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "geoscaff",
    bin_name = "geoscaff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Geogram + CMake project generator",
    long_about = "geoscaff writes the CMake build files of a Geogram-based \
                  project and configures its Release and Debug build trees.",
    after_help = "EXAMPLES:\n\
        \x20 geoscaff new polycube\n\
        \x20 geoscaff configure polycube --with-gfx\n\
        \x20 geoscaff show polycube --artifact configure-script\n\
        \x20 geoscaff completions bash > /usr/share/bash-completion/completions/geoscaff",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the build artifacts for a project.
    #[command(
        visible_alias = "n",
        about = "Generate the project build files",
        after_help = "EXAMPLES:\n\
            \x20 geoscaff new polycube\n\
            \x20 geoscaff new polycube --dry-run\n\
            \x20 geoscaff new polycube --root ../polycube --format json"
    )]
    New(NewArgs),

    /// Run the configure step natively.
    #[command(
        visible_alias = "cfg",
        about = "Configure the Release and Debug build trees",
        disable_help_flag = true,
        after_help = "Everything after NAME is passed to the option translator \
                      unchanged; `geoscaff configure NAME --help` prints its usage."
    )]
    Configure(ConfigureArgs),

    /// Print generated artifacts without writing them.
    #[command(
        about = "Print generated artifacts",
        after_help = "EXAMPLES:\n\
            \x20 geoscaff show polycube\n\
            \x20 geoscaff show polycube --artifact top-level"
    )]
    Show(ShowArgs),

    /// Initialise a geoscaff configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 geoscaff init           # default location\n\
            \x20 geoscaff init --local   # .geoscaff.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 geoscaff completions bash > ~/.local/share/bash-completion/completions/geoscaff\n\
            \x20 geoscaff completions zsh  > ~/.zfunc/_geoscaff\n\
            \x20 geoscaff completions fish > ~/.config/fish/completions/geoscaff.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the geoscaff configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 geoscaff config get configure.cmake\n\
            \x20 geoscaff config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `geoscaff new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name. Prompted for when omitted in an interactive build.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    /// Project root (defaults to `project.root` from the config).
    #[arg(long = "root", value_name = "DIR", help = "Project root directory")]
    pub root: Option<PathBuf>,

    /// Preview what would be written without touching the disk.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "text", help = "Report format")]
    pub format: ReportFormat,
}

/// Report format for `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

// ── configure ─────────────────────────────────────────────────────────────────

/// Arguments for `geoscaff configure`.
#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// Project root (defaults to `project.root` from the config).
    #[arg(long = "root", value_name = "DIR", help = "Project root directory")]
    pub root: Option<PathBuf>,

    /// Project name, as given to `new`.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Raw configure tokens: `--with-*`, `--build_name_suffix=`, platform.
    #[arg(
        value_name = "TOKENS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub tokens: Vec<String>,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `geoscaff show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Print a single artifact.
    #[arg(
        short = 'a',
        long = "artifact",
        value_name = "KIND",
        value_parser = parse_artifact_kind,
        help = "Artifact to print (build-root, build-root-config, platform-options, \
                top-level, configure-script, app-stub)"
    )]
    pub artifact: Option<ArtifactKind>,
}

fn parse_artifact_kind(s: &str) -> Result<ArtifactKind, String> {
    s.parse()
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `geoscaff init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.geoscaff.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `geoscaff completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `geoscaff config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `configure.cmake`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
