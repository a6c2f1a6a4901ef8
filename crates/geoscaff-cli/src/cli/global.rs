//! Global arguments that apply to every subcommand.
//!
//! Flattened into [`super::Cli`]. For `configure`, they must come before
//! the project name: everything after it belongs to the translator.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`).  Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings and errors
    -v      - Info level (progress messages)
    -vv     - Debug level (generator arguments, detection)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path; replaces the default location.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "GEOSCAFF_CONFIG",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Machine-readable output format.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Human-readable with colors.
    Human,
    /// Plain text without colors.
    Plain,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value; unknown strings mean `Auto`.
    pub fn from_config(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "human" => Self::Human,
            "plain" => Self::Plain,
            "json" => Self::Json,
            _ => Self::Auto,
        }
    }
}
