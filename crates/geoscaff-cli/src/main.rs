//! # geoscaff CLI
//!
//! Generates the CMake build files of a Geogram-based project and
//! configures its build trees.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success (including configure help pages) |
//! |  1   | Internal / system error                  |
//! |  2   | User / input error                       |
//! |  3   | Resource not found                       |
//! |  4   | Configuration error                      |
//! |  5   | A build tree failed to configure         |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version land here too and must exit 0.
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: None,
                },
                cli.global.verbose > 0,
                !cli.global.no_color,
            );
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, &output) {
        Ok(()) => {
            info!("geoscaff completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, output.supports_color()),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::New(cmd) => commands::new::execute(cmd, config, output),
        Commands::Configure(cmd) => commands::configure::execute(cmd, config, output),
        Commands::Show(cmd) => commands::show::execute(cmd, output),
        Commands::Init(cmd) => commands::init::execute(cmd, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Translate a `CliError` into a user message and an exit code.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives a redirected stdout.
    eprint!("{}", err.render(verbose, color && std::io::stderr().is_terminal()));

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        // Clap's internal consistency check: catches missing values, conflicts, etc.
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }
}
