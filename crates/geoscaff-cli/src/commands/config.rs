//! `geoscaff config`: inspect configuration values.

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.raw(&format!("{value}\n"))?;
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
            } else {
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.raw(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            output.raw(&format!("{}\n", AppConfig::config_path().display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!(
            "Unknown config key: '{key}' (known: {})",
            AppConfig::KEYS.join(", ")
        ),
        source: None,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
