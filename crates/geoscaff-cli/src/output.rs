//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag wins; the config file only fills in `auto`.
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Payload output (artifact bodies, usage text). Never suppressed.
    pub fn raw(&self, text: &str) -> io::Result<()> {
        self.term.write_str(text)
    }

    /// Pretty JSON on stdout. Never suppressed.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.indicator(Tone::Success, msg)
    }

    /// `✗ <msg>` in red. Shown even in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.indicator(Tone::Error, msg)
    }

    /// `⚠ <msg>` in yellow.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.indicator(Tone::Warning, msg)
    }

    /// `ℹ <msg>` in blue.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.indicator(Tone::Info, msg)
    }

    fn indicator(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet && tone != Tone::Error {
            return Ok(());
        }
        let symbol = tone.symbol();
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            let style = tone.style();
            format!("{} {}", symbol.style(style.bold()), msg.style(style))
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Progress bar over `len` steps; hidden unless output is human.
    pub fn progress(&self, len: u64) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Error => "\u{2717}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Success => Style::new().green(),
            Self::Error => Style::new().red(),
            Self::Warning => Style::new().yellow(),
            Self::Info => Style::new().blue(),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(format: OutputFormat, no_color: bool, config: &AppConfig) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, config)
    }

    #[test]
    fn human_format_keeps_color() {
        let out = make_manager(OutputFormat::Human, false, &AppConfig::default());
        assert!(out.supports_color());
        assert!(!make_manager(OutputFormat::Human, true, &AppConfig::default()).supports_color());
    }

    #[test]
    fn plain_format_never_colors() {
        let out = make_manager(OutputFormat::Plain, false, &AppConfig::default());
        assert!(!out.supports_color());
        assert!(out.progress(3).is_hidden());
    }

    #[test]
    fn config_format_fills_in_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = make_manager(OutputFormat::Auto, false, &config);
        assert_eq!(out.format(), OutputFormat::Json);

        let explicit = make_manager(OutputFormat::Plain, false, &config);
        assert_eq!(explicit.format(), OutputFormat::Plain);
    }
}
