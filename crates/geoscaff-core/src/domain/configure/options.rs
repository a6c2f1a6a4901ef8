//! Option translator: configure-script CLI tokens to CMake cache variables.
//!
//! The scan is left to right. Each token is classified by [`classify`]
//! against a closed, ordered table (first match wins):
//!
//! | # | Pattern                       | Effect                                   |
//! |---|-------------------------------|------------------------------------------|
//! | 1 | `--with-<KEY>=<VALUE>`        | string assignment `VORPALINE_WITH_<KEY>` |
//! | 2 | `--with-<KEY>`                | boolean assignment, `TRUE`               |
//! | 3 | `--help-platforms`            | list platforms, stop                     |
//! | 4 | `--build_name_suffix=<S>`     | set the build-tree suffix                |
//! | 5 | `--help`                      | print usage, stop                        |
//! | 6 | any other `-...`              | fatal: unrecognized option               |
//! | 7 | anything else                 | stop; platform override                  |
//!
//! Keys are upper-cased ASCII-only, as `tr '[:lower:]' '[:upper:]'` does in
//! `configure.sh`. One difference with the script remains: the script
//! expands its accumulated options unquoted, so a value containing
//! whitespace reaches CMake as several words. Here every assignment is a
//! single argument.

use std::fmt;

use serde::Serialize;

use crate::domain::error::ConfigureError;

/// Namespace every `--with-<key>` variable lands in.
pub const OPTION_PREFIX: &str = "VORPALINE_WITH_";

/// Variable seeded into every scan before any token is read.
pub const BUILD_TYPE_VARIABLE: &str = "CMAKE_BUILD_TYPE";

const WITH: &str = "--with-";
const SUFFIX: &str = "--build_name_suffix=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Flag(bool),
}

/// One translated token: a CMake variable and its typed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionAssignment {
    pub variable: String,
    pub value: OptionValue,
}

impl OptionAssignment {
    pub fn text(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            value: OptionValue::Text(value.into()),
        }
    }

    pub fn flag(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            value: OptionValue::Flag(true),
        }
    }

    /// The default every scan starts from: `CMAKE_BUILD_TYPE=Debug`.
    pub fn seed() -> Self {
        Self::text(BUILD_TYPE_VARIABLE, "Debug")
    }

    /// Render as a CMake `-D` cache definition.
    pub fn to_define(&self) -> String {
        match &self.value {
            OptionValue::Text(v) => format!("-D{}:STRING={}", self.variable, v),
            OptionValue::Flag(true) => format!("-D{}:BOOL=TRUE", self.variable),
            OptionValue::Flag(false) => format!("-D{}:BOOL=FALSE", self.variable),
        }
    }
}

impl fmt::Display for OptionAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_define())
    }
}

/// Upper-case `key` (ASCII only) and move it into [`OPTION_PREFIX`].
pub fn translate_key(key: &str) -> String {
    format!("{OPTION_PREFIX}{}", key.to_ascii_uppercase())
}

/// Classification of a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    WithValue { key: &'a str, value: &'a str },
    WithFlag { key: &'a str },
    HelpPlatforms,
    BuildNameSuffix(&'a str),
    Help,
    Unknown(&'a str),
    Positional(&'a str),
}

pub fn classify(token: &str) -> Token<'_> {
    if let Some(rest) = token.strip_prefix(WITH) {
        return match rest.split_once('=') {
            Some((key, value)) => Token::WithValue { key, value },
            None => Token::WithFlag { key: rest },
        };
    }
    match token {
        "--help-platforms" => Token::HelpPlatforms,
        t if t.starts_with(SUFFIX) => Token::BuildNameSuffix(&t[SUFFIX.len()..]),
        "--help" => Token::Help,
        t if t.starts_with('-') => Token::Unknown(t),
        t => Token::Positional(t),
    }
}

/// Everything a configure run needs once the scan has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigureRequest {
    /// Seeded default first, then one entry per `--with-*` token, in order.
    pub assignments: Vec<OptionAssignment>,
    pub suffix: String,
    pub platform_override: Option<String>,
    /// Tokens after the platform override; they carry no meaning.
    pub ignored: Vec<String>,
}

impl Default for ConfigureRequest {
    fn default() -> Self {
        Self {
            assignments: vec![OptionAssignment::seed()],
            suffix: String::new(),
            platform_override: None,
            ignored: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Help,
    HelpPlatforms,
    Configure(ConfigureRequest),
}

/// Scan `tokens` and accumulate assignments.
///
/// Duplicated variables are not merged; CMake resolves them last-wins.
pub fn translate<I, S>(tokens: I) -> Result<ScanOutcome, ConfigureError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut request = ConfigureRequest::default();
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        let token = token.as_ref();
        // The script loops `while [ -n "$1" ]`: an empty argument ends the scan.
        if token.is_empty() {
            break;
        }
        match classify(token) {
            Token::WithValue { key, value } => request
                .assignments
                .push(OptionAssignment::text(translate_key(key), value)),
            Token::WithFlag { key } => request
                .assignments
                .push(OptionAssignment::flag(translate_key(key))),
            Token::HelpPlatforms => return Ok(ScanOutcome::HelpPlatforms),
            Token::BuildNameSuffix(suffix) => request.suffix = suffix.to_string(),
            Token::Help => return Ok(ScanOutcome::Help),
            Token::Unknown(option) => {
                return Err(ConfigureError::UnrecognizedOption {
                    option: option.to_string(),
                });
            }
            Token::Positional(platform) => {
                request.platform_override = Some(platform.to_string());
                request.ignored = tokens.by_ref().map(|t| t.as_ref().to_string()).collect();
                break;
            }
        }
    }

    Ok(ScanOutcome::Configure(request))
}
